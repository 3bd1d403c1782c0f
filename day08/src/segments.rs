use bitvec::prelude as bv;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::reading::ParseReadingError;

pub const NUM_SEGMENTS: usize = 7;
pub const NUM_DIGITS: usize = 10;

type SegmentBitArray = bv::BitArr!(for NUM_SEGMENTS, in u8, bv::Lsb0);

///  aaaa
/// b    c
/// b    c
///  dddd
/// e    f
/// e    f
///  gggg
const CANONICAL_DIGIT_LETTERS: [&str; NUM_DIGITS] = [
    "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg",
];

/// Segments lit for each digit on a correctly wired display.
pub static CANONICAL_DIGITS: LazyLock<[SegmentSet; NUM_DIGITS]> =
    LazyLock::new(|| CANONICAL_DIGIT_LETTERS.map(SegmentSet::from_known_letters));

/// A set over the letters `a`..`g`, used both for the wires lit in an observed
/// pattern and for the segments of a canonical digit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentSet(SegmentBitArray);

impl SegmentSet {
    pub fn empty() -> SegmentSet {
        SegmentSet(bv::BitArray::ZERO)
    }

    pub fn full() -> SegmentSet {
        let mut bits: SegmentBitArray = bv::BitArray::ZERO;
        for idx in 0..NUM_SEGMENTS {
            bits.set(idx, true);
        }
        SegmentSet(bits)
    }

    /// Segments of `digit` on a correctly wired display.
    pub fn canonical(digit: u8) -> SegmentSet {
        CANONICAL_DIGITS[digit as usize]
    }

    fn from_known_letters(letters: &str) -> SegmentSet {
        let mut set = SegmentSet::empty();
        for idx in letters.chars().filter_map(letter_index) {
            set.insert(idx);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < NUM_SEGMENTS && self.0[idx]
    }

    pub fn insert(&mut self, idx: usize) {
        assert!(idx < NUM_SEGMENTS, "Segment index out of range: {}", idx);
        self.0.set(idx, true);
    }

    pub fn remove(&mut self, idx: usize) {
        assert!(idx < NUM_SEGMENTS, "Segment index out of range: {}", idx);
        self.0.set(idx, false);
    }

    /// Indexes of the members, in ascending letter order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter_ones()
    }

    fn zip_with<F>(&self, other: &SegmentSet, f: F) -> SegmentSet
    where
        F: Fn(bool, bool) -> bool,
    {
        let mut bits: SegmentBitArray = bv::BitArray::ZERO;
        for idx in 0..NUM_SEGMENTS {
            bits.set(idx, f(self.0[idx], other.0[idx]));
        }
        SegmentSet(bits)
    }

    pub fn intersection(&self, other: &SegmentSet) -> SegmentSet {
        self.zip_with(other, |a, b| a && b)
    }

    pub fn difference(&self, other: &SegmentSet) -> SegmentSet {
        self.zip_with(other, |a, b| a && !b)
    }

    pub fn is_subset(&self, other: &SegmentSet) -> bool {
        self.difference(other).is_empty()
    }

    pub fn is_superset(&self, other: &SegmentSet) -> bool {
        other.is_subset(self)
    }

    /// Moves every member `idx` to `mapping[idx]`. With a bijective mapping the
    /// size of the set is preserved.
    ///
    /// Panics if a used mapping target is not a segment index.
    pub fn relabel(&self, mapping: &[usize; NUM_SEGMENTS]) -> SegmentSet {
        let mut set = SegmentSet::empty();
        for idx in self.iter() {
            set.insert(mapping[idx]);
        }
        set
    }

    /// The digit whose canonical segments are exactly this set.
    pub fn canonical_digit(&self) -> Option<u8> {
        CANONICAL_DIGITS
            .iter()
            .position(|d| d == self)
            .map(|d| d as u8)
    }
}

pub fn letter(idx: usize) -> char {
    (b'a' + idx as u8) as char
}

fn letter_index(c: char) -> Option<usize> {
    match c {
        'a'..='g' => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

impl FromStr for SegmentSet {
    type Err = ParseReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseReadingError::EmptyPattern);
        }

        let mut set = SegmentSet::empty();

        for c in s.chars() {
            let idx = letter_index(c).ok_or(ParseReadingError::Wire(c))?;
            if set.contains(idx) {
                return Err(ParseReadingError::DuplicateWire(s.to_owned()));
            }
            set.insert(idx);
        }

        Ok(set)
    }
}

impl fmt::Display for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for idx in self.iter() {
            write!(f, "{}", letter(idx))?;
        }
        Ok(())
    }
}

impl fmt::Debug for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SegmentSet({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> SegmentSet {
        s.parse().unwrap()
    }

    #[test]
    fn parse_is_order_insensitive() {
        assert_eq!(set("gfedcba"), SegmentSet::full());
        assert_eq!(set("fc"), set("cf"));
        assert_eq!(set("dab").to_string(), "abd");
    }

    #[test]
    fn parse_rejects_invalid_letters() {
        assert!(matches!(
            "abh".parse::<SegmentSet>(),
            Err(ParseReadingError::Wire('h'))
        ));
        assert!(matches!(
            "aba".parse::<SegmentSet>(),
            Err(ParseReadingError::DuplicateWire(_))
        ));
        assert!(matches!(
            "".parse::<SegmentSet>(),
            Err(ParseReadingError::EmptyPattern)
        ));
    }

    #[test]
    fn set_operations() {
        let four = SegmentSet::canonical(4);
        let one = SegmentSet::canonical(1);

        assert_eq!(four.len(), 4);
        assert_eq!(four.intersection(&one), one);
        assert_eq!(four.difference(&one), set("bd"));
        assert!(four.is_superset(&one));
        assert!(one.is_subset(&four));
        assert!(!four.is_subset(&one));
        assert_eq!(four.iter().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
    }

    #[test]
    fn canonical_digits_have_expected_sizes() {
        let sizes: Vec<usize> = CANONICAL_DIGITS.iter().map(|d| d.len()).collect();
        assert_eq!(sizes, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
        assert_eq!(SegmentSet::canonical(8), SegmentSet::full());
    }

    #[test]
    fn canonical_digit_lookup() {
        for digit in 0..NUM_DIGITS as u8 {
            assert_eq!(SegmentSet::canonical(digit).canonical_digit(), Some(digit));
        }
        assert_eq!(set("ab").canonical_digit(), None);
    }

    #[test]
    fn relabel_moves_members() {
        // a->b, b->c, ..., g->a
        let shift = [1, 2, 3, 4, 5, 6, 0];
        assert_eq!(set("ag").relabel(&shift), set("ab"));
        assert_eq!(SegmentSet::full().relabel(&shift), SegmentSet::full());
    }

    #[test]
    #[should_panic(expected = "Segment index out of range: 7")]
    fn relabel_outside_alphabet() {
        set("a").relabel(&[7, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "Segment index out of range: 7")]
    fn insert_outside_alphabet() {
        let mut s = SegmentSet::empty();
        s.insert(7);
    }

    #[test]
    fn full_holds_only_alphabet() {
        let full = SegmentSet::full();
        assert_eq!(full.len(), NUM_SEGMENTS);
        assert!(!full.contains(7));
        assert_eq!(full.iter().last(), Some(NUM_SEGMENTS - 1));
    }
}
