//! Decoding by overlap signatures.
//!
//! The overlap signature of a pattern is the multiset of intersection sizes it
//! forms with every pattern of its group of ten, itself included. Renaming the
//! wires consistently across the group changes no intersection size, so a
//! scrambled digit has the same signature as its canonical counterpart.

use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::error;
use std::fmt;
use std::sync::LazyLock;

use crate::reading::Reading;
use crate::segments::{CANONICAL_DIGITS, NUM_DIGITS, SegmentSet};

/// Intersection size -> number of patterns overlapping by that many wires.
pub type OverlapSignature = BTreeMap<usize, usize>;

static CANONICAL_SIGNATURES: LazyLock<[OverlapSignature; NUM_DIGITS]> =
    LazyLock::new(|| overlap_signatures(&CANONICAL_DIGITS));

#[derive(Debug)]
pub enum DecodeError {
    UnmatchedTest(SegmentSet),
    AmbiguousDigit(u8),
    UnknownOutput(SegmentSet),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeError::*;
        match self {
            UnmatchedTest(p) => write!(f, "Signal pattern \"{}\" matches no digit", p),
            AmbiguousDigit(d) => write!(f, "Several signal patterns match digit {}", d),
            UnknownOutput(p) => write!(f, "Output pattern \"{}\" is not a signal pattern", p),
        }
    }
}

impl error::Error for DecodeError {}

fn overlap_signature(pattern: &SegmentSet, group: &[SegmentSet]) -> OverlapSignature {
    group
        .iter()
        .map(|other| pattern.intersection(other).len())
        .counts()
        .into_iter()
        .collect()
}

pub fn overlap_signatures(group: &[SegmentSet; NUM_DIGITS]) -> [OverlapSignature; NUM_DIGITS] {
    group.each_ref().map(|p| overlap_signature(p, group))
}

/// Maps the test patterns of one reading to their digits.
#[derive(Debug)]
pub struct SignatureDecoder {
    digits: HashMap<SegmentSet, u8>,
}

impl SignatureDecoder {
    pub fn new(tests: &[SegmentSet; NUM_DIGITS]) -> Result<SignatureDecoder, DecodeError> {
        let mut digits = HashMap::with_capacity(NUM_DIGITS);
        let mut matched = [false; NUM_DIGITS];

        for (test, signature) in tests.iter().zip(overlap_signatures(tests)) {
            // First match wins; canonical signatures are distinct anyway.
            let digit = CANONICAL_SIGNATURES
                .iter()
                .position(|s| *s == signature)
                .ok_or(DecodeError::UnmatchedTest(*test))?;

            if matched[digit] {
                return Err(DecodeError::AmbiguousDigit(digit as u8));
            }
            matched[digit] = true;

            digits.insert(*test, digit as u8);
        }

        Ok(SignatureDecoder { digits })
    }

    pub fn digit(&self, pattern: &SegmentSet) -> Result<u8, DecodeError> {
        self.digits
            .get(pattern)
            .copied()
            .ok_or(DecodeError::UnknownOutput(*pattern))
    }

    /// Reads `outputs` as one number, most significant digit first.
    pub fn decode(&self, outputs: &[SegmentSet]) -> Result<u32, DecodeError> {
        outputs
            .iter()
            .try_fold(0, |acc, o| Ok(acc * 10 + self.digit(o)? as u32))
    }
}

pub fn decode_reading(reading: &Reading) -> Result<u32, DecodeError> {
    SignatureDecoder::new(reading.tests())?.decode(reading.outputs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::NUM_SEGMENTS;

    const EXAMPLE_LINE: &str =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

    fn set(s: &str) -> SegmentSet {
        s.parse().unwrap()
    }

    fn relabel_reading(reading: &Reading, mapping: &[usize; NUM_SEGMENTS]) -> Reading {
        Reading::new(
            reading.tests().map(|t| t.relabel(mapping)),
            reading.outputs().map(|o| o.relabel(mapping)),
        )
        .unwrap()
    }

    fn wire_permutations() -> impl Iterator<Item = [usize; NUM_SEGMENTS]> {
        (0..NUM_SEGMENTS)
            .permutations(NUM_SEGMENTS)
            .map(|p| p.try_into().unwrap())
    }

    #[test]
    fn canonical_signatures_are_distinct() {
        assert!(CANONICAL_SIGNATURES.iter().all_unique());
    }

    #[test]
    fn canonical_signature_of_one() {
        // Digit 1 shares both wires with 7 digits and one wire with 3.
        assert_eq!(CANONICAL_SIGNATURES[1], BTreeMap::from([(1, 3), (2, 7)]));
    }

    #[test]
    fn decode_example() {
        let reading: Reading = EXAMPLE_LINE.parse().unwrap();
        assert_eq!(decode_reading(&reading).unwrap(), 5353);
    }

    #[test]
    fn decode_identity_wiring() {
        let reading = Reading::new(
            *CANONICAL_DIGITS,
            ["abcefg", "cf", "acdeg", "acdfg"].map(set),
        )
        .unwrap();
        assert_eq!(decode_reading(&reading).unwrap(), 123);
    }

    #[test]
    fn decode_example_under_every_relabeling() {
        let reading: Reading = EXAMPLE_LINE.parse().unwrap();
        for mapping in wire_permutations() {
            let relabeled = relabel_reading(&reading, &mapping);
            assert_eq!(decode_reading(&relabeled).unwrap(), 5353, "{:?}", mapping);
        }
    }

    #[test]
    fn decode_known_wirings() {
        for (i, mapping) in wire_permutations().enumerate() {
            let mut tests = CANONICAL_DIGITS.map(|d| d.relabel(&mapping));
            tests.rotate_left(i % NUM_DIGITS);

            let digits = [i % 10, (i / 10) % 10, (i / 100) % 10, (i * 7 + 3) % 10];
            let outputs = digits.map(|d| CANONICAL_DIGITS[d].relabel(&mapping));
            let expected = digits.iter().fold(0, |acc, d| acc * 10 + *d as u32);

            let reading = Reading::new(tests, outputs).unwrap();
            assert_eq!(decode_reading(&reading).unwrap(), expected, "{:?}", mapping);
        }
    }

    #[test]
    fn decode_fails_on_unknown_output() {
        let reading = Reading::new(*CANONICAL_DIGITS, ["cf", "ab", "cf", "cf"].map(set)).unwrap();
        assert!(matches!(
            decode_reading(&reading),
            Err(DecodeError::UnknownOutput(p)) if p == set("ab")
        ));
    }

    #[test]
    fn decode_fails_on_unmatched_test() {
        let tests = ["a", "b", "c", "d", "e", "f", "g", "ab", "cd", "ef"].map(set);
        let reading = Reading::new(tests, ["a", "a", "a", "a"].map(set)).unwrap();
        assert!(matches!(
            decode_reading(&reading),
            Err(DecodeError::UnmatchedTest(p)) if p == set("a")
        ));
    }
}
