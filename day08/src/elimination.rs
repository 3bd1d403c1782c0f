//! Decoding wire by wire: every wire starts out as a candidate for every
//! segment, and digits whose test pattern is known narrow the candidates down.

use itertools::Itertools;

use crate::reading::Reading;
use crate::segments::{NUM_SEGMENTS, SegmentSet, letter};

/// Digits seeding the elimination when solving a reading with [`solve`].
pub const REFERENCE_SEED_DIGITS: [u8; 5] = [1, 4, 7, 8, 9];

/// Candidate segments per wire. Candidates only ever shrink.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGuesses {
    guesses: [SegmentSet; NUM_SEGMENTS],
}

impl Default for SegmentGuesses {
    fn default() -> Self {
        SegmentGuesses::new()
    }
}

impl SegmentGuesses {
    pub fn new() -> SegmentGuesses {
        SegmentGuesses {
            guesses: [SegmentSet::full(); NUM_SEGMENTS],
        }
    }

    pub fn candidates(&self, wire: usize) -> SegmentSet {
        self.guesses[wire]
    }

    /// Narrows the candidates of the wires lit for `digit` to the segments lit
    /// for the digit, which drops every segment the digit leaves off. Wires
    /// outside `lit_wires` are left as they are.
    pub fn apply_digit(&mut self, digit: u8, lit_wires: &SegmentSet) {
        let on = SegmentSet::canonical(digit);

        for wire in lit_wires.iter() {
            let guess = &mut self.guesses[wire];
            *guess = guess.intersection(&on);
        }
    }

    /// Wires narrowed down to one segment, as `(wire, segment)`.
    pub fn known(&self) -> Vec<(usize, usize)> {
        self.guesses
            .iter()
            .enumerate()
            .filter_map(|(wire, guess)| guess.iter().exactly_one().ok().map(|s| (wire, s)))
            .collect()
    }

    /// Removes the segment of every known wire from the other wires. Returns
    /// whether any candidate was removed.
    pub fn eliminate_known(&mut self) -> bool {
        let mut changed = false;

        for (known_wire, segment) in self.known() {
            for (wire, guess) in self.guesses.iter_mut().enumerate() {
                if wire != known_wire && guess.contains(segment) {
                    guess.remove(segment);
                    changed = true;
                }
            }
        }

        changed
    }

    pub fn is_resolved(&self) -> bool {
        self.wiring().is_some()
    }

    /// The wiring, once every wire has exactly one candidate and no two wires
    /// share it.
    pub fn wiring(&self) -> Option<Wiring> {
        let mut segments = [0; NUM_SEGMENTS];

        for (wire, guess) in self.guesses.iter().enumerate() {
            segments[wire] = guess.iter().exactly_one().ok()?;
        }

        if !segments.iter().all_unique() {
            return None;
        }

        Some(Wiring(segments))
    }
}

/// Wire -> segment bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring([usize; NUM_SEGMENTS]);

impl Wiring {
    pub fn segment(&self, wire: usize) -> usize {
        self.0[wire]
    }

    /// The segments lit by `pattern`.
    pub fn translate(&self, pattern: &SegmentSet) -> SegmentSet {
        pattern.relabel(&self.0)
    }

    pub fn digit(&self, pattern: &SegmentSet) -> Option<u8> {
        self.translate(pattern).canonical_digit()
    }

    pub fn decode(&self, outputs: &[SegmentSet]) -> Option<u32> {
        outputs
            .iter()
            .try_fold(0, |acc, o| Some(acc * 10 + self.digit(o)? as u32))
    }

    /// Segment letter for each wire `a`..`g`.
    pub fn to_letters(&self) -> String {
        self.0.iter().map(|s| letter(*s)).collect()
    }
}

/// Seeds with [`REFERENCE_SEED_DIGITS`]. The result is not guaranteed to be
/// resolved.
pub fn solve(reading: &Reading) -> SegmentGuesses {
    solve_with(reading, &REFERENCE_SEED_DIGITS)
}

/// Seeds with `digits`, skipping those whose test pattern cannot be told
/// apart, then eliminates known wires until nothing changes.
pub fn solve_with(reading: &Reading, digits: &[u8]) -> SegmentGuesses {
    let mut guesses = SegmentGuesses::new();

    for &digit in digits {
        if let Some(lit_wires) = reading.digit_test(digit) {
            guesses.apply_digit(digit, &lit_wires);
        }
    }

    while guesses.eliminate_known() {}

    guesses
}
