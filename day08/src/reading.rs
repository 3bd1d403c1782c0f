use itertools::Itertools;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0, space1};
use nom::multi::separated_list0;
use nom::sequence::{delimited, separated_pair};
use nom::{Finish, IResult, Parser};
use std::error;
use std::fmt;
use std::str::FromStr;

use crate::segments::{NUM_DIGITS, SegmentSet};

pub const NUM_SIGNAL_PATTERNS: usize = NUM_DIGITS;
pub const NUM_SIGNAL_OUTPUTS: usize = 4;

/// Wire counts of 1, 7, 4 and 8, the digits told apart by size alone.
const UNIQUE_DIGIT_LENS: [usize; 4] = [2, 3, 4, 7];

#[derive(Debug)]
pub enum ParseReadingError {
    Separators(usize),
    Patterns(usize),
    Outputs(usize),
    Tokens(usize, usize),
    Syntax(String),
    EmptyPattern,
    Wire(char),
    DuplicateWire(String),
    DuplicatePattern(SegmentSet),
}

impl fmt::Display for ParseReadingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseReadingError::*;
        match self {
            Separators(n) => write!(f, "Expected one '|' separator, found {}", n),
            Patterns(n) => write!(f, "Invalid number of signal patterns ({})", n),
            Outputs(n) => write!(f, "Invalid number of signal outputs ({})", n),
            Tokens(pn, on) => write!(
                f,
                "Invalid number of signal patterns ({}) and outputs ({})",
                pn, on
            ),
            Syntax(rest) => write!(f, "Unexpected input at \"{}\"", rest),
            EmptyPattern => write!(f, "Empty signal pattern"),
            Wire(c) => write!(f, "Invalid wire '{}'", c),
            DuplicateWire(token) => write!(f, "Repeated wire in signal pattern \"{}\"", token),
            DuplicatePattern(p) => write!(f, "Repeated signal pattern \"{}\"", p),
        }
    }
}

impl error::Error for ParseReadingError {}

fn parse_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '|').parse(input)
}

fn parse_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(space1, parse_token).parse(input)
}

fn parse_line(input: &str) -> IResult<&str, (Vec<&str>, Vec<&str>)> {
    separated_pair(
        parse_tokens,
        delimited(multispace0, char('|'), multispace0),
        parse_tokens,
    )
    .parse(input)
}

fn parse_patterns(tokens: &[&str]) -> Result<Vec<SegmentSet>, ParseReadingError> {
    tokens.iter().map(|t| t.parse()).collect()
}

/// One line of observations: the ten digits seen under some unknown wiring,
/// and the four digits to decode under that same wiring.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    tests: [SegmentSet; NUM_SIGNAL_PATTERNS],
    outputs: [SegmentSet; NUM_SIGNAL_OUTPUTS],
}

impl Reading {
    pub fn new(
        tests: [SegmentSet; NUM_SIGNAL_PATTERNS],
        outputs: [SegmentSet; NUM_SIGNAL_OUTPUTS],
    ) -> Result<Reading, ParseReadingError> {
        if let Some(dup) = tests.iter().duplicates().next() {
            return Err(ParseReadingError::DuplicatePattern(*dup));
        }
        Ok(Reading { tests, outputs })
    }

    pub fn tests(&self) -> &[SegmentSet; NUM_SIGNAL_PATTERNS] {
        &self.tests
    }

    pub fn outputs(&self) -> &[SegmentSet; NUM_SIGNAL_OUTPUTS] {
        &self.outputs
    }

    /// Number of outputs showing a digit of unique wire count.
    pub fn count_unique_outputs(&self) -> usize {
        self.outputs
            .iter()
            .filter(|o| UNIQUE_DIGIT_LENS.contains(&o.len()))
            .count()
    }

    fn find_test<P>(&self, predicate: P) -> Option<SegmentSet>
    where
        P: Fn(&SegmentSet) -> bool,
    {
        self.tests
            .iter()
            .copied()
            .filter(|t| predicate(t))
            .exactly_one()
            .ok()
    }

    /// The test pattern of `digit`, when the digit can be told apart from the
    /// others:
    ///
    ///   1, 7, 4, 8: has 2, 3, 4, 7 wires
    ///   9: has 6 wires && has all wires of 4
    ///   0: has 6 wires && not all wires of 4 && has all wires of 1
    ///   6: has 6 wires && not all wires of 1
    ///   3: has 5 wires && has all wires of 1
    ///   5: has 5 wires && not all wires of 1 && all its wires are in 9
    ///   2: has 5 wires && not all its wires are in 9
    pub fn digit_test(&self, digit: u8) -> Option<SegmentSet> {
        match digit {
            1 => self.find_test(|t| t.len() == 2),
            7 => self.find_test(|t| t.len() == 3),
            4 => self.find_test(|t| t.len() == 4),
            8 => self.find_test(|t| t.len() == 7),
            9 => {
                let four = self.digit_test(4)?;
                self.find_test(|t| t.len() == 6 && t.is_superset(&four))
            }
            0 => {
                let one = self.digit_test(1)?;
                let four = self.digit_test(4)?;
                self.find_test(|t| t.len() == 6 && !t.is_superset(&four) && t.is_superset(&one))
            }
            6 => {
                let one = self.digit_test(1)?;
                self.find_test(|t| t.len() == 6 && !t.is_superset(&one))
            }
            3 => {
                let one = self.digit_test(1)?;
                self.find_test(|t| t.len() == 5 && t.is_superset(&one))
            }
            5 => {
                let one = self.digit_test(1)?;
                let nine = self.digit_test(9)?;
                self.find_test(|t| t.len() == 5 && !t.is_superset(&one) && t.is_subset(&nine))
            }
            2 => {
                let nine = self.digit_test(9)?;
                self.find_test(|t| t.len() == 5 && !t.is_subset(&nine))
            }
            _ => None,
        }
    }
}

impl FromStr for Reading {
    type Err = ParseReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();

        match line.matches('|').count() {
            1 => {}
            n => return Err(ParseReadingError::Separators(n)),
        }

        let (unconsumed, (tests, outputs)) = parse_line(line)
            .finish()
            .map_err(|e| ParseReadingError::Syntax(e.input.to_owned()))?;

        if !unconsumed.is_empty() {
            return Err(ParseReadingError::Syntax(unconsumed.to_owned()));
        }

        match (tests.len(), outputs.len()) {
            (NUM_SIGNAL_PATTERNS, NUM_SIGNAL_OUTPUTS) => {}
            (NUM_SIGNAL_PATTERNS, n) => return Err(ParseReadingError::Outputs(n)),
            (n, NUM_SIGNAL_OUTPUTS) => return Err(ParseReadingError::Patterns(n)),
            (pn, on) => return Err(ParseReadingError::Tokens(pn, on)),
        }

        let tests: [SegmentSet; NUM_SIGNAL_PATTERNS] = parse_patterns(&tests)?
            .try_into()
            .map_err(|t: Vec<SegmentSet>| ParseReadingError::Patterns(t.len()))?;
        let outputs: [SegmentSet; NUM_SIGNAL_OUTPUTS] = parse_patterns(&outputs)?
            .try_into()
            .map_err(|o: Vec<SegmentSet>| ParseReadingError::Outputs(o.len()))?;

        Reading::new(tests, outputs)
    }
}
