pub mod elimination;
pub mod reading;
pub mod segments;
pub mod signature;

use anyhow::Context;
use std::io;

pub use reading::{ParseReadingError, Reading};
pub use segments::SegmentSet;
pub use signature::{DecodeError, SignatureDecoder, decode_reading};

fn sum_readings<F>(reader: impl io::BufRead, mut value_of: F) -> anyhow::Result<u64>
where
    F: FnMut(&Reading) -> anyhow::Result<u64>,
{
    let mut sum = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_num))?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let reading: Reading = line
            .parse()
            .with_context(|| format!("Invalid reading on line {}: {}", line_num, line))?;

        sum += value_of(&reading)
            .with_context(|| format!("Unrecognized signal pattern on line {}: {}", line_num, line))?;
    }

    Ok(sum)
}

/// Decodes every non-empty line of `reader` and sums the decoded values.
pub fn sum_outputs(reader: impl io::BufRead) -> anyhow::Result<u64> {
    sum_readings(reader, |reading| Ok(decode_reading(reading)? as u64))
}

/// Counts the outputs showing 1, 4, 7 or 8 over every non-empty line of
/// `reader`.
pub fn count_unique_outputs(reader: impl io::BufRead) -> anyhow::Result<u64> {
    sum_readings(reader, |reading| Ok(reading.count_unique_outputs() as u64))
}
