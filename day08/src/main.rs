use anyhow::Context;
use std::env;
use std::fs::File;
use std::io;

/// CLI usage: cargo run -- input.txt
fn main() -> anyhow::Result<()> {
    let filename = env::args()
        .nth(1)
        .context("Missing input file\n\nUsage: day08 <input.txt>")?;

    let file = File::open(&filename).with_context(|| format!("File not found: {}", filename))?;

    let sum = day08::sum_outputs(io::BufReader::new(file))
        .with_context(|| format!("Failed to decode {}", filename))?;

    println!("{}", sum);

    Ok(())
}
