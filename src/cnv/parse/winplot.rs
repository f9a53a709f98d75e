//! Parsing of the per-sample window plot file, the core of this module.
//!
//! Each line describes one genomic window: a `chr<label>` token, the
//! window start and end, and the normalized depth ratio observed over that
//! window. The parser turns the file into the ordered point list behind
//! the per-sample scatter plot:
//!
//! 1. Autosomal windows come first, sorted ascending by
//!    `(chromosome number, start, end)`, followed by the sex chromosome
//!    windows sorted by `(label, start, end)` (X before Y). Sorting, rather
//!    than keeping file order, pins the x-axis to genome coordinates no
//!    matter how the upstream tool emitted its windows, which keeps plots
//!    visually comparable across samples.
//! 2. Each emitted window gets a 1-based ordinal that keeps counting
//!    across the autosome to sex chromosome boundary; the ordinal is the
//!    plot's x-coordinate.
//! 3. Windows alternate between two fixed colors by chromosome parity:
//!    even-numbered autosomes are blue, odd are red. X is always red and Y
//!    is always blue, continuing the alternation past chr22.
//!
//! Windows repeated within one file collapse to the last observed ratio.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Marker color for even-numbered autosomes and chrY.
pub const WINDOW_BLUE: &str = "#0000FF";

/// Marker color for odd-numbered autosomes and chrX.
pub const WINDOW_RED: &str = "#FF0000";

/// An error encountered while parsing a window plot file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A line holds fewer than the four required fields.
    #[error("line {line}: expected at least 4 fields, found {found}")]
    TooFewFields {
        /// 1-based line number.
        line: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// A line's first token is not a recognizable chromosome.
    #[error("line {line}: cannot read a chromosome from {token:?}")]
    InvalidChromosome {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A coordinate or ratio field does not parse as a number.
    #[error("line {line}: invalid {field}: {token:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Which field failed to parse.
        field: &'static str,
        /// The offending token.
        token: String,
    },
}

/// One plotted window observation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowPoint {
    /// 1-based ordinal of the window in genome order; the x-coordinate.
    pub x: usize,

    /// The window's normalized depth ratio; the y-coordinate.
    pub y: f64,

    /// Fixed marker color, [`WINDOW_BLUE`] or [`WINDOW_RED`].
    pub color: &'static str,

    /// Display name of the window, `chr<label>_<start>_<end>`.
    pub name: String,
}

/// Parses the raw content of a window plot file into genome-ordered
/// points.
pub fn parse(content: &str) -> Result<Vec<WindowPoint>, ParseError> {
    let pattern = Regex::new(r"chr(\S+)").unwrap();

    let mut autosomes: BTreeMap<(u32, u64, u64), f64> = BTreeMap::new();
    let mut sex_chromosomes: BTreeMap<(&str, u64, u64), f64> = BTreeMap::new();

    for (index, line) in content.lines().enumerate() {
        let number = index + 1;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        } else if fields.len() < 4 {
            return Err(ParseError::TooFewFields {
                line: number,
                found: fields.len(),
            });
        }

        let label = pattern
            .captures(fields[0])
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| ParseError::InvalidChromosome {
                line: number,
                token: fields[0].to_string(),
            })?
            .as_str();

        let start = parse_number::<u64>(fields[1], "window start", number)?;
        let end = parse_number::<u64>(fields[2], "window end", number)?;
        let ratio = parse_number::<f64>(fields[3], "depth ratio", number)?;

        match label {
            "X" => sex_chromosomes.insert(("X", start, end), ratio),
            "Y" => sex_chromosomes.insert(("Y", start, end), ratio),
            _ => {
                let chromosome: u32 =
                    label
                        .parse()
                        .map_err(|_| ParseError::InvalidChromosome {
                            line: number,
                            token: fields[0].to_string(),
                        })?;
                autosomes.insert((chromosome, start, end), ratio)
            }
        };
    }

    let mut points = Vec::with_capacity(autosomes.len() + sex_chromosomes.len());

    for ((chromosome, start, end), ratio) in autosomes {
        let color = if chromosome % 2 == 0 {
            WINDOW_BLUE
        } else {
            WINDOW_RED
        };

        points.push(WindowPoint {
            x: points.len() + 1,
            y: ratio,
            color,
            name: format!("chr{}_{}_{}", chromosome, start, end),
        });
    }

    for ((label, start, end), ratio) in sex_chromosomes {
        let color = if label == "X" { WINDOW_RED } else { WINDOW_BLUE };

        points.push(WindowPoint {
            x: points.len() + 1,
            y: ratio,
            color,
            name: format!("chr{}_{}_{}", label, start, end),
        });
    }

    Ok(points)
}

fn parse_number<T: std::str::FromStr>(
    token: &str,
    field: &'static str,
    line: usize,
) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        token: token.to_string(),
    })
}
