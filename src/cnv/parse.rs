//! Parsers for the three per-sample CNV file formats.
//!
//! Each parser takes the raw text content of one file and produces an
//! immutable record. Parse failures are typed per file: the aggregator
//! warns and skips the offending file rather than aborting the run.

pub mod report;
pub mod stat;
pub mod winplot;
