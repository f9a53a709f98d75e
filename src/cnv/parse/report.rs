//! Parsing of the per-sample CNV report file.
//!
//! The report is free-form text describing called duplications and
//! deletions. It is carried verbatim. The sample's summary standard
//! deviation is joined in at parse time when the stat file for the same
//! sample has already been seen, so the report row is self-contained once
//! built.

use serde::Serialize;

/// The report for one sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleReport {
    /// The verbatim report text.
    pub report: String,

    /// The sample's `*SD` summary value, when its stat file provided one.
    pub sd: Option<f64>,
}

impl SampleReport {
    /// Wraps the raw content of a report file. Never fails; empty content
    /// is accepted.
    pub fn parse(content: &str, sd: Option<f64>) -> Self {
        Self {
            report: content.to_string(),
            sd,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    pub fn test_content_is_carried_verbatim() {
        let content = "chr21 duplication detected\nno deletions\n";
        let report = SampleReport::parse(content, Some(0.48));

        assert_eq!(report.report, content);
        assert_eq!(report.sd, Some(0.48));
    }

    #[test]
    pub fn test_empty_content_and_missing_sd_are_accepted() {
        let report = SampleReport::parse("", None);

        assert_eq!(report.report, "");
        assert_eq!(report.sd, None);
    }
}
