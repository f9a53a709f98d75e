//! Parsing of the per-sample CNV summary statistics file.
//!
//! The file is a small whitespace-delimited table: the second line holds
//! the field names and the third line holds the matching values. The first
//! line is a free-form banner that is ignored. No schema is enforced
//! beyond matching token counts, so fields the pipeline adds later survive
//! parsing; the six well-known fields get typed accessors.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Field name for the total read count.
pub const TOTAL_READS: &str = "Total_Reads";

/// Field name for the mitochondrial read percentage.
pub const MT_RATIO: &str = "MT_ratio(%)";

/// Field name for the genome mapping percentage.
pub const MAP_RATIO: &str = "Map_Ratio(%)";

/// Field name for the duplicate read percentage.
pub const DUPLICATE: &str = "Duplicate(%)";

/// Field name for the GC percentage.
pub const GC_COUNT: &str = "GC_Count(%)";

/// Field name for the average standard deviation of window depth ratios.
pub const SD: &str = "*SD";

/// An error encountered while parsing a stat file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The file does not contain the banner, name, and value lines.
    #[error("expected at least 3 lines, found {found}")]
    TooFewLines {
        /// Number of lines actually present.
        found: usize,
    },

    /// The name and value lines hold different numbers of tokens.
    #[error("field name and value counts differ: {names} names, {values} values")]
    FieldCountMismatch {
        /// Number of field name tokens.
        names: usize,
        /// Number of value tokens.
        values: usize,
    },
}

/// The parsed summary statistics for one sample.
///
/// Field order follows the file so that downstream tables render columns
/// in a stable order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct SampleStat {
    fields: IndexMap<String, String>,
}

impl SampleStat {
    /// Parses the raw content of a stat file.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < 3 {
            return Err(ParseError::TooFewLines { found: lines.len() });
        }

        let names: Vec<&str> = lines[1].split_whitespace().collect();
        let values: Vec<&str> = lines[2].split_whitespace().collect();
        if names.len() != values.len() {
            return Err(ParseError::FieldCountMismatch {
                names: names.len(),
                values: values.len(),
            });
        }

        let mut fields = IndexMap::with_capacity(names.len());
        for (name, value) in names.into_iter().zip(values) {
            fields.insert(name.to_string(), value.to_string());
        }

        Ok(Self { fields })
    }

    /// Returns the raw value stored under the given field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All parsed fields in file order.
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// The total number of reads for the sample.
    pub fn total_reads(&self) -> Option<u64> {
        self.get(TOTAL_READS).and_then(|value| value.parse().ok())
    }

    /// The percentage of reads mapping to the mitochondrial genome.
    pub fn mt_ratio(&self) -> Option<f64> {
        self.number(MT_RATIO)
    }

    /// The percentage of reads mapping to the reference genome.
    pub fn map_ratio(&self) -> Option<f64> {
        self.number(MAP_RATIO)
    }

    /// The percentage of reads marked as duplicate.
    pub fn duplicate_pct(&self) -> Option<f64> {
        self.number(DUPLICATE)
    }

    /// The GC percentage across all reads.
    pub fn gc_count(&self) -> Option<f64> {
        self.number(GC_COUNT)
    }

    /// The average standard deviation of the per-window depth ratios.
    pub fn sd(&self) -> Option<f64> {
        self.number(SD)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|value| value.parse().ok())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    static CONTENT: &str = "sampleA CNV summary\n\
        Total_Reads MT_ratio(%) Map_Ratio(%) Duplicate(%) GC_Count(%) *SD\n\
        8123456 0.1573 98.62 7.31 41.52 0.48\n";

    #[test]
    pub fn test_well_formed_stat_file() {
        let stat = SampleStat::parse(CONTENT).unwrap();

        assert_eq!(stat.fields().len(), 6);
        assert_eq!(stat.get(TOTAL_READS), Some("8123456"));
        assert_eq!(stat.total_reads(), Some(8123456));
        assert_eq!(stat.mt_ratio(), Some(0.1573));
        assert_eq!(stat.map_ratio(), Some(98.62));
        assert_eq!(stat.duplicate_pct(), Some(7.31));
        assert_eq!(stat.gc_count(), Some(41.52));
        assert_eq!(stat.sd(), Some(0.48));
    }

    #[test]
    pub fn test_field_order_is_preserved() {
        let stat = SampleStat::parse(CONTENT).unwrap();
        let names: Vec<&String> = stat.fields().keys().collect();
        assert_eq!(
            names,
            [TOTAL_READS, MT_RATIO, MAP_RATIO, DUPLICATE, GC_COUNT, SD]
        );
    }

    #[test]
    pub fn test_unknown_fields_are_retained() {
        let content = "banner\nTotal_Reads Novel_Field\n100 4.2\n";
        let stat = SampleStat::parse(content).unwrap();

        assert_eq!(stat.total_reads(), Some(100));
        assert_eq!(stat.get("Novel_Field"), Some("4.2"));
    }

    #[test]
    pub fn test_too_few_lines() {
        let err = SampleStat::parse("only\ntwo lines\n").unwrap_err();
        assert_eq!(err, ParseError::TooFewLines { found: 2 });
    }

    #[test]
    pub fn test_field_count_mismatch() {
        let content = "banner\nTotal_Reads *SD\n100\n";
        let err = SampleStat::parse(content).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCountMismatch {
                names: 2,
                values: 1
            }
        );
    }

    #[test]
    pub fn test_missing_fields_read_as_none() {
        let content = "banner\nTotal_Reads\n100\n";
        let stat = SampleStat::parse(content).unwrap();

        assert_eq!(stat.total_reads(), Some(100));
        assert_eq!(stat.sd(), None);
        assert_eq!(stat.get(SD), None);
    }
}
