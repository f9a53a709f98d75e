//! Projection of parsed CNV data into the declarative section payloads
//! consumed by the report host.
//!
//! Nothing here renders anything. The host owns the table and scatter
//! plot renderers; this module only fixes the column specifications, the
//! plot configuration, and the row/point data those renderers receive.

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use super::parse::report::SampleReport;
use super::parse::stat;
use super::parse::stat::SampleStat;
use super::parse::winplot::WindowPoint;

//======================//
// Column specification //
//======================//

/// Numeric formatting hint for a table column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum NumberFormat {
    /// Thousands-separated integer, e.g. `8,123,456`.
    Integer,

    /// Fixed-point with the given number of decimal places.
    Decimal(usize),
}

/// Specification of one table column handed to the host's table renderer.
#[derive(Clone, Debug, Serialize)]
pub struct ColumnSpec {
    /// Column title shown in the rendered table.
    pub title: &'static str,

    /// Free-text description of the column.
    pub description: &'static str,

    /// Name of the color scale the host shades the column with.
    pub scale: Option<&'static str>,

    /// Numeric formatting hint.
    pub format: Option<NumberFormat>,

    /// Lower clamp for the color scale.
    pub min: Option<f64>,

    /// Upper clamp for the color scale.
    pub max: Option<f64>,
}

//==========//
// Sections //
//==========//

/// The columns this module contributes to the host's general statistics
/// table, plus the per-sample values backing them.
#[derive(Clone, Debug, Serialize)]
pub struct GeneralStats {
    /// Ordered column specifications keyed by stat field name.
    pub columns: IndexMap<&'static str, ColumnSpec>,

    /// Per-sample rows: sample name to field name to raw value.
    pub rows: IndexMap<String, IndexMap<String, String>>,
}

/// A standalone table section of the report.
#[derive(Clone, Debug, Serialize)]
pub struct TableSection {
    /// Section name shown in the report.
    pub name: &'static str,

    /// Anchor for direct navigation to the section.
    pub anchor: &'static str,

    /// Ordered column specifications keyed by field name.
    pub columns: IndexMap<&'static str, ColumnSpec>,

    /// Per-sample rows: sample name to field name to value.
    pub rows: IndexMap<String, IndexMap<String, String>>,
}

/// Configuration for one per-sample scatter plot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterConfig {
    /// Plot title.
    pub title: String,

    /// Lower bound of the y-axis.
    pub ymin: f64,

    /// Upper bound of the y-axis.
    pub ymax: f64,

    /// Marker size in pixels.
    pub marker_size: usize,

    /// Width of the line drawn around each marker.
    pub marker_line_width: usize,
}

/// A per-sample scatter plot section of the report.
#[derive(Clone, Debug, Serialize)]
pub struct PlotSection {
    /// Section name: the sample name.
    pub name: String,

    /// Anchor for direct navigation, `wp<sample>`.
    pub anchor: String,

    /// Plot configuration handed to the host's scatter renderer.
    pub config: ScatterConfig,

    /// The genome-ordered points to plot.
    pub points: Vec<WindowPoint>,
}

//==========//
// Builders //
//==========//

/// Builds the general statistics augmentation from the parsed stat
/// records. Samples are emitted in sorted order so reruns produce
/// identical payloads.
pub fn general_stats(stats: &IndexMap<String, SampleStat>) -> GeneralStats {
    let mut rows = IndexMap::with_capacity(stats.len());
    for sample_name in stats.keys().sorted() {
        let stat = &stats[sample_name];
        rows.insert(sample_name.clone(), stat.fields().clone());
    }

    GeneralStats {
        columns: stat_columns(),
        rows,
    }
}

/// Builds the report table section from the parsed report records.
pub fn report_table(reports: &IndexMap<String, SampleReport>) -> TableSection {
    let mut rows = IndexMap::with_capacity(reports.len());
    for sample_name in reports.keys().sorted() {
        let report = &reports[sample_name];

        let mut row = IndexMap::with_capacity(2);
        row.insert(String::from("report"), report.report.clone());
        if let Some(sd) = report.sd {
            row.insert(String::from("sd"), sd.to_string());
        }

        rows.insert(sample_name.clone(), row);
    }

    TableSection {
        name: "report",
        anchor: "cnv-report",
        columns: report_columns(),
        rows,
    }
}

/// Builds the scatter plot section for one sample.
pub fn winplot_section(sample_name: &str, points: Vec<WindowPoint>) -> PlotSection {
    PlotSection {
        name: sample_name.to_string(),
        anchor: format!("wp{}", sample_name),
        config: ScatterConfig {
            title: sample_name.to_string(),
            ymin: 0.0,
            ymax: 40.0,
            marker_size: 2,
            marker_line_width: 0,
        },
        points,
    }
}

fn stat_columns() -> IndexMap<&'static str, ColumnSpec> {
    let mut columns = IndexMap::new();

    columns.insert(
        stat::TOTAL_READS,
        ColumnSpec {
            title: "Total_Reads",
            description: "total reads",
            scale: Some("Greens"),
            format: Some(NumberFormat::Integer),
            min: None,
            max: None,
        },
    );

    columns.insert(
        stat::MT_RATIO,
        ColumnSpec {
            title: "% MT",
            description: "mt reads ratio",
            scale: Some("Greens"),
            format: Some(NumberFormat::Decimal(4)),
            min: Some(0.0),
            max: Some(0.5),
        },
    );

    columns.insert(
        stat::MAP_RATIO,
        ColumnSpec {
            title: "% Map_Reads",
            description: "mapping genome reads / total reads",
            scale: Some("RdYlGn"),
            format: None,
            min: Some(50.0),
            max: Some(100.0),
        },
    );

    columns.insert(
        stat::DUPLICATE,
        ColumnSpec {
            title: "% Duplicate",
            description: "duplicate reads / total reads",
            scale: Some("RdYlGn-rev"),
            format: None,
            min: Some(0.0),
            max: Some(30.0),
        },
    );

    columns.insert(
        stat::GC_COUNT,
        ColumnSpec {
            title: "% GC",
            description: "GC percent in total reads",
            scale: Some("RdYlGn-rev"),
            format: None,
            min: Some(30.0),
            max: Some(60.0),
        },
    );

    columns.insert(
        stat::SD,
        ColumnSpec {
            title: "SD",
            description: "average standard deviation of chromosome window RCids",
            scale: Some("RdYlGn-rev"),
            format: None,
            min: Some(0.0),
            max: Some(5.0),
        },
    );

    columns
}

fn report_columns() -> IndexMap<&'static str, ColumnSpec> {
    let mut columns = IndexMap::new();

    columns.insert(
        "report",
        ColumnSpec {
            title: "Report",
            description: "chromosome duplicates and deletions report",
            scale: None,
            format: None,
            min: None,
            max: None,
        },
    );

    columns.insert(
        "sd",
        ColumnSpec {
            title: "SD",
            description: "average standard deviation of chromosome window RCids",
            scale: Some("RdYlGn-rev"),
            format: None,
            min: Some(0.0),
            max: Some(5.0),
        },
    );

    columns
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    pub fn test_stat_columns_are_ordered_and_clamped() {
        let stats = IndexMap::new();
        let section = general_stats(&stats);

        let names: Vec<&&str> = section.columns.keys().collect();
        assert_eq!(
            names,
            [
                &stat::TOTAL_READS,
                &stat::MT_RATIO,
                &stat::MAP_RATIO,
                &stat::DUPLICATE,
                &stat::GC_COUNT,
                &stat::SD,
            ]
        );

        let sd = &section.columns[stat::SD];
        assert_eq!(sd.title, "SD");
        assert_eq!(sd.scale, Some("RdYlGn-rev"));
        assert_eq!(sd.min, Some(0.0));
        assert_eq!(sd.max, Some(5.0));
    }

    #[test]
    pub fn test_general_stats_rows_are_sorted_by_sample() {
        let mut stats = IndexMap::new();
        let stat = SampleStat::parse("banner\nTotal_Reads\n100\n").unwrap();
        stats.insert(String::from("zebra"), stat.clone());
        stats.insert(String::from("aardvark"), stat);

        let section = general_stats(&stats);
        let samples: Vec<&String> = section.rows.keys().collect();
        assert_eq!(samples, ["aardvark", "zebra"]);
    }

    #[test]
    pub fn test_report_rows_carry_the_joined_sd() {
        let mut reports = IndexMap::new();
        reports.insert(
            String::from("sampleA"),
            SampleReport::parse("all clear\n", Some(0.5)),
        );
        reports.insert(String::from("sampleB"), SampleReport::parse("", None));

        let section = report_table(&reports);
        assert_eq!(section.name, "report");
        assert_eq!(section.anchor, "cnv-report");
        assert_eq!(section.rows["sampleA"]["sd"], "0.5");
        assert_eq!(section.rows["sampleA"]["report"], "all clear\n");
        assert_eq!(section.rows["sampleB"].get("sd"), None);
    }

    #[test]
    pub fn test_winplot_section_config() {
        let section = winplot_section("sampleA", Vec::new());

        assert_eq!(section.anchor, "wpsampleA");
        assert_eq!(
            section.config,
            ScatterConfig {
                title: String::from("sampleA"),
                ymin: 0.0,
                ymax: 40.0,
                marker_size: 2,
                marker_line_width: 0,
            }
        );
    }
}
