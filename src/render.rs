//! Reference renderers for the section payloads.
//!
//! A full report host brings its own table and scatter plot renderers;
//! these exist so the `cnv-report` binary can act as a minimal host. The
//! table renderers print through `prettytable` and the scatter renderer
//! builds a `plotly` plot that the command writes out as HTML.

use indexmap::IndexMap;
use num_format::Locale;
use num_format::ToFormattedString;
use plotly::common::color::Rgb;
use plotly::common::Line;
use plotly::common::Marker;
use plotly::common::Mode;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Scatter;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::cnv::parse::winplot::WindowPoint;
use crate::cnv::sections::ColumnSpec;
use crate::cnv::sections::GeneralStats;
use crate::cnv::sections::NumberFormat;
use crate::cnv::sections::PlotSection;
use crate::cnv::sections::TableSection;

//========//
// Tables //
//========//

/// Renders the general statistics columns and rows as a table.
pub fn stat_table(section: &GeneralStats) -> Table {
    build_table(&section.columns, &section.rows)
}

/// Renders a standalone table section.
pub fn report_table(section: &TableSection) -> Table {
    build_table(&section.columns, &section.rows)
}

fn build_table(
    columns: &IndexMap<&'static str, ColumnSpec>,
    rows: &IndexMap<String, IndexMap<String, String>>,
) -> Table {
    let mut table = Table::new();

    let mut header = vec![Cell::new("Sample")];
    for spec in columns.values() {
        header.push(Cell::new(spec.title));
    }
    table.add_row(Row::new(header));

    for (sample_name, row) in rows {
        let mut cells = vec![Cell::new(sample_name)];

        for (name, spec) in columns {
            let value = row
                .get(*name)
                .map(|raw| format_value(raw, spec.format))
                .unwrap_or_default();
            cells.push(Cell::new(&value));
        }

        table.add_row(Row::new(cells));
    }

    table
}

/// Applies a column's formatting hint to a raw value. Values that do not
/// parse as numbers pass through untouched.
fn format_value(raw: &str, format: Option<NumberFormat>) -> String {
    match format {
        Some(NumberFormat::Integer) => match raw.parse::<f64>() {
            Ok(value) => (value.round() as i64).to_formatted_string(&Locale::en),
            Err(_) => raw.to_string(),
        },
        Some(NumberFormat::Decimal(places)) => match raw.parse::<f64>() {
            Ok(value) => format!("{:.1$}", value, places),
            Err(_) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

//===============//
// Scatter plots //
//===============//

/// Generates the scatter plot for one per-sample plot section.
pub fn scatter_plot(section: &PlotSection) -> plotly::Plot {
    let mut plot = plotly::Plot::new();

    // (1) Group the points by color class. One trace per class keeps each
    // trace's marker color uniform while preserving every point's
    // x-coordinate.
    for (color, (x, y, text)) in group_by_color(&section.points) {
        let trace = Scatter::new(x, y)
            .mode(Mode::Markers)
            .text_array(text)
            .marker(
                Marker::new()
                    .size(section.config.marker_size)
                    .line(Line::new().width(section.config.marker_line_width as f64))
                    .color(marker_color(color)),
            );

        plot.add_trace(trace);
    }

    // (2) Configure the graph for plotting and return.
    let layout = Layout::new()
        .title(Title::new(&section.config.title))
        .show_legend(false)
        .x_axis(Axis::new().title(Title::new("Window")).auto_range(true))
        .y_axis(
            Axis::new()
                .title(Title::new("Depth ratio"))
                .range(vec![section.config.ymin, section.config.ymax]),
        );

    plot.set_layout(layout);

    plot
}

type ColorGroups = IndexMap<&'static str, (Vec<usize>, Vec<f64>, Vec<String>)>;

fn group_by_color(points: &[WindowPoint]) -> ColorGroups {
    let mut groups = ColorGroups::new();

    for point in points {
        let (x, y, text) = groups.entry(point.color).or_default();
        x.push(point.x);
        y.push(point.y);
        text.push(point.name.clone());
    }

    groups
}

/// Converts a `#RRGGBB` string into a plotly color.
fn marker_color(hex: &str) -> Rgb {
    let mut channels = [0u8; 3];

    for (i, channel) in channels.iter_mut().enumerate() {
        let offset = 1 + i * 2;
        *channel = hex
            .get(offset..offset + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0);
    }

    Rgb::new(channels[0], channels[1], channels[2])
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cnv::parse::winplot;
    use crate::cnv::sections::winplot_section;

    #[test]
    pub fn test_integer_formatting_groups_thousands() {
        assert_eq!(
            format_value("8123456", Some(NumberFormat::Integer)),
            "8,123,456"
        );
    }

    #[test]
    pub fn test_decimal_formatting_fixes_places() {
        assert_eq!(
            format_value("0.1573", Some(NumberFormat::Decimal(4))),
            "0.1573"
        );
        assert_eq!(format_value("0.5", Some(NumberFormat::Decimal(4))), "0.5000");
    }

    #[test]
    pub fn test_unparseable_values_pass_through() {
        assert_eq!(format_value("n/a", Some(NumberFormat::Integer)), "n/a");
        assert_eq!(format_value("n/a", None), "n/a");
    }

    #[test]
    pub fn test_points_group_into_one_trace_per_color() {
        let points = winplot::parse("chr1 0 10 1.0\nchr2 0 10 1.0\nchr3 0 10 1.0\n").unwrap();
        let groups = group_by_color(&points);

        assert_eq!(groups.len(), 2);
        let (x, _, text) = &groups[winplot::WINDOW_RED];
        assert_eq!(x, &[1, 3]);
        assert_eq!(text, &["chr1_0_10", "chr3_0_10"]);
    }

    #[test]
    pub fn test_scatter_plot_builds_from_a_section() {
        let points = winplot::parse("chr1 0 10 1.0\nchrX 0 10 1.2\n").unwrap();
        let section = winplot_section("sampleA", points);

        // Construction is the contract here; writing is the command's job.
        let _plot = scatter_plot(&section);
    }

    #[test]
    pub fn test_tables_render_missing_cells_as_empty() {
        let mut stats = IndexMap::new();
        stats.insert(
            String::from("sampleA"),
            crate::cnv::parse::stat::SampleStat::parse("banner\nTotal_Reads\n8123456\n").unwrap(),
        );

        let section = crate::cnv::sections::general_stats(&stats);
        let table = stat_table(&section);

        // Header plus one sample row.
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("8,123,456"));
        assert!(rendered.contains("% MT"));
    }
}
