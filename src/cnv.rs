//! Aggregation of per-sample CNV log files into report sections.
//!
//! [`CnvModule`] is the orchestrating piece: it asks the host's
//! [`LogSearch`] collaborator for the files of each category, runs the
//! matching parser over every file, and shapes the surviving records into
//! the declarative payloads of [`ModuleOutput`]. Parse failures are
//! contained to the file they occur in. Only a run that finds no stat and
//! no report data at all ends early, with the designed [`NoDataFound`]
//! skip signal rather than an error the host would surface.

use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::search::Category;
use crate::search::LogSearch;

use self::parse::report::SampleReport;
use self::parse::stat::SampleStat;
use self::parse::winplot;
use self::parse::winplot::WindowPoint;
use self::sections::GeneralStats;
use self::sections::PlotSection;
use self::sections::TableSection;

pub mod command;
pub mod parse;
pub mod sections;

/// The skip signal raised when no stat or report data was found. The host
/// is expected to silently omit this module from the report.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("no relevant CNV data was found")]
pub struct NoDataFound;

/// Provenance record for one consumed input file.
#[derive(Clone, Debug, Serialize)]
pub struct DataSource {
    /// The sample the file belongs to.
    pub sample_name: String,

    /// The category the file was discovered under.
    pub category: Category,

    /// Where the file was found.
    pub path: PathBuf,
}

/// All data parsed during one aggregation pass, keyed by sample name.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CnvDataStore {
    /// Summary statistics per sample.
    pub stat: IndexMap<String, SampleStat>,

    /// Free-form reports per sample.
    pub report: IndexMap<String, SampleReport>,

    /// Genome-ordered window points per sample.
    pub winplot: IndexMap<String, Vec<WindowPoint>>,
}

/// Everything this module contributes to a report.
#[derive(Clone, Debug, Serialize)]
pub struct ModuleOutput {
    /// Columns and rows added to the host's general statistics table.
    pub general_stats: GeneralStats,

    /// The report table section, present when any report file parsed.
    pub report_section: Option<TableSection>,

    /// One scatter plot section per winplot sample.
    pub plot_sections: Vec<PlotSection>,

    /// Provenance of every consumed input file.
    pub data_sources: Vec<DataSource>,
}

impl ModuleOutput {
    /// Attempts to write the [`ModuleOutput`] payload as pretty-printed
    /// JSON within the specified directory.
    pub fn write(&self, output_prefix: &str, directory: &Path) -> Result<(), io::Error> {
        let filename = format!("{}.cnv.json", output_prefix);
        let mut filepath = PathBuf::from(directory);
        filepath.push(filename);

        let mut file = File::create(filepath)?;
        let output = serde_json::to_string_pretty(&self).unwrap();
        file.write_all(output.as_bytes())?;

        Ok(())
    }
}

/// Aggregates per-sample CNV log files into the sections of a report.
pub struct CnvModule<'a> {
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> CnvModule<'a> {
    /// Creates a module that reports its progress to the given sink.
    pub fn new(diagnostics: &'a dyn Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Runs one discovery-and-parse pass over all three categories and
    /// builds the module's report sections.
    pub fn run(&self, search: &dyn LogSearch) -> Result<ModuleOutput, NoDataFound> {
        let mut data = CnvDataStore::default();
        let mut data_sources = Vec::new();

        // (1) Find and parse the stat files. These come first so their
        // `*SD` values are available when the report files are parsed.
        for file in search.find_log_files(Category::Stat) {
            let parsed = match SampleStat::parse(&file.contents) {
                Ok(parsed) => parsed,
                Err(err) => {
                    self.diagnostics.warning(&format!(
                        "Skipping malformed stat file {}: {}",
                        file.path.display(),
                        err
                    ));
                    continue;
                }
            };

            if data.stat.contains_key(&file.sample_name) {
                self.diagnostics.debug(&format!(
                    "Duplicate stat sample log found! Overwriting: {}",
                    file.sample_name
                ));
            }

            data_sources.push(DataSource {
                sample_name: file.sample_name.clone(),
                category: Category::Stat,
                path: file.path,
            });
            data.stat.insert(file.sample_name, parsed);
        }

        // (2) Find and parse the report files, joining in each sample's
        // standard deviation where a stat record provided one.
        for file in search.find_log_files(Category::Report) {
            let sd = data.stat.get(&file.sample_name).and_then(SampleStat::sd);
            let parsed = SampleReport::parse(&file.contents, sd);

            if data.report.contains_key(&file.sample_name) {
                self.diagnostics.debug(&format!(
                    "Duplicate report sample log found! Overwriting: {}",
                    file.sample_name
                ));
            }

            data_sources.push(DataSource {
                sample_name: file.sample_name.clone(),
                category: Category::Report,
                path: file.path,
            });
            data.report.insert(file.sample_name, parsed);
        }

        // (3) Find and parse the window plot files.
        for file in search.find_log_files(Category::Winplot) {
            let parsed = match winplot::parse(&file.contents) {
                Ok(parsed) => parsed,
                Err(err) => {
                    self.diagnostics.warning(&format!(
                        "Skipping malformed winplot file {}: {}",
                        file.path.display(),
                        err
                    ));
                    continue;
                }
            };

            if data.winplot.contains_key(&file.sample_name) {
                self.diagnostics.debug(&format!(
                    "Duplicate winplot sample log found! Overwriting: {}",
                    file.sample_name
                ));
            }

            data_sources.push(DataSource {
                sample_name: file.sample_name.clone(),
                category: Category::Winplot,
                path: file.path,
            });
            data.winplot.insert(file.sample_name, parsed);
        }

        // (4) A module with no stat and no report data contributes
        // nothing; tell the host to skip it.
        if data.stat.len() + data.report.len() == 0 {
            return Err(NoDataFound);
        }

        if !data.report.is_empty() {
            self.diagnostics
                .info(&format!("Found {} CNV reports", data.report.len()));
        }

        if !data.winplot.is_empty() {
            self.diagnostics
                .info(&format!("Found {} CNV window plots", data.winplot.len()));
        }

        // (5) Shape the parsed data into the section payloads.
        let general_stats = sections::general_stats(&data.stat);

        let report_section = if data.report.is_empty() {
            None
        } else {
            Some(sections::report_table(&data.report))
        };

        let plot_sections = data
            .winplot
            .iter()
            .map(|(sample_name, points)| sections::winplot_section(sample_name, points.clone()))
            .collect();

        Ok(ModuleOutput {
            general_stats,
            report_section,
            plot_sections,
            data_sources,
        })
    }
}
