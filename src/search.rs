//! File discovery interface between the CNV module and the report host.
//!
//! The host framework owns discovery: the module only ever asks "give me
//! all files tagged with this category" and receives each file's content
//! together with the sample name it belongs to. [`LogSearch`] captures that
//! contract. [`FileListSearch`] is the implementation used by the
//! `cnv-report` binary, which takes explicit file lists on the command line
//! rather than re-implementing the host's search.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

//============//
// Categories //
//============//

/// The categories of per-sample CNV log files consumed by the module.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Category {
    /// The two-row summary statistics table.
    Stat,

    /// The free-form, human-readable CNV report.
    Report,

    /// The per-window depth ratio list backing the scatter plot.
    Winplot,
}

impl Category {
    /// The stable key under which the host tags files of this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Stat => "cnv/stat",
            Category::Report => "cnv/report",
            Category::Winplot => "cnv/winplot",
        }
    }
}

//=================//
// Discovered logs //
//=================//

/// One discovered per-sample log file.
#[derive(Clone, Debug)]
pub struct LogFile {
    /// The sample this file belongs to.
    pub sample_name: String,

    /// Where the file was found.
    pub path: PathBuf,

    /// The raw text content of the file.
    pub contents: String,
}

/// The discovery collaborator owned by the report host.
pub trait LogSearch {
    /// Returns all files tagged with the given category.
    fn find_log_files(&self, category: Category) -> Vec<LogFile>;
}

//==================//
// File list search //
//==================//

/// A [`LogSearch`] over explicit per-category path lists.
///
/// Files are read synchronously when a category is searched. Unreadable
/// paths are warned about and skipped so that one bad path does not take
/// down the whole report run.
#[derive(Clone, Debug, Default)]
pub struct FileListSearch {
    stat: Vec<PathBuf>,
    report: Vec<PathBuf>,
    winplot: Vec<PathBuf>,
}

impl FileListSearch {
    /// Creates a search over the given per-category path lists.
    pub fn new(stat: Vec<PathBuf>, report: Vec<PathBuf>, winplot: Vec<PathBuf>) -> Self {
        Self {
            stat,
            report,
            winplot,
        }
    }
}

impl LogSearch for FileListSearch {
    fn find_log_files(&self, category: Category) -> Vec<LogFile> {
        let paths = match category {
            Category::Stat => &self.stat,
            Category::Report => &self.report,
            Category::Winplot => &self.winplot,
        };

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = match fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(err) => {
                    warn!("Could not read {}: {}. Skipping...", path.display(), err);
                    continue;
                }
            };

            results.push(LogFile {
                sample_name: sample_name_from(path),
                path: path.clone(),
                contents,
            });
        }

        results
    }
}

/// Derives a sample name from a file path. The convention for these files
/// is `<sample>.<category suffixes>`, so everything up to the first `.` in
/// the file name is the sample.
pub fn sample_name_from(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some((sample, _)) = file_name.split_once('.') {
        return sample.to_string();
    }

    file_name
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    pub fn test_sample_name_from_strips_category_suffixes() {
        let path = PathBuf::from("/data/NA12878.cnv.stat.txt");
        assert_eq!(sample_name_from(&path), "NA12878");
    }

    #[test]
    pub fn test_sample_name_from_without_extension() {
        let path = PathBuf::from("results/sampleA");
        assert_eq!(sample_name_from(&path), "sampleA");
    }

    #[test]
    pub fn test_unreadable_paths_are_skipped() {
        let search = FileListSearch::new(
            vec![PathBuf::from("/definitely/does/not/exist.cnv.stat.txt")],
            Vec::new(),
            Vec::new(),
        );

        assert!(search.find_log_files(Category::Stat).is_empty());
        assert!(search.find_log_files(Category::Report).is_empty());
    }

    #[test]
    pub fn test_category_keys_are_stable() {
        assert_eq!(Category::Stat.key(), "cnv/stat");
        assert_eq!(Category::Report.key(), "cnv/report");
        assert_eq!(Category::Winplot.key(), "cnv/winplot");
    }
}
