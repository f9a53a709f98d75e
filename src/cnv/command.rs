//! Functionality related to the `cnv-report report` command itself.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;
use tracing::info;

use crate::cnv::CnvModule;
use crate::cnv::NoDataFound;
use crate::diagnostics::TracingSink;
use crate::render;
use crate::search::FileListSearch;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `cnv-report report` subcommand.
#[derive(Args)]
pub struct ReportArgs {
    /// CNV summary statistics files, one per sample.
    #[arg(short = 's', long = "stat", value_name = "PATH")]
    pub stat: Vec<PathBuf>,

    /// Free-form CNV report files, one per sample.
    #[arg(short = 'r', long = "report", value_name = "PATH")]
    pub report: Vec<PathBuf>,

    /// Per-window depth ratio files, one per sample.
    #[arg(short = 'w', long = "winplot", value_name = "PATH")]
    pub winplot: Vec<PathBuf>,

    /// Directory to output files to. Defaults to current working directory.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_directory: Option<PathBuf>,

    /// Output prefix for the JSON payload that will be created.
    #[arg(short = 'p', long, value_name = "STRING", default_value = "cnv")]
    pub output_prefix: String,
}

//==============//
// Main command //
//==============//

/// Main method for the `cnv-report report` subcommand.
pub fn report(args: ReportArgs) -> anyhow::Result<()> {
    info!("Starting report command...");

    //========//
    // Source //
    //========//

    let search = FileListSearch::new(args.stat, args.report, args.winplot);

    //==================//
    // Output Directory //
    //==================//

    let output_directory = if let Some(o) = args.output_directory {
        o
    } else {
        std::env::current_dir().context("could not retrieve the current working directory")?
    };
    debug!("  [*] Output directory: {}", output_directory.display());

    //=============//
    // Aggregation //
    //=============//

    let module = CnvModule::new(&TracingSink);
    let output = match module.run(&search) {
        Ok(output) => output,
        Err(NoDataFound) => {
            info!("No relevant CNV data was found. Nothing to report.");
            return Ok(());
        }
    };

    //===========//
    // Rendering //
    //===========//

    let table = render::stat_table(&output.general_stats);
    table.printstd();

    if let Some(section) = &output.report_section {
        let table = render::report_table(section);
        table.printstd();
    }

    for section in &output.plot_sections {
        let plot = render::scatter_plot(section);

        let mut filename = output_directory.clone();
        filename.push(format!("{}.winplot.html", section.name));

        info!("  [*] Writing {} to {}", section.name, filename.display());
        plot.write_html(filename);
    }

    output
        .write(&args.output_prefix, &output_directory)
        .with_context(|| {
            format!(
                "could not write the module payload to {}",
                output_directory.display()
            )
        })?;

    Ok(())
}
