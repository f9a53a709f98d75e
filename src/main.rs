use clap::Parser;
use clap::Subcommand;

use cnv_report::cnv;

/// Command line arguments for `cnv-report`.
#[derive(Parser)]
#[command(version, about, propagate_version = true)]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    subcommand: Cmd,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed
    /// to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// All supported subcommands for `cnv-report`.
#[derive(Subcommand)]
enum Cmd {
    /// Aggregates per-sample CNV files and renders the report sections.
    Report(cnv::command::ReportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.subcommand {
        Cmd::Report(args) => cnv::command::report(args),
    }
}
