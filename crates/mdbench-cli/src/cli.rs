use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Open Molecular Benchmarks Developers",
    version,
    about = "mdbench - Benchmark molecular dynamics throughput (ns/day) across a set of protein-ligand systems via an external MD engine.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the benchmark input manifest (JSON).
    #[arg(long = "input_file", required = true, value_name = "PATH")]
    pub input_file: PathBuf,

    /// Path to the benchmark output file (JSON).
    #[arg(long = "output_file", default_value = "md_benchmark.out", value_name = "PATH")]
    pub output_file: PathBuf,

    /// Override the MD engine executable (a bare name is resolved via PATH).
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub engine: Option<PathBuf>,

    /// Override the compute platform (auto, cuda, opencl, cpu).
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
