use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::manifest::{self, BenchmarkResults, EntrySpec, OutputValue};
use crate::progress::CliProgressHandler;
use mdbench::progress::{Progress, ProgressReporter};
use mdbench::protocol::settings::{self, ComputePlatform, MdProtocolSettings};
use mdbench::workflows::benchmark::{self, BenchmarkInputs};
use std::path::Path;
use tracing::{info, warn};

/// The benchmark profile, with the CLI's engine and platform overrides
/// applied on top.
fn resolve_settings(cli: &Cli) -> Result<MdProtocolSettings> {
    let mut settings = settings::benchmark_settings();

    if let Some(engine) = &cli.engine {
        settings.engine.executable = engine.clone();
    }
    if let Some(platform) = &cli.platform {
        settings.engine.compute_platform = platform
            .parse::<ComputePlatform>()
            .map_err(CliError::Argument)?;
    }

    Ok(settings)
}

/// Resolves one manifest entry's file references against the manifest's own
/// directory.
fn inputs_for(data_dir: &Path, spec: &EntrySpec) -> BenchmarkInputs {
    BenchmarkInputs {
        protein: data_dir.join(&spec.protein),
        edge: Some(data_dir.join(&spec.edge)),
        cofactors: spec.cofactors.as_ref().map(|path| data_dir.join(path)),
    }
}

/// Runs the whole benchmark batch: every manifest entry in name order, each
/// reduced to one output value.
///
/// Entries whose simulation fails are recorded with the failure sentinel and
/// the batch continues; unreadable input files abort the batch.
pub fn run(cli: &Cli) -> Result<()> {
    let manifest = manifest::load_manifest(&cli.input_file)?;
    let data_dir = cli.input_file.parent().unwrap_or_else(|| Path::new("."));
    let settings = resolve_settings(cli)?;

    info!(
        entries = manifest.len(),
        engine = %settings.engine.executable.display(),
        platform = %settings.engine.compute_platform,
        "Starting benchmark batch"
    );

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    reporter.report(Progress::BatchStart {
        total: manifest.len() as u64,
    });

    let mut results = BenchmarkResults::new();
    for (name, spec) in &manifest {
        reporter.report(Progress::EntryStart { name: name.clone() });

        let inputs = inputs_for(data_dir, spec);
        let performance = benchmark::run_entry(&inputs, &settings, &reporter)?;
        if performance == benchmark::Performance::Failed {
            warn!(entry = %name, "Entry failed; recording sentinel");
        }
        results.insert(name.clone(), OutputValue::from(performance));

        reporter.report(Progress::EntryFinish);
    }
    handler.finish();

    manifest::write_results(&cli.output_file, &results)?;
    info!(path = %cli.output_file.display(), "Wrote benchmark results");

    Ok(())
}
