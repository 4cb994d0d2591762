//! Colocation job runner.
//!
//! Loads a job file, layers its settings over the environment
//! configuration, runs the colocation and produces a [`ColocationReport`].

pub mod job;
pub mod report;

pub use job::{load_job, AxisSpec, ColocationOverrides, GridSpec, JobFile};
pub use report::ColocationReport;

use anyhow::{Context, Result};
use colocation::{ColocationConfig, UngriddedGriddedColocator};
use tracing::info;

/// Run a loaded job with the given configuration.
pub fn run_job(job: &JobFile, config: &ColocationConfig) -> Result<ColocationReport> {
    config.validate()?;

    let grid = job.grid.build().context("Invalid destination grid")?;
    let constraint = config.build_constraint();
    let kernel = config.build_kernel();

    info!(
        shape = ?grid.shape(),
        points = job.data.len(),
        constraint = %config.constraint,
        kernel = %config.kernel,
        parallel = config.parallel,
        "Running colocation"
    );

    let outputs = UngriddedGriddedColocator::from_config(config).colocate(
        &grid,
        &job.data,
        constraint.as_ref(),
        kernel.as_ref(),
    )?;
    let output = outputs
        .first()
        .context("Colocation produced no output grid")?;

    let report = ColocationReport::new(config, output);
    info!(
        populated_cells = report.populated_cells,
        total_cells = output.len(),
        "Colocation finished"
    );
    Ok(report)
}

/// Resolve the effective configuration: environment, then the job file,
/// then command-line overrides.
pub fn resolve_config(job: &JobFile, cli: &ColocationOverrides) -> ColocationConfig {
    layer_config(ColocationConfig::from_env(), job, cli)
}

/// Apply the job file's settings and then `cli` on top of `base`.
pub fn layer_config(
    mut base: ColocationConfig,
    job: &JobFile,
    cli: &ColocationOverrides,
) -> ColocationConfig {
    job.colocation.apply(&mut base);
    cli.apply(&mut base);
    base
}
