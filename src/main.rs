use std::fs;

use anyhow::Context;
use hwpx_batch::cli::Cli;
use hwpx_batch::logging::init_tracing;
use hwpx_batch::{run_batch, ProcessConverter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = cli.load_config().context("failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format)?;

    let converter = ProcessConverter::new(&config.converter)?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    tracing::info!(
        converter = %converter.program().display(),
        output_dir = %config.output_dir.display(),
        inputs = cli.inputs.len(),
        "run_start"
    );

    // Record and input failures are reported through the summary, not the exit code.
    let summary = run_batch(&cli.inputs, &converter, &config.batch_options());
    for report in &summary.reports {
        println!(
            "{}: {}/{} converted into {}",
            report.input.display(),
            report.converted(),
            report.selected(),
            report.target_dir.display()
        );
    }
    for skipped in &summary.skipped {
        println!("{}: skipped ({skipped})", skipped.path().display());
    }

    Ok(())
}
