mod cli;
mod settings;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};

use duls::index::snapshot::SnapshotIndex;
use duls::render::Renderer;

fn main() -> ExitCode {
    env_logger::init();
    let cli = cli::parse_cli();

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("duls: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Execute one invocation and return how many targets were left unresolved.
fn run(cli: &cli::CliArgs) -> Result<usize> {
    let resolved = settings::load(cli)?;

    let index = SnapshotIndex::load(&resolved.database).with_context(|| {
        format!(
            "failed to open index snapshot '{}'",
            resolved.database.display()
        )
    })?;

    let stdout = io::stdout().lock();
    let mut renderer = Renderer::new(&index, resolved.options, stdout);
    let unresolved = renderer.run(&resolved.targets)?;
    Ok(unresolved)
}
