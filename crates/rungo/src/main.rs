use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use rungo::cli::Launch;
use rungo::config::Settings;
use rungo::{Pipeline, logging};
use rungo_fetch::ReqwestClient;
use rungo_shim::exit_code;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("rungo: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let launch = match Launch::parse(env::args_os()) {
        Ok(launch) => launch,
        // --help and --version land here too.
        Err(err) => err.exit(),
    };
    let settings = Settings::from_cli(&launch.cli)?;
    logging::init(settings.verbose);

    let resolved = settings.resolve_version()?;
    debug!("using go {} from {}", resolved.request, resolved.source);

    let client = ReqwestClient::new()?;
    let pipeline = Pipeline::new(client, settings);
    let toolchain = pipeline
        .prepare(&resolved.request)
        .with_context(|| format!("failed to prepare go {}", resolved.request))?;

    if pipeline.settings().print_root {
        println!("{}", toolchain.layout()?.root().display());
        return Ok(ExitCode::SUCCESS);
    }

    let status = pipeline
        .invocation(&toolchain, launch.binary, launch.forwarded)?
        .run()?;
    // Exit statuses are truncated to 8 bits, as the OS does.
    Ok(ExitCode::from(exit_code(status) as u8))
}
