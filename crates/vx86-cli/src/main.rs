#![forbid(unsafe_code)]

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use vx86_cli::{repl, Args, ExitReason, Session};

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let reason = runtime.block_on(run(args));

    // Stdin is read on a blocking thread that cannot be cancelled; dropping the runtime normally
    // would wait for the pending read, so a Ctrl-C exit would hang until the next line.
    runtime.shutdown_background();

    Ok(ExitCode::from(reason?.exit_code()))
}

async fn run(args: Args) -> Result<ExitReason> {
    let opts = args.repl_options();
    let mut session = Session::new(args.radix);

    let mut out = io::stdout().lock();
    let mut diag = io::stderr().lock();

    let reason = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script: {}", path.display()))?;
            repl::run(&mut session, BufReader::new(file), &mut out, &mut diag, opts).await
        }
        None => {
            repl::run(
                &mut session,
                BufReader::new(tokio::io::stdin()),
                &mut out,
                &mut diag,
                opts,
            )
            .await
        }
    }
    .context("interactive loop failed")?;

    tracing::debug!(?reason, instructions = session.listing().len(), "session ended");
    Ok(reason)
}
