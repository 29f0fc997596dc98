use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

use meeting_assist::pipeline::MeetingProcessor;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the response JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let processor = MeetingProcessor::from_env().context("invalid configuration")?;

    // Request JSON from a file argument, or stdin when absent or "-".
    let response = match std::env::args().nth(1).filter(|arg| arg != "-") {
        Some(path) => {
            let path = PathBuf::from(path);
            processor
                .process_path(&path)
                .with_context(|| format!("failed to process request from {}", path.display()))?
        }
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read request from stdin")?;
            processor
                .process_json(&json)
                .context("failed to process request from stdin")?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
