use clap::Args;

use crate::sync::{config::Config, error::Error, event_log::read_tail};

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Number of most recent events to print.
    #[arg(long, default_value_t = 200)]
    pub limit: usize,
}

/// Prints the tail of the event log, one JSON object per line.
pub async fn run(args: LogsArgs) -> Result<(), Error> {
    let config = Config::from_env()?;

    for event in read_tail(&config.sync_log_path, args.limit)? {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Failed to encode event: {}", e),
        }
    }

    Ok(())
}
