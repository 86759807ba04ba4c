//! Interactive reset utility for the classroom database.

use anyhow::Result;
use std::process::ExitCode;

use classdb_tools::{config, reset};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = config::load_reset_config()?;
    reset::run_app(&config).await
}
