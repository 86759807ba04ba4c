//! Loads GitHub usernames from a file into the classRoll table.

use anyhow::Result;
use std::env;
use std::process::ExitCode;

use classdb_tools::{config, enroll};

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
    let input_path = enroll::input_path_from_args(env::args())?;
    let config = config::load_enroll_config()?;
    enroll::run_app(&config, &input_path).await
}
