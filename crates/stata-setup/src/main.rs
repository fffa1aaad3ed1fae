//! Setup CLI entry point.
//!
//! Provisions the current checkout: checks prerequisites, installs the
//! Poetry dependency set, finds Stata, registers the nbstata kernel, and
//! writes the editor/server/launcher artifacts.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stata-setup")]
#[command(about = "Provision the Jupyter + Stata course environment")]
struct Args {
    /// Project directory to provision (default: current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let root = args.dir.unwrap_or_else(|| PathBuf::from("."));

    if let Err(err) = stata_setup::run_setup(&root).await {
        log::debug!("setup aborted: {}", err);
        println!("\n⚠️  Setup incomplete. Please check the errors above.");
        std::process::exit(1);
    }
}
