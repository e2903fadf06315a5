mod cli;
mod config;
mod logging;
mod transport;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config decides the log filter, so it is read before logging starts.
    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("xhr error: {:#}", err);
            std::process::exit(1);
        }
    };
    logging::init_logging(cfg.log_filter());

    if let Err(err) = cli.run(cfg).await {
        eprintln!("xhr error: {:#}", err);
        std::process::exit(1);
    }
}
