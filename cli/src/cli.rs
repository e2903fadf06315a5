use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use xhr_core::{DisplaySink, InputAdapter, InputEvent, ENTER_KEY_CODE};

use crate::config::XhrConfig;
use crate::transport::UreqTransport;

/// Top-level CLI for the xhr request helper.
#[derive(Debug, Parser)]
#[command(name = "xhr")]
#[command(
    about = "Issue one HTTP request per `method*url*payload` line and print the outcome",
    long_about = None
)]
pub struct Cli {
    /// Origin that relative and missing URLs resolve against.
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Optional TOML config file (`origin`, `log_filter`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit a single line, e.g. `get*/comments/12` or `query*/search*{"q":"x"}`.
    Send {
        /// The command line to submit.
        input: String,
    },

    /// Read lines from stdin; every line is submitted as if Enter was pressed.
    Repl,
}

impl Cli {
    /// File config (if any) with command-line flags applied on top.
    pub fn load_config(&self) -> Result<XhrConfig> {
        let cfg = match &self.config {
            Some(path) => XhrConfig::load(path)?,
            None => XhrConfig::default(),
        };
        Ok(cfg.merge_origin(self.origin.clone()))
    }

    pub async fn run(self, cfg: XhrConfig) -> Result<()> {
        tracing::debug!("loaded config: {:?}", cfg);
        let transport = UreqTransport::new(cfg.origin_url()?);
        let adapter = Arc::new(InputAdapter::new(transport, StdoutSink));

        match self.command.unwrap_or(CliCommand::Repl) {
            CliCommand::Send { input } => {
                adapter
                    .handle_event(InputEvent::KeyUp(ENTER_KEY_CODE), &input)
                    .await?;
            }
            CliCommand::Repl => repl(adapter).await?,
        }
        Ok(())
    }
}

/// Dispatch each stdin line on its own task. Outcomes print in completion
/// order; a line that fails to parse is reported on stderr.
async fn repl(adapter: Arc<InputAdapter<UreqTransport, StdoutSink>>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let adapter = Arc::clone(&adapter);
        in_flight.spawn(async move {
            if let Err(err) = adapter
                .handle_event(InputEvent::KeyUp(ENTER_KEY_CODE), &line)
                .await
            {
                tracing::warn!(input = %line, "rejected input: {err}");
                eprintln!("xhr: {err}");
            }
        });
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(err) = joined {
            tracing::error!("request task failed: {err}");
        }
    }
    Ok(())
}

/// Writes each outcome as one line on stdout.
pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn render(&self, value: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{value}");
        let _ = out.flush();
    }
}
