use std::path::PathBuf;

use clap::Parser;

/// typist: turns compose-box activity into typing notifications.
///
/// Reads input events as JSON lines on stdin and writes typing
/// notifications as JSON lines on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "typist", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. "typist=debug,typist_typing=trace").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override the idle timeout in milliseconds.
    #[arg(long)]
    pub idle_timeout_ms: Option<u64>,

    /// Enable keep-alive pings at this interval in milliseconds.
    #[arg(long)]
    pub keepalive_ms: Option<u64>,

    /// The local user's id, stripped from direct recipient lists.
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
