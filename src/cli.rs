use std::path::PathBuf;

use clap::Parser;

/// Rewrites outgoing ICMP Echo Replies on a TUN-based tunnel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path of the TOML configuration file (defaults are used when omitted)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Decrease log verbosity (repeatable)
    #[arg(long, short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (0, 0) => log::LevelFilter::Info,
            (0, 1) => log::LevelFilter::Debug,
            (0, _) => log::LevelFilter::Trace,
            (1, _) => log::LevelFilter::Warn,
            _ => log::LevelFilter::Error,
        }
    }
}
