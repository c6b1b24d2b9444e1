//! CLI module for the auth session gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Auth Session Gateway - credential sign-in with refreshable sessions
#[derive(Parser)]
#[command(name = "auth-session-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["auth-session-gateway", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }
}
