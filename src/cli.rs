//! Command-line interface.
//!
//! With no subcommand the binary serves the API. `issue-token` prints a
//! signed bearer token for a client, using the same secret the server checks
//! against.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::auth::{AuthError, TokenAuth};

#[derive(Debug, Parser)]
#[command(name = "movieshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (the default)
    Serve,

    /// Print a signed bearer token
    IssueToken {
        /// Value of the token's `sub` claim
        subject: String,

        /// Token lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        ttl_secs: u64,

        /// Shared HMAC secret
        #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
        secret: String,
    },
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

pub fn issue_token(secret: &str, subject: &str, ttl_secs: u64) -> Result<String, AuthError> {
    TokenAuth::new(secret).issue(subject, Duration::from_secs(ttl_secs))
}
