mod check;
mod ranges;
mod resolve;

pub use check::*;
pub use ranges::*;
pub use resolve::*;

use crate::conf::load_policy;
use crate::logging::OutputMode;
use crate::request::RequestParts;
use crate::trust::{Trust, compile};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the originating address of a request
    Resolve {
        #[command(flatten)]
        request: RequestArgs,

        #[command(flatten)]
        trust: TrustArgs,
    },

    /// Print every address up to and including the first untrusted hop
    All {
        #[command(flatten)]
        request: RequestArgs,

        #[command(flatten)]
        trust: TrustArgs,
    },

    /// Validate a policy file and exit
    Check {
        /// Path to the policy file
        #[arg(default_value = "proxyaddr.hcl")]
        path: PathBuf,

        /// Plain, uncolored output
        #[arg(long, conflicts_with = "json")]
        plain: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the symbolic range names accepted in trust tokens
    Ranges,
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();

    match cmd {
        Command::Resolve { request, trust } => run_resolve(&request, trust, &mut out),
        Command::All { request, trust } => run_all(&request, trust, &mut out),
        Command::Check { path, plain, json } => {
            let mode = if json {
                OutputMode::Json
            } else if plain {
                OutputMode::Plain
            } else {
                crate::logging::default_output_mode()
            };
            check(&path, mode)
        }
        Command::Ranges => list_ranges(&mut out),
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Address of the directly connected peer
    #[arg(long, value_name = "ADDR")]
    pub socket: Option<String>,

    /// Raw X-Forwarded-For header value
    #[arg(long, short = 'f', value_name = "HEADER")]
    pub forwarded_for: Option<String>,
}

impl RequestArgs {
    pub fn to_request(&self) -> RequestParts {
        RequestParts::new(self.socket.as_deref(), self.forwarded_for.as_deref())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TrustArgs {
    /// Trusted address, CIDR range, netmask range or symbolic name (repeatable)
    #[arg(long = "trust", short = 't', value_name = "TOKEN")]
    pub tokens: Vec<String>,

    /// Read the trust policy from an HCL file
    #[arg(long, value_name = "FILE", conflicts_with = "tokens")]
    pub policy: Option<PathBuf>,
}

impl TrustArgs {
    /// `None` when neither tokens nor a policy file were given.
    pub fn into_trust(self) -> anyhow::Result<Option<Trust>> {
        if let Some(path) = self.policy {
            let policy = load_policy(&path)?;
            for issue in &policy.report.warnings {
                tracing::warn!(origin = %issue.origin, "{}", issue.message);
            }
            return Ok(Some(policy.trust()));
        }

        if self.tokens.is_empty() {
            return Ok(None);
        }

        Ok(Some(compile(self.tokens)?))
    }
}
