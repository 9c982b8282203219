use crate::conf::{ConfigError, load_policy};
use crate::error::ProxyAddrError;
use crate::logging::OutputMode;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn check(path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    match load_policy(path) {
        Ok(policy) => {
            match mode {
                OutputMode::Json => println!("{}", policy.report.to_json()?),
                OutputMode::Plain => policy.report.render_plain(),
                OutputMode::Pretty => policy.report.render_pretty(),
            }
            if mode != OutputMode::Json {
                println!("{} Policy loaded successfully", "✔".green());
                println!("{} {} trust entries", "✔".green(), policy.tokens.len());
                println!(
                    "{} {} ranges",
                    "✔".green(),
                    policy.compiled.subnets().len()
                );
            }
            Ok(())
        }
        Err(ConfigError::Validation { report, .. }) => {
            match mode {
                OutputMode::Json => println!("{}", report.to_json()?),
                OutputMode::Plain => report.render_plain(),
                OutputMode::Pretty => report.render_pretty(),
            }
            std::process::exit(1);
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{}", err);
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Trust {
            source: ProxyAddrError::TrustRequired,
            ..
        } => Some(
            "Policy files must define `trust`.\n\
             \n\
             Example:\n\
             \n\
             trust = [\"loopback\", \"10.0.0.0/8\"]",
        ),

        ConfigError::Trust {
            source: ProxyAddrError::UnsupportedTrust,
            ..
        } => Some(
            "`trust` must be a string or a list of strings.\n\
             \n\
             Example:\n\
             \n\
             trust = \"uniquelocal\"",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
