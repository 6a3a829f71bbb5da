use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use fxconv_core::Endpoints;

#[derive(Parser, Debug)]
#[command(name = "fxconv", version, about = "Convert amounts between currencies")]
pub struct Cli {
    /// JSON file with `primary` and `secondary` endpoint URLs
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Primary "latest rates" endpoint; the base code is appended as a path segment
    #[arg(long, env = "FXCONV_PRIMARY_URL", global = true)]
    pub primary_url: Option<String>,

    /// Secondary endpoint; the base code is passed as `?base=`
    #[arg(long, env = "FXCONV_SECONDARY_URL", global = true)]
    pub secondary_url: Option<String>,

    /// Log more (-v info, -vv debug). RUST_LOG overrides this
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Convert an amount once and exit
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the rate between two currencies and how it was derived
    Rate { from: String, to: String },

    /// List supported currencies
    Currencies,

    /// Prompt for conversions until `quit` (default)
    Interactive,
}

impl Cli {
    /// Defaults, then the config file, then flags and environment.
    pub fn endpoints(&self) -> anyhow::Result<Endpoints> {
        let mut endpoints = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Endpoints::from_json(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Endpoints::default(),
        };
        if let Some(primary) = &self.primary_url {
            endpoints.primary = primary.clone();
        }
        if let Some(secondary) = &self.secondary_url {
            endpoints.secondary = secondary.clone();
        }
        Ok(endpoints)
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxconv_core::config::{DEFAULT_PRIMARY_URL, DEFAULT_SECONDARY_URL};

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["fxconv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn convert_accepts_raw_amount_text() {
        let cli = Cli::try_parse_from(["fxconv", "convert", "-5", "usd", "eur", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Convert {
                amount: "-5".to_string(),
                from: "usd".to_string(),
                to: "eur".to_string(),
                json: true,
            })
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "fxconv",
            "--primary-url",
            "http://localhost:3000/v4/latest",
            "-vv",
            "currencies",
        ])
        .unwrap();
        let endpoints = cli.endpoints().unwrap();
        assert_eq!(endpoints.primary, "http://localhost:3000/v4/latest");
        assert_eq!(endpoints.secondary, DEFAULT_SECONDARY_URL);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn config_file_is_layered_under_flags() {
        let path = std::env::temp_dir().join(format!("fxconv-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"secondary":"http://file/latest"}"#).unwrap();

        let cli = Cli::try_parse_from(["fxconv", "--config", path.to_str().unwrap(), "currencies"]).unwrap();
        let endpoints = cli.endpoints().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(endpoints.primary, DEFAULT_PRIMARY_URL);
        assert_eq!(endpoints.secondary, "http://file/latest");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["fxconv", "--config", "/nonexistent/fxconv.json", "currencies"]).unwrap();
        assert!(cli.endpoints().is_err());
    }
}
