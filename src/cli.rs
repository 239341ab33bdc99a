//! Command line surface: generate, check and inspect tokens.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use prefixed_api_key::{
    ApiKeyConfig, ApiKeyError, check_api_key, generate_api_key, get_api_key_components,
};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "api-keygen", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new API key and print it with its storage data as JSON.
    Generate {
        /// YAML file with `prefix`, `key_id_length` and `secret_entropy`.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Token prefix. Overrides the config file.
        #[arg(short, long)]
        prefix: Option<String>,

        /// Key id length in bytes. Overrides the config file.
        #[arg(long)]
        key_id_length: Option<usize>,

        /// Secret entropy in bits. Overrides the config file.
        #[arg(long)]
        secret_entropy: Option<u32>,
    },
    /// Check a token against a stored secret hash.
    Check { token: String, secret_hash: String },
    /// Print the components of a token as JSON.
    Inspect { token: String },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ApiKey(#[from] ApiKeyError),

    #[error("Failed to read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("A prefix is required, via --prefix or the config file")]
    MissingPrefix,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// What a successful run prints, and whether it should exit non-zero.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Rejected(String),
}

pub fn run(cli: &Cli) -> Result<Outcome, CliError> {
    match &cli.command {
        Command::Generate {
            config,
            prefix,
            key_id_length,
            secret_entropy,
        } => {
            let mut api_key_config = match (config, prefix) {
                (Some(path), _) => load_config(path)?,
                (None, Some(prefix)) => ApiKeyConfig::new(prefix.clone()),
                (None, None) => return Err(CliError::MissingPrefix),
            };
            if let Some(prefix) = prefix {
                api_key_config.prefix = prefix.clone();
            }
            if let Some(bytes) = key_id_length {
                api_key_config.key_id_length = *bytes;
            }
            if let Some(bits) = secret_entropy {
                api_key_config.secret_entropy = *bits;
            }

            let key = generate_api_key(&api_key_config)?;
            log::info!("Issued API key {}", key.key_id);
            Ok(Outcome::Output(serde_json::to_string_pretty(&key)?))
        }
        Command::Check { token, secret_hash } => {
            if check_api_key(token, secret_hash)? {
                Ok(Outcome::Output("valid".to_string()))
            } else {
                Ok(Outcome::Rejected("invalid".to_string()))
            }
        }
        Command::Inspect { token } => {
            let components = get_api_key_components(token)?;
            Ok(Outcome::Output(serde_json::to_string_pretty(&components)?))
        }
    }
}

/// Load an [`ApiKeyConfig`] from a YAML file.
pub fn load_config(path: &Path) -> Result<ApiKeyConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}
