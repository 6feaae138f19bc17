use crate::config::toml_config::{TomlConfig, DEFAULT_BIND_ADDRESS};
use crate::config::MailConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "saar-site")]
#[command(about = "Form and content API for the SAAR Group website")]
pub struct ServerConfig {
    #[arg(long, env = "BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// TOML file with [server] and [mail] sections; the environment is used when absent
    #[arg(short, long, env = "SAAR_CONFIG")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "JSON_LOGS", help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

/// Settings resolved from the command line, an optional TOML file and the
/// environment, in that order of precedence.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub mail: MailConfig,
}

impl ServerConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(ResolvedConfig {
                    bind_address: self
                        .bind_address
                        .clone()
                        .unwrap_or_else(|| file.bind_address().to_string()),
                    allowed_origins: file.allowed_origins().to_vec(),
                    mail: file.mail,
                })
            }
            None => Ok(ResolvedConfig {
                bind_address: self
                    .bind_address
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
                allowed_origins: Vec::new(),
                mail: MailConfig::from_env()?,
            }),
        }
    }
}
