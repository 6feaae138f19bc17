use crate::config::MailConfig;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind_address: Option<String>,
    /// Origins allowed to call the form endpoints from a browser.
    pub allowed_origins: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIL_RELAY_API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_REF: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REF.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern compiles"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind_address.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    pub fn allowed_origins(&self) -> &[String] {
        self.server
            .as_ref()
            .and_then(|s| s.allowed_origins.as_deref())
            .unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.mail.validate()?;

        if self.mail.api_key.starts_with("${") {
            return Err(SiteError::MissingConfigError {
                field: self.mail.api_key.trim_start_matches("${").trim_end_matches('}').to_string(),
            });
        }

        for origin in self.allowed_origins() {
            validation::validate_url("server.allowed_origins", origin)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
bind_address = "0.0.0.0:8080"
allowed_origins = ["https://saargroup.com"]

[mail]
relay_url = "https://relay.test"
api_key = "re_abc"
sender = "forms@saargroup.com"
inbox = "info@saargroup.com"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.allowed_origins(), ["https://saargroup.com".to_string()]);
        assert_eq!(config.mail.inbox_address(), "info@saargroup.com");
        assert_eq!(config.mail.max_resume_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SAAR_RELAY_KEY", "re_from_env");

        let toml_content = r#"
[mail]
relay_url = "https://relay.test"
api_key = "${TEST_SAAR_RELAY_KEY}"
sender = "forms@saargroup.com"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.mail.api_key, "re_from_env");
        assert_eq!(config.bind_address(), DEFAULT_BIND_ADDRESS);

        std::env::remove_var("TEST_SAAR_RELAY_KEY");
    }

    #[test]
    fn test_unresolved_secret_fails_validation() {
        let toml_content = r#"
[mail]
relay_url = "https://relay.test"
api_key = "${TEST_SAAR_UNSET_KEY}"
sender = "forms@saargroup.com"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(SiteError::MissingConfigError { field }) => assert_eq!(field, "TEST_SAAR_UNSET_KEY"),
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[mail]
relay_url = "https://relay.test"
api_key = "re_file"
sender = "forms@saargroup.com"
timeout_seconds = 5
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.mail.timeout_seconds, 5);
    }

    #[test]
    fn test_missing_mail_section_is_an_error() {
        assert!(TomlConfig::from_toml_str("[server]\nbind_address = \"x\"\n").is_err());
    }
}
