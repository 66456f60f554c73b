use crate::core::store::{DEFAULT_APPLICANTS_FILE, DEFAULT_SEEDS_FILE};
use crate::core::ConfigProvider;
use crate::core::csv_export::DEFAULT_UTC_OFFSET_HOURS;
use crate::domain::services::{DEFAULT_GUEST_CAP, DEFAULT_MEMBER_CAP};
use crate::utils::error::{Result, SeedError};
use crate::utils::validation::{validate_provider, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub application: Option<ApplicationConfig>,
    pub export: Option<ExportConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub seeds_file: Option<String>,
    pub applicants_file: Option<String>,
    pub lock_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub member_cap: Option<usize>,
    pub guest_cap: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub utc_offset_hours: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeedError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeedError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SeedError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> &str {
        &self.server.bind
    }

    fn base_path(&self) -> &str {
        self.server.base_path.as_deref().unwrap_or("/api")
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn seeds_file(&self) -> &str {
        self.storage.seeds_file.as_deref().unwrap_or(DEFAULT_SEEDS_FILE)
    }

    fn applicants_file(&self) -> &str {
        self.storage
            .applicants_file
            .as_deref()
            .unwrap_or(DEFAULT_APPLICANTS_FILE)
    }

    fn lock_timeout_ms(&self) -> u64 {
        self.storage.lock_timeout_ms.unwrap_or(5000)
    }

    fn member_cap(&self) -> usize {
        self.application
            .as_ref()
            .and_then(|a| a.member_cap)
            .unwrap_or(DEFAULT_MEMBER_CAP)
    }

    fn guest_cap(&self) -> usize {
        self.application
            .as_ref()
            .and_then(|a| a.guest_cap)
            .unwrap_or(DEFAULT_GUEST_CAP)
    }

    fn utc_offset_hours(&self) -> i32 {
        self.export
            .as_ref()
            .and_then(|e| e.utc_offset_hours)
            .unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
    }

    fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
