use crate::utils::error::{Result, SeedError};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    if addr.is_empty() {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: "Address cannot be empty".to_string(),
        });
    }

    addr.parse::<SocketAddr>()
        .map_err(|e| SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名只能是資料目錄下的單一檔案，不可包含路徑分隔字元
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }

    Ok(())
}

/// 路由前綴：空字串代表掛在根目錄，否則必須以 `/` 開頭且不以 `/` 結尾
pub fn validate_base_path(field_name: &str, base_path: &str) -> Result<()> {
    if base_path.is_empty() {
        return Ok(());
    }

    if !base_path.starts_with('/') || base_path.ends_with('/') {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: base_path.to_string(),
            reason: "Base path must start with '/' and must not end with '/'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 共用的設定檢查，CLI 與 TOML 來源都走這裡
pub fn validate_provider<C: crate::domain::ports::ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_socket_addr("bind", config.bind_addr())?;
    validate_base_path("base_path", config.base_path())?;
    validate_path("data_dir", config.data_dir())?;
    validate_file_name("seeds_file", config.seeds_file())?;
    validate_file_name("applicants_file", config.applicants_file())?;
    validate_positive_number("lock_timeout_ms", config.lock_timeout_ms(), 1)?;
    validate_positive_number("guest_cap", config.guest_cap(), 1)?;
    validate_positive_number("member_cap", config.member_cap(), 1)?;
    validate_range("utc_offset_hours", config.utc_offset_hours(), -12, 14)?;

    if config.guest_cap() > config.member_cap() {
        return Err(SeedError::ConfigValidationError {
            field: "guest_cap".to_string(),
            message: format!(
                "guest cap ({}) cannot exceed member cap ({})",
                config.guest_cap(),
                config.member_cap()
            ),
        });
    }

    Ok(())
}
