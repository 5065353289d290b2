use crate::utils::error::{EtlError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 來源端點只接受 http / https
pub fn validate_url(field: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(invalid(field, endpoint, "Endpoint cannot be empty"));
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(field, endpoint, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, endpoint, format!("Unsupported URL scheme: {}", scheme))),
    }
}

/// 球員端點模板：必須含有 `{memberId}`，代入樣本值後須為合法 URL
pub fn validate_endpoint_template(field: &str, template: &str) -> Result<()> {
    if !template.contains("{memberId}") {
        return Err(invalid(field, template, "Template must contain the {memberId} placeholder"));
    }

    let probe = template
        .replace("{memberId}", "0")
        .replace("{association}", "KPGA");
    validate_url(field, &probe)
}

/// 備援資料目錄：可以尚未建立，但若已存在必須是目錄
pub fn validate_path(field: &str, dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(invalid(field, dir, "Path cannot be empty"));
    }
    if dir.contains('\0') {
        return Err(invalid(field, dir, "Path contains null bytes"));
    }

    let path = Path::new(dir);
    if path.exists() && !path.is_dir() {
        return Err(invalid(field, dir, "Path exists but is not a directory"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("Value must be between {} and {}", min, max)));
    }
    Ok(())
}
