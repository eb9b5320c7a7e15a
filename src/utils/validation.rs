use crate::domain::model::ApiKey;
use crate::utils::error::{CrewError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 表單前置檢查：必須先設定 API key
pub fn ensure_api_key<'a>(key_name: &str, api_key: Option<&'a ApiKey>) -> Result<&'a ApiKey> {
    match api_key {
        Some(key) if !key.is_blank() => Ok(key),
        _ => Err(CrewError::MissingApiKey {
            key: key_name.to_string(),
        }),
    }
}

/// 表單前置檢查：生活風格描述不可為空白
pub fn ensure_lifestyle(lifestyle: &str) -> Result<&str> {
    let trimmed = lifestyle.trim();
    if trimmed.is_empty() {
        return Err(CrewError::EmptyLifestyle);
    }
    Ok(trimmed)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CrewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CrewError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CrewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CrewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CrewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(CrewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("llm.base_url", "https://api.groq.com/openai/v1").is_ok());
        assert!(validate_url("llm.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("llm.base_url", "").is_err());
        assert!(validate_url("llm.base_url", "invalid-url").is_err());
        assert!(validate_url("llm.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("llm.temperature", 0.3, 0.0, 2.0).is_ok());
        assert!(validate_range("llm.temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range("llm.temperature", -0.1, 0.0, 2.0).is_err());
    }

    #[test]
    fn test_ensure_lifestyle_trims() {
        assert_eq!(ensure_lifestyle("  Hiker ").unwrap(), "Hiker");
        assert!(matches!(ensure_lifestyle(""), Err(CrewError::EmptyLifestyle)));
        assert!(matches!(ensure_lifestyle(" \t\n"), Err(CrewError::EmptyLifestyle)));
    }

    #[test]
    fn test_ensure_api_key() {
        let key = ApiKey::new("gsk_test");
        assert!(ensure_api_key("GROQ_API_KEY", Some(&key)).is_ok());
        assert!(matches!(
            ensure_api_key("GROQ_API_KEY", None),
            Err(CrewError::MissingApiKey { .. })
        ));

        let blank = ApiKey::new("   ");
        assert!(ensure_api_key("GROQ_API_KEY", Some(&blank)).is_err());
    }
}
