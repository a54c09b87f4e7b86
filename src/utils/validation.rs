use crate::utils::error::{NutriError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NutriError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
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
        return Err(NutriError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NutriError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NutriError::validation(
            field_name,
            format!("{} cannot be empty", capitalize(field_name)),
        ));
    }
    Ok(())
}

/// 解析使用者輸入的正數 (數量、體重、身高)
pub fn parse_positive_f64(field_name: &str, input: &str) -> Result<f64> {
    let value: f64 = input.trim().parse().map_err(|_| {
        NutriError::validation(field_name, format!("'{}' is not a number", input.trim()))
    })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(NutriError::validation(
            field_name,
            format!("{} must be a positive number.", capitalize(field_name)),
        ));
    }
    Ok(value)
}

pub fn parse_quantity(input: &str) -> Result<f64> {
    parse_positive_f64("quantity", input)
}

pub fn parse_age(input: &str) -> Result<u32> {
    let age: u32 = input.trim().parse().map_err(|_| {
        NutriError::validation("age", format!("'{}' is not a whole number of years", input.trim()))
    })?;
    if age == 0 {
        return Err(NutriError::validation("age", "Age must be a positive number."));
    }
    Ok(age)
}

/// 一次合併查詢的項目上限
pub const MAX_COMBINE_ITEMS: usize = 100;

pub fn parse_count(field_name: &str, input: &str) -> Result<usize> {
    let count: usize = input.trim().parse().map_err(|_| {
        NutriError::validation(field_name, format!("'{}' is not a whole number", input.trim()))
    })?;
    if count > MAX_COMBINE_ITEMS {
        return Err(NutriError::validation(
            field_name,
            format!(
                "{} must be at most {}.",
                capitalize(field_name),
                MAX_COMBINE_ITEMS
            ),
        ));
    }
    Ok(count)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
