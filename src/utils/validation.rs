use crate::domain::model::{Coordinate, Value};
use crate::utils::error::{Result, ToolError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts only a `(number, number)` pair. Lists are rejected even when
/// they hold exactly two numbers.
pub fn validate_coordinate(value: &Value) -> Result<Coordinate> {
    let (latitude, longitude) = match value {
        Value::Pair(latitude, longitude) => (latitude, longitude),
        other => {
            return Err(ToolError::type_mismatch(
                "coordinate",
                "a tuple",
                other.type_name(),
            ))
        }
    };

    match (latitude.as_number(), longitude.as_number()) {
        (Some(lat), Some(long)) => Ok(Coordinate::new(lat, long)),
        _ => Err(ToolError::type_mismatch(
            "coordinate",
            "a tuple (int/float, int/float)",
            format!("({}, {})", latitude.type_name(), longitude.type_name()),
        )),
    }
}

pub fn validate_number(field_name: &str, value: &Value) -> Result<f64> {
    value
        .as_number()
        .ok_or_else(|| ToolError::type_mismatch(field_name, "int or float", value.type_name()))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ToolError::ConfigError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ToolError::ConfigError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ToolError::ConfigError {
            field: field_name.to_string(),
            message: format!("Value must be a finite number, got {}", value),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(ToolError::ConfigError {
            field: field_name.to_string(),
            message: format!("Value must be greater than 0, got {}", value),
        });
    }
    Ok(())
}
