use crate::domain::model::Value;
use crate::utils::error::{Result, ToolError};

/// Flatten arbitrarily nested lists of integers, depth first.
///
/// The top level must be a list. Elements must be integers or lists;
/// booleans, floats and strings are rejected.
pub fn flatten(value: &Value) -> Result<Vec<i64>> {
    let Value::List(items) = value else {
        return Err(ToolError::InvalidElement {
            expected: "list".to_string(),
            actual: value.type_name().to_string(),
        });
    };

    let mut flat = Vec::with_capacity(items.len());
    flatten_into(items, &mut flat)?;
    Ok(flat)
}

fn flatten_into(items: &[Value], flat: &mut Vec<i64>) -> Result<()> {
    for item in items {
        match item {
            Value::Int(i) => flat.push(*i),
            Value::List(nested) => flatten_into(nested, flat)?,
            other => {
                return Err(ToolError::InvalidElement {
                    expected: "int or list".to_string(),
                    actual: other.type_name().to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Parse a JSON array literal and flatten it.
pub fn flatten_json(text: &str) -> Result<Vec<i64>> {
    let parsed: serde_json::Value = serde_json::from_str(text)
        .map_err(|_| ToolError::invalid_value("invalid format array"))?;
    flatten(&Value::from(parsed))
}
