use super::ExchangeError;
use crate::model::Product;
use serde_json::Value;
use tracing::debug;

/// Parses an import document into products.
///
/// The document must be a JSON array and every element a product. Numeric ids
/// are accepted and canonicalized to their string form.
pub fn parse_catalog(text: &str) -> Result<Vec<Product>, ExchangeError> {
    let document: Value = serde_json::from_str(text).map_err(ExchangeError::InvalidJson)?;
    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(ExchangeError::NotAnArray {
                found: kind_of(&other),
            })
        }
    };

    let products = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|source| ExchangeError::MalformedProduct { index, source })
        })
        .collect::<Result<Vec<Product>, _>>()?;

    debug!(count = products.len(), "Parsed catalog document");
    Ok(products)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
