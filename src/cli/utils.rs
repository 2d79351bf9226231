//! Utility functions for CLI commands

use std::io::{self, Read};

/// Get input text from a file or stdin
pub fn read_input(file: Option<&str>) -> Result<String, String> {
    if let Some(path) = file {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e))
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    }
}

/// Parse `KEY=VALUE` metadata pairs into a JSON object
pub fn parse_metadata(pairs: &[String]) -> Result<serde_json::Map<String, serde_json::Value>, String> {
    let mut metadata = serde_json::Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid metadata '{}': expected KEY=VALUE", pair))?;
        if key.is_empty() {
            return Err(format!("Invalid metadata '{}': empty key", pair));
        }
        metadata.insert(key.to_string(), serde_json::Value::from(value));
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_pairs_parse_into_an_object() {
        let pairs = vec!["type=invoice".to_string(), "amount=$5000".to_string()];
        let metadata = parse_metadata(&pairs).unwrap();
        assert_eq!(metadata["type"], "invoice");
        assert_eq!(metadata["amount"], "$5000");
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(parse_metadata(&["no-equals".to_string()]).is_err());
        assert!(parse_metadata(&["=value".to_string()]).is_err());
    }
}
