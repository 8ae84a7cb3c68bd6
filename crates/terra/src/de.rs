//! Deserialization helpers for state records.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Terraform writes `null` for every unset attribute in state; `#[serde(default)]` alone only covers missing keys.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct State {
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "null_as_default")]
        name: String,
    }

    #[test]
    fn test_null_becomes_default() {
        let state: Option<State> = serde_json::from_str(r#"{"tags":null,"name":"web"}"#).ok();
        assert_eq!(state.as_ref().map(|s| s.tags.len()), Some(0));
        assert_eq!(state.map(|s| s.name), Some("web".to_string()));
    }

    #[test]
    fn test_missing_key_uses_container_default() {
        let state: Option<State> = serde_json::from_str("{}").ok();
        assert_eq!(state.map(|s| s.name), Some(String::new()));
    }
}
