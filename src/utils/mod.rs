//! Project-specific utilities live here.

pub mod openapi;

use serde::{Deserialize, Deserializer};

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("cinema::{module}")
}

/// Row offset of a 1-based page; pages below 1 are treated as page 1.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size)
}

/// Deserializes a field that was present in the body, keeping an explicit
/// `null` as `Some(None)`. Pair with `#[serde(default)]` so a missing key
/// stays `None`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "present")]
        name: Option<Option<String>>,
    }

    #[test]
    fn present_tells_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"name": "Ozu"}"#).unwrap();

        assert_eq!(missing.name, None);
        assert_eq!(null.name, Some(None));
        assert_eq!(value.name, Some(Some("Ozu".to_string())));
    }

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1, 5), 0);
        assert_eq!(page_offset(2, 5), 5);
        assert_eq!(page_offset(3, 5), 10);
    }

    #[test]
    fn pages_below_one_clamp_to_first_page() {
        assert_eq!(page_offset(0, 5), 0);
        assert_eq!(page_offset(-4, 5), 0);
    }

    #[test]
    fn huge_pages_saturate() {
        assert_eq!(page_offset(i64::MAX, 5), i64::MAX);
    }
}
