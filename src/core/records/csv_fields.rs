//! Lenient field parsers for dataset columns.
//!
//! Cleaned exports mix `True`/`False`, `1`/`0` and `1.0`/`0.0` for flags and
//! leave blanks for unknown values. A malformed cell becomes `None` instead
//! of failing the whole row.

use serde::{Deserialize, Deserializer};

pub(crate) fn number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

pub(crate) fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub(crate) fn flag<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| parse_flag(&s)))
}

pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for s in ["True", "true", "1", "1.0", " yes "] {
            assert_eq!(parse_flag(s), Some(true), "{s}");
        }
        for s in ["False", "0", "0.0", "no"] {
            assert_eq!(parse_flag(s), Some(false), "{s}");
        }
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
    }
}
