//! Turning plan values into request fields

use crate::error::IdError;
use crate::framework::{Attr, Diagnostics};

/// Parse an object id. NetBox primary keys are 32-bit.
pub fn parse_id(value: &str) -> Result<u64, IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    let id: i64 = value
        .parse()
        .map_err(|_| IdError::Invalid(value.to_string()))?;
    if id < 0 {
        return Err(IdError::Invalid(value.to_string()));
    }
    safe_int32(id)?;
    u64::try_from(id).map_err(|_| IdError::Invalid(value.to_string()))
}

/// Narrow an `int64` attribute to the `int32` NetBox stores
pub fn safe_int32(value: i64) -> Result<i32, IdError> {
    i32::try_from(value).map_err(|_| IdError::Overflow(value))
}

/// Parse the `id` attribute of a state, e.g. "Invalid Site Group ID"
pub fn parse_state_id(id: &Attr<String>, title: &str) -> Result<u64, Diagnostics> {
    let raw = id.as_str().unwrap_or_default();
    parse_id(raw).map_err(|e| {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error(
            "id",
            format!("Invalid {} ID", title),
            format!("{} ID must be a number, got: {} ({})", title, raw, e),
        );
        diags
    })
}

/// Known string or `""`
pub fn string_or_empty(value: &Attr<String>) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// `description` for a request; NetBox stores an unset description as `""`
pub fn description(value: &Attr<String>) -> String {
    string_or_empty(value)
}

/// `comments` for a request, same convention as [`description`]
pub fn comments(value: &Attr<String>) -> String {
    string_or_empty(value)
}

/// Known string or `None`
pub fn optional_string(value: &Attr<String>) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Known non-empty string or `None`, for nullable choice fields
pub fn optional_choice(value: &Attr<String>) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Known bool or `default`
pub fn bool_or(value: &Attr<bool>, default: bool) -> bool {
    value.value().copied().unwrap_or(default)
}

/// Known float or `None`
pub fn optional_f64(value: &Attr<f64>) -> Option<f64> {
    value.value().copied()
}

/// Known integer or `None`
pub fn optional_i64(value: &Attr<i64>) -> Option<i64> {
    value.value().copied()
}

/// Known integer narrowed to `int32`; overflow is reported on `attribute`
pub fn optional_int32(value: &Attr<i64>, attribute: &str, diags: &mut Diagnostics) -> Option<i32> {
    let raw = *value.value()?;
    match safe_int32(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            diags.add_attribute_error(attribute, "Invalid Integer Value", e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_errors() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(parse_id(""), Err(IdError::Empty));
        assert_eq!(parse_id("abc"), Err(IdError::Invalid("abc".to_string())));
        assert_eq!(parse_id("-1"), Err(IdError::Invalid("-1".to_string())));
        assert_eq!(parse_id("2147483648"), Err(IdError::Overflow(2_147_483_648)));
        assert_eq!(parse_id("2147483647"), Ok(2_147_483_647));
    }

    #[test]
    fn safe_int32_bounds() {
        assert_eq!(safe_int32(i64::from(i32::MIN)), Ok(i32::MIN));
        assert_eq!(
            safe_int32(i64::from(i32::MAX) + 1).unwrap_err().to_string(),
            "value 2147483648 overflows int32 range"
        );
    }

    #[test]
    fn state_id_diagnostic_names_the_type() {
        let diags = parse_state_id(&Attr::Value("abc".to_string()), "Site Group").unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid Site Group ID");
        assert!(diag.detail.starts_with("Site Group ID must be a number, got: abc"));
    }

    #[test]
    fn int32_overflow_is_an_attribute_error() {
        let mut diags = Diagnostics::new();
        assert_eq!(optional_int32(&Attr::Value(9000), "mtu", &mut diags), Some(9000));
        assert_eq!(optional_int32(&Attr::Value(i64::MAX), "mtu", &mut diags), None);
        assert_eq!(optional_int32(&Attr::Null, "mtu", &mut diags), None);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn optional_helpers() {
        assert_eq!(string_or_empty(&Attr::Null), "");
        assert_eq!(optional_string(&Attr::Unknown), None);
        assert_eq!(optional_choice(&Attr::Value(String::new())), None);
        assert!(bool_or(&Attr::Null, true));
        assert!(!bool_or(&Attr::Value(false), true));
    }
}
