//! Attribute validators
//!
//! Each check is a plain function returning [`ValidationError`] so resources
//! and helpers can call it directly; [`Check`] adapts a check to the schema
//! [`Validator`] trait.

use crate::framework::{Diagnostics, Validator};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

/// A failed check: summary and detail for the diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Diagnostic summary
    pub summary: String,
    /// Diagnostic detail
    pub detail: String,
}

impl ValidationError {
    fn new(summary: &str, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type for validation checks
pub type CheckResult = Result<(), ValidationError>;

static CUSTOM_FIELD_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").ok());
/// `YYYY-MM-DD`
pub(crate) static DATE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok());
static MAC_ADDRESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$").ok());

pub(crate) fn is_match(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    (**pattern).as_ref().is_some_and(|re| re.is_match(value))
}

/// Custom field types NetBox accepts, including the legacy names
pub const CUSTOM_FIELD_TYPES: &[&str] = &[
    "text",
    "longtext",
    "integer",
    "boolean",
    "date",
    "url",
    "json",
    "select",
    "multiselect",
    "object",
    "multiobject",
    "multiple",
    "selection",
];

/// Lowercase letters, digits, `-` and `_`; no leading or trailing `-`/`_`
pub fn validate_slug(value: &str) -> CheckResult {
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(ValidationError::new(
            "Invalid Slug Format",
            format!(
                "Slug '{}' contains invalid character '{}'. Only lowercase letters, numbers, \
                 hyphens, and underscores are allowed.",
                value, bad
            ),
        ));
    }
    let edge = |c: char| c == '-' || c == '_';
    if value.starts_with(edge) || value.ends_with(edge) {
        return Err(ValidationError::new(
            "Invalid Slug Format",
            format!("Slug '{}' cannot start or end with hyphens or underscores", value),
        ));
    }
    Ok(())
}

/// Starts with a letter; letters, digits and underscores only
pub fn validate_custom_field_name(value: &str) -> CheckResult {
    if is_match(&CUSTOM_FIELD_NAME, value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Custom Field Name",
        format!(
            "Custom field name '{}' must start with a letter and contain only letters, numbers, \
             and underscores",
            value
        ),
    ))
}

/// One of [`CUSTOM_FIELD_TYPES`]
pub fn validate_custom_field_type(value: &str) -> CheckResult {
    if CUSTOM_FIELD_TYPES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Custom Field Type",
        format!(
            "Custom field type '{}' is not valid. Must be one of: {}",
            value,
            CUSTOM_FIELD_TYPES.join(", ")
        ),
    ))
}

/// Value is well-formed for its custom field type. Empty values clear the field.
pub fn validate_custom_field_value(field_type: &str, value: &str) -> CheckResult {
    if value.is_empty() {
        return Ok(());
    }
    match field_type {
        "integer" => value.parse::<i64>().map(|_| ()).map_err(|e| {
            ValidationError::new(
                "Invalid Integer Value",
                format!("The value '{}' is not a valid integer: {}", value, e),
            )
        }),
        "boolean" if value != "true" && value != "false" => Err(ValidationError::new(
            "Invalid Boolean Value",
            format!("The value '{}' must be either 'true' or 'false'", value),
        )),
        "json" => serde_json::from_str::<Value>(value).map(|_| ()).map_err(|e| {
            ValidationError::new(
                "Invalid JSON Value",
                format!("The value '{}' is not valid JSON: {}", value, e),
            )
        }),
        "multiselect" | "multiple" if value.trim().is_empty() => Err(ValidationError::new(
            "Invalid Multiselect Value",
            "Multiselect values cannot be empty",
        )),
        "url" if !value.starts_with("http://") && !value.starts_with("https://") => {
            Err(ValidationError::new(
                "Invalid URL Value",
                format!(
                    "The value '{}' must be a valid URL starting with http:// or https://",
                    value
                ),
            ))
        }
        "date" if !is_match(&DATE, value) => Err(ValidationError::new(
            "Invalid Date Value",
            format!("The value '{}' must be a date in YYYY-MM-DD format", value),
        )),
        _ => Ok(()),
    }
}

/// Latitude in [-90, 90]
pub fn validate_latitude(value: f64) -> CheckResult {
    if (-90.0..=90.0).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Latitude",
        format!("Latitude must be between -90 and 90 (inclusive). Got {}", value),
    ))
}

/// Longitude in [-180, 180]
pub fn validate_longitude(value: f64) -> CheckResult {
    if (-180.0..=180.0).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Longitude",
        format!("Longitude must be between -180 and 180 (inclusive). Got {}", value),
    ))
}

/// 802.1Q VLAN id in [1, 4094]
pub fn validate_vlan_id(value: i64) -> CheckResult {
    if (1..=4094).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid VLAN ID",
        format!("VLAN ID must be between 1 and 4094 (inclusive). Got {}", value),
    ))
}

/// 32-bit autonomous system number in [1, 4294967295]
pub fn validate_asn(value: i64) -> CheckResult {
    if (1..=4_294_967_295).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid ASN",
        format!("ASN must be between 1 and 4294967295 (inclusive). Got {}", value),
    ))
}

/// ASN given as a string
pub fn validate_asn_str(value: &str) -> CheckResult {
    let asn = value.parse::<i64>().map_err(|_| {
        ValidationError::new(
            "Invalid ASN",
            format!(
                "ASN must be a valid integer between 1 and 4294967295. Got '{}'",
                value
            ),
        )
    })?;
    validate_asn(asn)
}

/// `AA:BB:CC:DD:EE:FF`
pub fn validate_mac_address(value: &str) -> CheckResult {
    if is_match(&MAC_ADDRESS, value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid MAC Address",
        format!("MAC address must be in format AA:BB:CC:DD:EE:FF. Got '{}'", value),
    ))
}

/// Bare IPv4 or IPv6 address
pub fn validate_ip_address(value: &str) -> CheckResult {
    value.parse::<IpAddr>().map(|_| ()).map_err(|e| {
        ValidationError::new(
            "Invalid IP Address",
            format!("The value '{}' is not a valid IPv4 or IPv6 address: {}", value, e),
        )
    })
}

/// Split `addr/len` and check the length against the address family
fn parse_cidr(value: &str) -> Result<(IpAddr, u8), String> {
    let (addr, len) = value
        .split_once('/')
        .ok_or_else(|| "missing prefix length".to_string())?;
    let addr: IpAddr = addr.parse().map_err(|e| format!("{}", e))?;
    let len: u8 = len
        .parse()
        .map_err(|_| format!("bad prefix length \"{}\"", len))?;
    let max = if addr.is_ipv4() { 32 } else { 128 };
    if len > max {
        return Err(format!("prefix length {} out of range", len));
    }
    Ok((addr, len))
}

/// Address with prefix length, e.g. `10.0.0.1/24`
pub fn validate_ip_with_prefix(value: &str) -> CheckResult {
    parse_cidr(value).map(|_| ()).map_err(|e| {
        ValidationError::new(
            "Invalid IP Address with Prefix",
            format!(
                "The value '{}' is not a valid IPv4 or IPv6 address with prefix length: {}",
                value, e
            ),
        )
    })
}

/// Network prefix with host bits zero, e.g. `10.0.0.0/24`
pub fn validate_ip_prefix(value: &str) -> CheckResult {
    let (addr, len) = parse_cidr(value).map_err(|e| {
        ValidationError::new(
            "Invalid Prefix",
            format!(
                "The value '{}' is not a valid IPv4 or IPv6 network prefix: {}",
                value, e
            ),
        )
    })?;
    let host_bits_set = match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            len < 32 && bits & (u32::MAX >> len) != 0
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            len < 128 && bits & (u128::MAX >> len) != 0
        }
    };
    if host_bits_set {
        return Err(ValidationError::new(
            "Invalid Prefix",
            format!(
                "The value '{}' must be a network address (host bits must be zero)",
                value
            ),
        ));
    }
    Ok(())
}

/// Six hex digits without `#`
pub fn validate_hex_color(value: &str) -> CheckResult {
    if value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Color",
        format!(
            "Color must be a 6-character hex code without '#' (e.g. 'aa1409'). Got '{}'",
            value
        ),
    ))
}

/// Reference attributes that only accept numeric ids
pub fn validate_integer_id(value: &str) -> CheckResult {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::new(
        "Invalid Attribute Value Match",
        format!("must be a valid integer ID, got: \"{}\"", value),
    ))
}

/// Adapts a string check to [`Validator`]
#[derive(Clone, Copy)]
pub struct Check {
    description: &'static str,
    check: fn(&str) -> CheckResult,
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Check").field(&self.description).finish()
    }
}

impl Check {
    /// Wrap a string check
    pub const fn string(description: &'static str, check: fn(&str) -> CheckResult) -> Self {
        Self { description, check }
    }
}

impl Validator for Check {
    fn description(&self) -> String {
        self.description.to_string()
    }

    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics) {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return,
        };
        if let Err(e) = (self.check)(&text) {
            diags.add_attribute_error(attribute, e.summary, e.detail);
        }
    }
}

/// Slug format
pub fn slug() -> Check {
    Check::string("must be a valid slug", validate_slug)
}

/// MAC address format
pub fn mac_address() -> Check {
    Check::string("must be a MAC address", validate_mac_address)
}

/// Bare IP address
pub fn ip_address() -> Check {
    Check::string("must be an IPv4 or IPv6 address", validate_ip_address)
}

/// IP address with prefix length
pub fn ip_with_prefix() -> Check {
    Check::string("must be an IP address with prefix length", validate_ip_with_prefix)
}

/// Network prefix
pub fn ip_prefix() -> Check {
    Check::string("must be a network prefix", validate_ip_prefix)
}

/// Decimal object id
pub fn integer_id() -> Check {
    Check::string("must be a valid integer ID", validate_integer_id)
}

/// Hex color
pub fn hex_color() -> Check {
    Check::string("must be a 6-character hex color", validate_hex_color)
}

/// ASN as string
pub fn asn_string() -> Check {
    Check::string("must be an ASN between 1 and 4294967295", validate_asn_str)
}

/// Numeric range check for `int64` and `float64` attributes
#[derive(Debug, Clone, Copy)]
pub struct Range {
    summary: &'static str,
    subject: &'static str,
    min: f64,
    max: f64,
}

impl Validator for Range {
    fn description(&self) -> String {
        format!("value must be between {} and {}", self.min, self.max)
    }

    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics) {
        let Some(number) = value.as_f64() else {
            return;
        };
        if !(self.min..=self.max).contains(&number) {
            diags.add_attribute_error(
                attribute,
                self.summary,
                format!(
                    "{} must be between {} and {} (inclusive). Got {}",
                    self.subject, self.min, self.max, value
                ),
            );
        }
    }
}

/// Latitude range
pub fn latitude() -> Range {
    Range { summary: "Invalid Latitude", subject: "Latitude", min: -90.0, max: 90.0 }
}

/// Longitude range
pub fn longitude() -> Range {
    Range { summary: "Invalid Longitude", subject: "Longitude", min: -180.0, max: 180.0 }
}

/// VLAN id range
pub fn vlan_id() -> Range {
    Range { summary: "Invalid VLAN ID", subject: "VLAN ID", min: 1.0, max: 4094.0 }
}

/// ASN range
pub fn asn() -> Range {
    Range { summary: "Invalid ASN", subject: "ASN", min: 1.0, max: 4_294_967_295.0 }
}

/// Generic inclusive integer range
pub fn int_between(min: i64, max: i64) -> Range {
    #[allow(clippy::cast_precision_loss, reason = "bounds are well inside f64 precision")]
    let (min, max) = (min as f64, max as f64);
    Range { summary: "Invalid Attribute Value", subject: "Value", min, max }
}

/// Lower bound only, e.g. weights and speeds
pub fn float_at_least(min: f64) -> Range {
    Range { summary: "Invalid Attribute Value", subject: "Value", min, max: f64::MAX }
}

/// String length in characters
#[derive(Debug, Clone, Copy)]
pub struct LengthBetween {
    min: usize,
    max: usize,
}

/// Length between `min` and `max` characters
pub fn length_between(min: usize, max: usize) -> LengthBetween {
    LengthBetween { min, max }
}

impl Validator for LengthBetween {
    fn description(&self) -> String {
        format!("string length must be between {} and {}", self.min, self.max)
    }

    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics) {
        let Some(text) = value.as_str() else {
            return;
        };
        let len = text.chars().count();
        if len < self.min || len > self.max {
            diags.add_attribute_error(
                attribute,
                "Invalid Attribute Value Length",
                format!(
                    "Attribute {} string length must be between {} and {}, got: {}",
                    attribute, self.min, self.max, len
                ),
            );
        }
    }
}

/// Value must be one of a fixed set
#[derive(Debug, Clone)]
pub struct OneOf {
    values: &'static [&'static str],
    allow_empty: bool,
}

/// One of `values`
pub fn one_of(values: &'static [&'static str]) -> OneOf {
    OneOf { values, allow_empty: false }
}

/// One of `values`, or `""` to clear an optional choice
pub fn one_of_or_empty(values: &'static [&'static str]) -> OneOf {
    OneOf { values, allow_empty: true }
}

impl Validator for OneOf {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.values.join(", "))
    }

    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics) {
        let Some(text) = value.as_str() else {
            return;
        };
        if (self.allow_empty && text.is_empty()) || self.values.contains(&text) {
            return;
        }
        diags.add_attribute_error(
            attribute,
            "Invalid Attribute Value Match",
            format!(
                "Attribute {} value must be one of: {}, got: \"{}\"",
                attribute,
                self.values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(", "),
                text
            ),
        );
    }
}

/// Validates every `{name, type, value}` element of a custom field set
#[derive(Debug, Clone, Copy)]
pub struct CustomFields;

impl Validator for CustomFields {
    fn description(&self) -> String {
        "custom fields must have valid names, types and values".to_string()
    }

    fn validate(&self, attribute: &str, value: &Value, diags: &mut Diagnostics) {
        let Some(items) = value.as_array() else {
            return;
        };
        for item in items {
            let name = item.get("name").and_then(Value::as_str);
            let field_type = item.get("type").and_then(Value::as_str);
            let field_value = item.get("value").and_then(Value::as_str);
            let checks = [
                name.map(validate_custom_field_name),
                field_type.map(validate_custom_field_type),
                field_type
                    .zip(field_value)
                    .map(|(t, v)| validate_custom_field_value(t, v)),
            ];
            for e in checks.into_iter().flatten().filter_map(Result::err) {
                diags.add_attribute_error(attribute, e.summary, e.detail);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiled_patterns_are_reused() {
        for _ in 0..3 {
            assert!(validate_mac_address("00:1A:2b:3C:4d:5E").is_ok());
            assert!(validate_mac_address("00-1A-2B-3C-4D-5E").is_err());
            assert!(validate_custom_field_name("rack_unit2").is_ok());
            assert!(validate_custom_field_name("2rack").is_err());
        }
        assert!(is_match(&DATE, "2024-02-29"));
        assert!(!is_match(&DATE, "29/02/2024"));
        assert!(DATE.is_some() && MAC_ADDRESS.is_some() && CUSTOM_FIELD_NAME.is_some());
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("core-router_1").is_ok());
        let err = validate_slug("Core").unwrap_err();
        assert_eq!(err.summary, "Invalid Slug Format");
        assert!(err.detail.contains("invalid character 'C'"));
        assert!(validate_slug("-edge").is_err());
        assert!(validate_slug("edge_").is_err());
    }

    #[test]
    fn custom_field_checks() {
        assert!(validate_custom_field_name("owner_team").is_ok());
        assert!(validate_custom_field_name("1owner").is_err());
        assert!(validate_custom_field_type("multiselect").is_ok());
        assert!(validate_custom_field_type("float").is_err());
        assert!(validate_custom_field_value("integer", "42").is_ok());
        assert!(validate_custom_field_value("integer", "4.2").is_err());
        assert!(validate_custom_field_value("boolean", "yes").is_err());
        assert!(validate_custom_field_value("json", "{\"a\":1}").is_ok());
        assert!(validate_custom_field_value("json", "{").is_err());
        assert!(validate_custom_field_value("url", "ftp://x").is_err());
        assert!(validate_custom_field_value("date", "2024-01-31").is_ok());
        assert!(validate_custom_field_value("integer", "").is_ok());
    }

    #[test]
    fn numeric_ranges() {
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.1).is_err());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(181.0).is_err());
        assert!(validate_vlan_id(1).is_ok());
        assert!(validate_vlan_id(4094).is_ok());
        let err = validate_vlan_id(4095).unwrap_err();
        assert_eq!(err.detail, "VLAN ID must be between 1 and 4094 (inclusive). Got 4095");
        assert!(validate_asn(4_294_967_295).is_ok());
        assert!(validate_asn(0).is_err());
        assert!(validate_asn_str("65000").is_ok());
        assert!(validate_asn_str("AS65000").is_err());
    }

    #[test]
    fn address_formats() {
        assert!(validate_mac_address("AA:bb:CC:00:11:22").is_ok());
        assert!(validate_mac_address("AA-BB-CC-00-11-22").is_err());
        assert!(validate_ip_address("2001:db8::1").is_ok());
        assert!(validate_ip_address("10.0.0.1/24").is_err());
        assert!(validate_ip_with_prefix("10.0.0.1/24").is_ok());
        assert!(validate_ip_with_prefix("10.0.0.1/33").is_err());
        assert!(validate_ip_prefix("10.0.0.0/24").is_ok());
        assert!(validate_ip_prefix("2001:db8::/32").is_ok());
        assert!(validate_ip_prefix("10.0.0.0/32").is_ok());
        let err = validate_ip_prefix("10.0.0.1/24").unwrap_err();
        assert!(err.detail.contains("host bits must be zero"));
    }

    #[test]
    fn hex_color() {
        assert!(validate_hex_color("aa1409").is_ok());
        assert!(validate_hex_color("#aa1409").is_err());
        assert!(validate_hex_color("zz1409").is_err());
    }

    #[test]
    fn schema_validators_report_attribute() {
        let mut diags = Diagnostics::new();
        vlan_id().validate("vid", &json!(5000), &mut diags);
        slug().validate("slug", &json!("Bad Slug"), &mut diags);
        length_between(1, 3).validate("name", &json!("toolong"), &mut diags);
        one_of(&["active", "planned"]).validate("status", &json!("gone"), &mut diags);
        let attributes: Vec<_> = diags.iter().filter_map(|d| d.attribute.clone()).collect();
        assert_eq!(attributes, vec!["vid", "slug", "name", "status"]);
    }

    #[test]
    fn custom_field_set_validator() {
        let mut diags = Diagnostics::new();
        CustomFields.validate(
            "custom_fields",
            &json!([
                {"name": "rack_units", "type": "integer", "value": "x"},
                {"name": "owner", "type": "text", "value": "netops"}
            ]),
            &mut diags,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid Integer Value");
    }
}
