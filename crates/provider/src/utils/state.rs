//! Mapping API responses into state values
//!
//! The central rule is [`reconcile_reference`]: a reference the user wrote
//! as a name, slug or id keeps that spelling as long as it still identifies
//! the object NetBox reports, so refreshes do not produce spurious diffs.

use crate::framework::Attr;
use netbox_client::{BriefRef, ChoiceValue};
use std::net::IpAddr;

/// Reconcile a reference attribute with the object NetBox reports.
///
/// 1. NetBox reports no object: null.
/// 2. The current value equals the object's id: keep it.
/// 3. The current value equals the name, slug or display, ignoring case: keep it.
/// 4. Otherwise (null, unknown or stale): the canonical form, which is the
///    slug, else the name, else the display, else the id.
pub fn reconcile_reference(current: &Attr<String>, api: Option<&BriefRef>) -> Attr<String> {
    let Some(api) = api else {
        return Attr::Null;
    };
    if let Some(value) = current.as_str() {
        if value == api.id.to_string() {
            return current.clone();
        }
        let same = |candidate: &str| !candidate.is_empty() && candidate.eq_ignore_ascii_case(value);
        if same(&api.name) || same(&api.slug) || same(&api.display) {
            return current.clone();
        }
    }
    Attr::Value(api.canonical())
}

/// Reference attributes that only accept ids
pub fn reconcile_id_reference(api: Option<&BriefRef>) -> Attr<String> {
    api.map_or(Attr::Null, |api| Attr::Value(api.id.to_string()))
}

/// Parsed `address/length`, or a bare address
fn parse_ip(value: &str) -> Option<(IpAddr, Option<u8>)> {
    match value.trim().split_once('/') {
        Some((address, length)) => Some((address.parse().ok()?, Some(length.parse().ok()?))),
        None => Some((value.trim().parse().ok()?, None)),
    }
}

/// Reconcile an address or prefix with NetBox's canonical spelling.
///
/// NetBox lowercases and compresses IPv6, so `2001:0DB8::0001/64` comes
/// back as `2001:db8::1/64`. The configured spelling is kept while both
/// parse to the same address and length.
pub fn reconcile_ip(current: &Attr<String>, api: &str) -> Attr<String> {
    if let Some(value) = current.as_str() {
        if value == api {
            return current.clone();
        }
        if let (Some(configured), Some(reported)) = (parse_ip(value), parse_ip(api)) {
            if configured == reported {
                return current.clone();
            }
        }
    }
    Attr::Value(api.to_string())
}

/// Non-empty API strings win; an empty string keeps an explicit `""` and
/// otherwise maps to null.
pub fn string_from_api(api: &str, current: &Attr<String>) -> Attr<String> {
    if !api.is_empty() {
        return Attr::Value(api.to_string());
    }
    match current.as_str() {
        Some("") => Attr::Value(String::new()),
        _ => Attr::Null,
    }
}

/// Nullable API string
pub fn optional_string_from_api(api: Option<&str>, current: &Attr<String>) -> Attr<String> {
    string_from_api(api.unwrap_or_default(), current)
}

/// Choice field value (`status`, `mode`, ...)
pub fn choice_from_api(api: Option<&ChoiceValue>, current: &Attr<String>) -> Attr<String> {
    optional_string_from_api(api.map(|choice| choice.value.as_str()), current)
}

/// Plain-string enum field (e.g. `subdevice_role`, `weight_unit`)
pub fn enum_from_api(api: Option<&str>, current: &Attr<String>) -> Attr<String> {
    optional_string_from_api(api, current)
}

/// Boolean the API always reports
pub fn bool_from_api(api: bool) -> Attr<bool> {
    Attr::Value(api)
}

/// Nullable integer
pub fn int64_from_api(api: Option<i64>) -> Attr<i64> {
    api.into()
}

/// Nullable float
pub fn float64_from_api(api: Option<f64>) -> Attr<f64> {
    api.into()
}

/// Object id as the state's string id
pub fn id_from_api(id: u64) -> Attr<String> {
    Attr::Value(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> BriefRef {
        BriefRef {
            id: 5,
            url: "https://netbox/api/dcim/sites/5/".to_string(),
            display: "Paris DC1".to_string(),
            name: "Paris DC1".to_string(),
            slug: "paris-dc1".to_string(),
        }
    }

    fn value(s: &str) -> Attr<String> {
        Attr::Value(s.to_string())
    }

    #[test]
    fn keeps_user_spelling_when_it_matches() {
        assert_eq!(reconcile_reference(&value("5"), Some(&site())), value("5"));
        assert_eq!(reconcile_reference(&value("paris-dc1"), Some(&site())), value("paris-dc1"));
        assert_eq!(reconcile_reference(&value("paris dc1"), Some(&site())), value("paris dc1"));
        assert_eq!(reconcile_reference(&value("PARIS-DC1"), Some(&site())), value("PARIS-DC1"));
    }

    #[test]
    fn falls_back_to_canonical_form() {
        assert_eq!(reconcile_reference(&Attr::Null, Some(&site())), value("paris-dc1"));
        assert_eq!(reconcile_reference(&Attr::Unknown, Some(&site())), value("paris-dc1"));
        assert_eq!(reconcile_reference(&value("lyon"), Some(&site())), value("paris-dc1"));

        let device = BriefRef {
            id: 9,
            name: "edge01".to_string(),
            ..BriefRef::default()
        };
        assert_eq!(reconcile_reference(&Attr::Null, Some(&device)), value("edge01"));
    }

    #[test]
    fn missing_reference_is_null() {
        assert_eq!(reconcile_reference(&value("paris-dc1"), None), Attr::Null);
        assert_eq!(reconcile_id_reference(None), Attr::Null);
        assert_eq!(reconcile_id_reference(Some(&site())), value("5"));
    }

    #[test]
    fn ip_spelling_is_kept_when_equivalent() {
        let canonical = "2001:db8::1/64";
        assert_eq!(reconcile_ip(&value("2001:0DB8::0001/64"), canonical), value("2001:0DB8::0001/64"));
        assert_eq!(
            reconcile_ip(&value("2001:0db8:0000:0000:0000:0000:0000:0001/64"), canonical),
            value("2001:0db8:0000:0000:0000:0000:0000:0001/64")
        );
        assert_eq!(reconcile_ip(&value("2001:DB8::1/64"), canonical), value("2001:DB8::1/64"));
        assert_eq!(reconcile_ip(&value("2001:db8::A/64"), "2001:db8::a/64"), value("2001:db8::A/64"));
    }

    #[test]
    fn ip_changes_and_unset_values_take_the_api_form() {
        let canonical = "2001:db8::1/64";
        assert_eq!(reconcile_ip(&value("2001:db8::2/64"), canonical), value(canonical));
        assert_eq!(reconcile_ip(&value("2001:db8::1/48"), canonical), value(canonical));
        assert_eq!(reconcile_ip(&Attr::Null, canonical), value(canonical));
        assert_eq!(reconcile_ip(&Attr::Unknown, canonical), value(canonical));
        assert_eq!(reconcile_ip(&value("192.0.2.1/24"), "192.0.2.1/24"), value("192.0.2.1/24"));
        assert_eq!(reconcile_ip(&value("not an ip"), "192.0.2.1/24"), value("192.0.2.1/24"));
    }

    #[test]
    fn empty_strings_map_to_null_unless_set() {
        assert_eq!(string_from_api("", &Attr::Null), Attr::Null);
        assert_eq!(string_from_api("", &value("")), value(""));
        assert_eq!(string_from_api("x", &Attr::Null), value("x"));
        assert_eq!(optional_string_from_api(None, &value("old")), Attr::Null);
    }

    #[test]
    fn choice_uses_value_not_label() {
        let status = ChoiceValue {
            value: "active".to_string(),
            label: "Active".to_string(),
        };
        assert_eq!(choice_from_api(Some(&status), &Attr::Null), value("active"));
        assert_eq!(choice_from_api(None, &Attr::Null), Attr::Null);
        assert_eq!(enum_from_api(Some("rear"), &Attr::Null), value("rear"));
        assert_eq!(bool_from_api(false), Attr::Value(false));
    }
}
