// ABOUTME: Decoding of settings form submissions
// ABOUTME: Maps namespaced urlencoded fields (name[key], name[key][]) to a raw submission

use tracing::debug;
use url::form_urlencoded;

use crate::types::{RawSubmission, SettingValue};

/// Decode an `application/x-www-form-urlencoded` body.
///
/// `name[key]=v` sets a scalar (the last occurrence wins) and
/// `name[key][]=v` appends to a list. Fields outside the `settings_name`
/// namespace are not part of the settings object and are skipped.
pub fn decode_form(settings_name: &str, body: &str) -> RawSubmission {
    let mut raw = RawSubmission::new();

    for (field, value) in form_urlencoded::parse(body.as_bytes()) {
        let Some((key, is_list)) = option_key(settings_name, &field) else {
            debug!("Ignoring form field outside {}: {}", settings_name, field);
            continue;
        };

        if is_list {
            match raw.get_mut(key) {
                Some(SettingValue::List(items)) => items.push(value.into_owned()),
                _ => {
                    raw.insert(key.to_string(), SettingValue::List(vec![value.into_owned()]));
                }
            }
        } else {
            raw.insert(key.to_string(), SettingValue::Text(value.into_owned()));
        }
    }

    raw
}

/// Split `name[key]` / `name[key][]` into the option key and whether it is a list
fn option_key<'a>(settings_name: &str, field: &'a str) -> Option<(&'a str, bool)> {
    let inner = field.strip_prefix(settings_name)?.strip_prefix('[')?;

    let (key, is_list) = match inner.strip_suffix("][]") {
        Some(key) => (key, true),
        None => (inner.strip_suffix(']')?, false),
    };

    if key.is_empty() || key.contains(['[', ']']) {
        return None;
    }
    Some((key, is_list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_decode_scalar_and_list_fields() {
        let body = "opts%5Bsend_to%5D=a%40x.com%2C+b%40x.com\
                    &opts%5Bsend_to_users%5D%5B%5D=administrator\
                    &opts%5Bsend_to_users%5D%5B%5D=editor\
                    &opts%5Bbody_post%5D=%3Cp%3E%7Btitle%7D%3C%2Fp%3E";

        let raw = decode_form("opts", body);

        assert_eq!(raw.len(), 3);
        assert_eq!(raw["send_to"], SettingValue::from("a@x.com, b@x.com"));
        assert_eq!(
            raw["send_to_users"],
            SettingValue::from(vec!["administrator", "editor"])
        );
        assert_eq!(raw["body_post"], SettingValue::from("<p>{title}</p>"));
    }

    #[test]
    fn test_decode_ignores_fields_outside_namespace() {
        let raw = decode_form(
            "opts",
            "option_page=opts&_wpnonce=abc&other%5Bsend_to%5D=x&opts%5Bsend_to%5D=y",
        );
        assert_eq!(raw.len(), 1);
        assert_eq!(raw["send_to"], SettingValue::from("y"));
    }

    #[test]
    fn test_last_scalar_wins() {
        let raw = decode_form("opts", "opts[subject_post]=one&opts[subject_post]=two");
        assert_eq!(raw["subject_post"], SettingValue::from("two"));
    }

    #[test]
    fn test_empty_body_decodes_to_empty_submission() {
        assert!(decode_form("opts", "").is_empty());
    }

    #[rstest]
    #[case("opts[send_to]", Some(("send_to", false)))]
    #[case("opts[send_to_users][]", Some(("send_to_users", true)))]
    #[case("opts[]", None)]
    #[case("opts[a][b]", None)]
    #[case("opts", None)]
    #[case("optsx[send_to]", None)]
    #[case("opts[send_to", None)]
    fn test_option_key(#[case] field: &str, #[case] expected: Option<(&str, bool)>) {
        assert_eq!(option_key("opts", field), expected);
    }
}
