//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` references in `value`, resolving names through `lookup`.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Expanded values are not expanded again.
pub(crate) fn expand_env(
    value: &str,
    field: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match lookup(var) {
            Some(val) => Ok(Some(val)),
            None => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

/// Name of a variable with no value and no default.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn test_expand_simple_var() {
        let result = expand_env("${TITLE}", "site.site_title", &env(&[("TITLE", "hello")])).unwrap();
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        let result = expand_env("${THEME:-plain}", "site.theme", &env(&[("THEME", "dark")])).unwrap();
        assert_eq!(result, "dark");
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        let result = expand_env("${THEME:-fallback}", "site.theme", &env(&[])).unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_missing_var_error() {
        let err = expand_env("${CIRCULATE_MISSING}", "site.site_url", &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CIRCULATE_MISSING"));
        assert!(err.to_string().contains("site.site_url"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("My Site", "site.site_title", &env(&[])).unwrap();
        assert_eq!(result, "My Site");
    }

    #[test]
    fn test_expand_embedded_var() {
        let result = expand_env(
            "https://${HOST}/blog",
            "site.site_url",
            &env(&[("HOST", "example.com")]),
        )
        .unwrap();
        assert_eq!(result, "https://example.com/blog");
    }

    #[test]
    fn test_expanded_value_keeps_braces() {
        let result = expand_env(
            "${TITLE}",
            "site.site_title",
            &env(&[("TITLE", "Costs ${price}")]),
        )
        .unwrap();
        assert_eq!(result, "Costs ${price}");
    }

    #[test]
    fn test_default_with_braces_is_literal() {
        let result = expand_env("${UNSET:-${literal}}", "site.site_title", &env(&[])).unwrap();
        assert_eq!(result, "${literal}");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "site.site_url", &env(&[])).unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
