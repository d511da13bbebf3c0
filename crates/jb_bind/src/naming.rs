//! Property naming strategies, mapping an identity name to a document key.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use serde::Deserialize;

/// A custom naming function. It must be pure: the same input always maps
/// to the same key, or documents stop round-tripping.
pub type NamingFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Translates identity property names into document keys.
///
/// # Examples
///
/// ```
/// use jb_bind::naming::NamingStrategy;
///
/// let s = NamingStrategy::LowerCaseWithUnderscores;
/// assert_eq!(s.translate("camelCaseProperty"), "camel_case_property");
///
/// let s = NamingStrategy::UpperCamelCaseWithSpaces;
/// assert_eq!(s.translate("upperCamelCase"), "Upper Camel Case");
///
/// let s = NamingStrategy::LowerCamelCase;
/// assert_eq!(s.translate("created_at"), "createdAt");
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamingStrategy {
    /// The identity name unchanged.
    #[default]
    Identity,
    /// `camelCase` to `camel_case`.
    LowerCaseWithUnderscores,
    /// `camelCase` to `camel-case`.
    LowerCaseWithDashes,
    /// `camelCase` to `CamelCase`.
    UpperCamelCase,
    /// `camelCase` to `Camel Case`.
    UpperCamelCaseWithSpaces,
    /// `snake_case` to `snakeCase`, leading underscores kept.
    LowerCamelCase,
    /// The identity name, matched against document keys ignoring case.
    CaseInsensitive,
    #[serde(skip_deserializing)]
    Custom(NamingFn),
}

impl NamingStrategy {
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn translate(&self, name: &str) -> String {
        match self {
            Self::Identity | Self::CaseInsensitive => String::from(name),
            Self::LowerCaseWithUnderscores => lower_case_with(name, '_'),
            Self::LowerCaseWithDashes => lower_case_with(name, '-'),
            Self::UpperCamelCase => upper_camel_case(name),
            Self::UpperCamelCaseWithSpaces => {
                let upper = upper_camel_case(name);
                let mut out = String::with_capacity(upper.len() * 2);
                let mut last = None;
                for c in upper.chars() {
                    if c.is_uppercase() && last.is_some_and(char::is_lowercase) {
                        out.push(' ');
                    }
                    last = Some(c);
                    out.push(c);
                }
                out
            }
            Self::LowerCamelCase => lower_camel_case(name),
            Self::Custom(f) => f(name),
        }
    }

    /// Whether document keys are compared ignoring case.
    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        matches!(self, Self::CaseInsensitive)
    }
}

fn lower_case_with(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    let mut last = None;
    for c in name.chars() {
        if c.is_uppercase() && last.is_some_and(char::is_lowercase) {
            out.push(separator);
        }
        last = Some(c);
        out.extend(c.to_lowercase());
    }
    out
}

fn upper_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_camel_case(name: &str) -> String {
    let body = name.trim_start_matches('_');
    let mut out = String::from(&name[..name.len() - body.len()]);
    let mut upper_next = false;
    for c in body.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Debug for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.pad("Identity"),
            Self::LowerCaseWithUnderscores => f.pad("LowerCaseWithUnderscores"),
            Self::LowerCaseWithDashes => f.pad("LowerCaseWithDashes"),
            Self::UpperCamelCase => f.pad("UpperCamelCase"),
            Self::UpperCamelCaseWithSpaces => f.pad("UpperCamelCaseWithSpaces"),
            Self::LowerCamelCase => f.pad("LowerCamelCase"),
            Self::CaseInsensitive => f.pad("CaseInsensitive"),
            Self::Custom(_) => f.pad("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::NamingStrategy;

    #[test]
    fn lower_case_with_separators() {
        let s = NamingStrategy::LowerCaseWithUnderscores;
        assert_eq!(s.translate("camelCaseProperty"), "camel_case_property");
        assert_eq!(s.translate("CamelcaseProperty"), "camelcase_property");
        assert_eq!(s.translate("_CamelCaseProperty"), "_camel_case_property");

        let s = NamingStrategy::LowerCaseWithDashes;
        assert_eq!(s.translate("-CamelCaseProperty"), "-camel-case-property");
        assert_eq!(s.translate("URLValue"), "urlvalue");
    }

    #[test]
    fn upper_camel_case() {
        let s = NamingStrategy::UpperCamelCase;
        assert_eq!(s.translate("upperCamelCase"), "UpperCamelCase");
        assert_eq!(s.translate(""), "");

        let s = NamingStrategy::UpperCamelCaseWithSpaces;
        assert_eq!(s.translate("upperCamelCase"), "Upper Camel Case");
        assert_eq!(
            s.translate("_startingWithUnderscoreProperty"),
            "_starting With Underscore Property"
        );
    }

    #[test]
    fn lower_camel_case() {
        let s = NamingStrategy::LowerCamelCase;
        assert_eq!(s.translate("str_field"), "strField");
        assert_eq!(s.translate("_private_value"), "_privateValue");
        assert_eq!(s.translate("plain"), "plain");
    }

    #[test]
    fn identity_and_custom() {
        assert_eq!(NamingStrategy::Identity.translate("strField"), "strField");
        assert!(NamingStrategy::CaseInsensitive.is_case_insensitive());

        let s = NamingStrategy::custom(|name| String::from(name) + "_x");
        assert_eq!(s.translate("a"), "a_x");
        assert_eq!(s.translate("a"), s.translate("a"));
    }

    #[test]
    fn deserialize_by_constant_name() {
        let s: NamingStrategy = serde_json::from_str("\"UPPER_CAMEL_CASE_WITH_SPACES\"").unwrap();
        assert!(matches!(s, NamingStrategy::UpperCamelCaseWithSpaces));
        assert!(serde_json::from_str::<NamingStrategy>("\"CUSTOM\"").is_err());
    }
}
