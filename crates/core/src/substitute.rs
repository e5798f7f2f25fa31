//! Placeholder substitution over finished markup.
//!
//! Placeholders are `{{name}}` or `{{name|upper}}`, with optional spaces
//! inside the braces. The scan is a single left-to-right pass over the input,
//! so substituted values are never themselves scanned for placeholders.

use std::collections::BTreeMap;

/// Placeholder name to literal value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    values: BTreeMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TokenMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TokenMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Value transformation named after `|` in a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    Upper,
}

impl Filter {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "upper" => Some(Filter::Upper),
            _ => None,
        }
    }

    fn apply(self, value: &str) -> String {
        match self {
            Filter::Upper => value.to_uppercase(),
        }
    }
}

/// Replaces placeholders with values from a [`TokenMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSubstitutor;

impl TokenSubstitutor {
    pub fn new() -> Self {
        Self
    }

    /// Substitute every recognized placeholder. Unknown names, unknown
    /// filters and malformed placeholders are left as written.
    pub fn substitute(&self, html: &str, tokens: &TokenMap) -> String {
        let mut output = String::with_capacity(html.len());
        let mut rest = html;

        while let Some(open) = rest.find("{{") {
            output.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let Some(close) = after_open.find("}}") else {
                output.push_str(&rest[open..]);
                return output;
            };

            match resolve(&after_open[..close], tokens) {
                Some(value) => {
                    output.push_str(&value);
                    rest = &after_open[close + 2..];
                }
                None => {
                    // Re-scan from the second brace so "{{{name}}}" still
                    // resolves the inner placeholder.
                    output.push('{');
                    rest = &rest[open + 1..];
                }
            }
        }

        output.push_str(rest);
        output
    }
}

fn resolve(placeholder: &str, tokens: &TokenMap) -> Option<String> {
    let (name, filter) = parse(placeholder)?;
    let value = tokens.get(name)?;
    Some(match filter {
        Some(filter) => filter.apply(value),
        None => value.to_string(),
    })
}

/// Name and filter of a placeholder body, the text between the braces.
fn parse(placeholder: &str) -> Option<(&str, Option<Filter>)> {
    let (name, filter) = match placeholder.split_once('|') {
        Some((name, filter)) => (name.trim(), Some(Filter::parse(filter.trim())?)),
        None => (placeholder.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_name_char) {
        return None;
    }
    Some((name, filter))
}

/// Byte length of the well-formed placeholder `text` starts with, if any.
pub(crate) fn placeholder_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix("{{")?;
    let close = body.find("}}")?;
    parse(&body[..close])?;
    Some(close + 4)
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')
}

/// Substitute with the default substitutor.
pub fn substitute(html: &str, tokens: &TokenMap) -> String {
    TokenSubstitutor.substitute(html, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenMap {
        TokenMap::new()
            .with("company_name", "Acme Widgets")
            .with("effective_date", "January 1, 2026")
    }

    #[test]
    fn test_replaces_known_placeholders() {
        assert_eq!(
            substitute(
                "<p>Adopted by {{company_name}} effective {{effective_date}}.</p>",
                &tokens()
            ),
            "<p>Adopted by Acme Widgets effective January 1, 2026.</p>"
        );
    }

    #[test]
    fn test_inner_whitespace_tolerated() {
        assert_eq!(substitute("{{ company_name }}", &tokens()), "Acme Widgets");
        assert_eq!(substitute("{{company_name | upper}}", &tokens()), "ACME WIDGETS");
    }

    #[test]
    fn test_upper_filter() {
        assert_eq!(substitute("{{company_name|upper}}", &tokens()), "ACME WIDGETS");
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let input = "{{plan_year}} and {{company_name|lower}} and {{ }} and {{not a name}}";
        assert_eq!(substitute(input, &tokens()), input);
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(
            substitute("{{company_name}} then {{effective_date", &tokens()),
            "Acme Widgets then {{effective_date"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let tokens = TokenMap::new()
            .with("company_name", "{{effective_date}}")
            .with("effective_date", "2026");
        assert_eq!(substitute("{{company_name}}", &tokens), "{{effective_date}}");
    }

    #[test]
    fn test_extra_braces() {
        assert_eq!(substitute("{{{company_name}}}", &tokens()), "{Acme Widgets}");
    }

    #[test]
    fn test_placeholder_inside_redline_markup() {
        let html = "<ins class=\"redline-ins\">{{company_name}} sponsors</ins>";
        assert_eq!(
            substitute(html, &tokens()),
            "<ins class=\"redline-ins\">Acme Widgets sponsors</ins>"
        );
    }

    #[test]
    fn test_placeholder_len() {
        assert_eq!(placeholder_len("{{ company_name }}."), Some(18));
        assert_eq!(placeholder_len("{{name|upper}}"), Some(14));
        assert_eq!(placeholder_len("{{not a name}}"), None);
        assert_eq!(placeholder_len("{{name|lower}}"), None);
        assert_eq!(placeholder_len("{{name"), None);
        assert_eq!(placeholder_len("name}}"), None);
    }

    #[test]
    fn test_token_map_collects() {
        let map: TokenMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b"), Some("2"));
        assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
