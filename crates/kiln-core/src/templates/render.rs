//! Placeholder substitution for template payloads

use indexmap::IndexMap;

/// Default placeholder delimiter, used as both prefix and suffix: `@@key@@`
pub const DEFAULT_DELIMITER: &str = "@@";

/// Render a template with the default `@@key@@` placeholders
pub fn render(template: &str, context: &IndexMap<String, String>) -> String {
    render_with(template, context, DEFAULT_DELIMITER, DEFAULT_DELIMITER)
}

/// Render a template with custom placeholder delimiters
///
/// Every occurrence of `prefix + key + suffix` is replaced by the key's
/// value, one key at a time in the context's insertion order, against the
/// progressively rewritten string. A value that contains another key's
/// token is therefore itself substituted when that later key is processed.
/// Placeholders without a matching key are left untouched, and there is no
/// escape mechanism: callers pick delimiters that cannot collide with
/// payload text.
pub fn render_with(
    template: &str,
    context: &IndexMap<String, String>,
    prefix: &str,
    suffix: &str,
) -> String {
    let mut rendered = template.to_string();
    for (key, value) in context {
        let token = format!("{}{}{}", prefix, key, suffix);
        rendered = rendered.replace(&token, value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_placeholder() {
        let out = render("Hello @@name@@", &context(&[("name", "World")]));
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let out = render("@@a@@@@b@@", &context(&[("a", "X"), ("b", "Y")]));
        assert_eq!(out, "XY");
    }

    #[test]
    fn test_repeated_key_replaced_globally() {
        let out = render(
            "@@id@@/src/@@id@@.java",
            &context(&[("id", "demo")]),
        );
        assert_eq!(out, "demo/src/demo.java");
    }

    #[test]
    fn test_unknown_placeholder_left_untouched() {
        let out = render("Hello @@missing@@", &context(&[("name", "World")]));
        assert_eq!(out, "Hello @@missing@@");
    }

    #[test]
    fn test_empty_context_is_noop() {
        let rendered = render("Hello @@name@@", &context(&[("name", "World")]));
        assert_eq!(render(&rendered, &context(&[])), rendered);
    }

    #[test]
    fn test_custom_delimiters() {
        let out = render_with(
            "Hello {{name}}",
            &context(&[("name", "World")]),
            "{{",
            "}}",
        );
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn test_chained_substitution_follows_insertion_order() {
        // A value containing a later key's token gets rewritten in turn.
        let out = render(
            "@@a@@",
            &context(&[("a", "@@b@@"), ("b", "deep")]),
        );
        assert_eq!(out, "deep");

        // Reversed order leaves the inner token alone: "b" was already done.
        let out = render(
            "@@a@@",
            &context(&[("b", "deep"), ("a", "@@b@@")]),
        );
        assert_eq!(out, "@@b@@");
    }
}
