//! Render module - literal placeholder substitution
//!
//! Placeholders are plain substrings such as `__MERGED_TEMPLATE_CONTENT__`.
//! There is no syntax, escaping or evaluation: every occurrence of each
//! placeholder is replaced by its payload, in the order the pairs are given.
//! Later pairs operate on the output of earlier ones, so a payload that itself
//! contains a later placeholder will be expanded too.

/// Result of rendering a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Occurrences replaced per placeholder, in substitution order
    pub occurrences: Vec<(String, usize)>,
}

impl Rendered {
    /// Placeholders that did not occur at all
    pub fn unused_placeholders(&self) -> impl Iterator<Item = &str> {
        self.occurrences
            .iter()
            .filter(|(_, count)| *count == 0)
            .map(|(placeholder, _)| placeholder.as_str())
    }
}

/// Replace every occurrence of each placeholder with its payload
///
/// A placeholder that does not occur is a no-op. An empty placeholder is
/// skipped (config validation rejects it before it gets here).
pub fn render<P, T>(template: &str, payloads: &[(P, T)]) -> Rendered
where
    P: AsRef<str>,
    T: AsRef<str>,
{
    let mut text = template.to_string();
    let mut occurrences = Vec::with_capacity(payloads.len());

    for (placeholder, payload) in payloads {
        let placeholder = placeholder.as_ref();
        if placeholder.is_empty() {
            occurrences.push((String::new(), 0));
            continue;
        }

        let count = text.matches(placeholder).count();
        if count > 0 {
            text = text.replace(placeholder, payload.as_ref());
        }
        occurrences.push((placeholder.to_string(), count));
    }

    Rendered { text, occurrences }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let out = render("echo __X__", &[("__X__", "hello")]);
        assert_eq!(out.text, "echo hello");
        assert_eq!(out.occurrences, vec![("__X__".to_string(), 1)]);
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let out = render("__X__ and __X__ and __X__", &[("__X__", "T")]);
        assert_eq!(out.text, "T and T and T");
        assert_eq!(out.occurrences[0].1, 3);
        assert!(!out.text.contains("__X__"));
    }

    #[test]
    fn test_absent_placeholder_is_noop() {
        let out = render("echo plain", &[("__X__", "hello")]);
        assert_eq!(out.text, "echo plain");
        assert_eq!(out.unused_placeholders().collect::<Vec<_>>(), vec!["__X__"]);
    }

    #[test]
    fn test_literal_not_pattern() {
        // Regex metacharacters must be matched literally
        let out = render("a.*b a.*b axb", &[("a.*b", "Z")]);
        assert_eq!(out.text, "Z Z axb");
    }

    #[test]
    fn test_payload_inserted_verbatim() {
        let payload = "\\documentclass{beamer}\n$body$\n\\end{document}\n";
        let out = render(
            "cat <<'EOF'\n__MERGED_TEMPLATE_CONTENT__EOF\n",
            &[("__MERGED_TEMPLATE_CONTENT__", payload)],
        );
        assert_eq!(out.text, format!("cat <<'EOF'\n{}EOF\n", payload));
    }

    #[test]
    fn test_order_is_applied_sequentially() {
        // First payload introduces the second placeholder
        let out = render("[__A__]", &[("__A__", "__B__ __B__"), ("__B__", "b")]);
        assert_eq!(out.text, "[b b]");
        assert_eq!(
            out.occurrences,
            vec![("__A__".to_string(), 1), ("__B__".to_string(), 2)]
        );
    }

    #[test]
    fn test_two_independent_placeholders() {
        let out = render(
            "latex=__L__\nscript=__S__\n",
            &[("__L__", "tex"), ("__S__", "py")],
        );
        assert_eq!(out.text, "latex=tex\nscript=py\n");
        assert_eq!(out.unused_placeholders().count(), 0);
    }

    #[test]
    fn test_empty_placeholder_skipped() {
        let out = render("abc", &[("", "x")]);
        assert_eq!(out.text, "abc");
    }

    #[test]
    fn test_payload_length_changes_keep_positions() {
        let template = "x__P__y__P__z";
        let out = render(template, &[("__P__", "")]);
        assert_eq!(out.text, "xyz");
        let out = render(template, &[("__P__", "LONGER")]);
        assert_eq!(out.text, "xLONGERyLONGERz");
    }
}
