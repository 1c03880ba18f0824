//! Placeholder substitution for subject lines.
//!
//! Supports exactly two placeholder spellings: `{{ name }}` (one space on
//! each side) and `{{name}}`. There is no escaping, no filters and no
//! nesting. Unknown placeholders are left as written.

use crate::variables::TemplateVariables;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute variables into `template`.
///
/// The template is scanned once, left to right. Substituted values are
/// copied to the output as-is and never scanned again, so a value that
/// contains placeholder text is not expanded.
///
/// ```
/// use loops_action::{render, TemplateVariables};
///
/// let vars: TemplateVariables = [("name", "Sam")].into_iter().collect();
/// assert_eq!(render("Hi {{ name }}, {{name}} again", &vars), "Hi Sam, Sam again");
/// assert_eq!(render("Hi {{ unknown }}", &vars), "Hi {{ unknown }}");
/// ```
pub fn render(template: &str, variables: &TemplateVariables) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match substitute(candidate, variables) {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &candidate[consumed..];
            }
            None => {
                // Skip one brace so overlapping openers like "{{{x}}}" still match.
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Try to match a placeholder at the start of `s` (which begins with `{{`).
///
/// Returns the replacement value and the number of bytes consumed.
fn substitute<'v>(s: &str, variables: &'v TemplateVariables) -> Option<(&'v str, usize)> {
    let inner_start = OPEN.len();
    let close = s[inner_start..].find(CLOSE)? + inner_start;
    let inner = &s[inner_start..close];

    let name = match inner.strip_prefix(' ').and_then(|n| n.strip_suffix(' ')) {
        Some(spaced) => spaced,
        None => inner,
    };

    variables
        .get(name)
        .map(|value| (value, close + CLOSE.len()))
}
