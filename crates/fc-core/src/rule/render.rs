//! Client-side enforcement fragments.
//!
//! Each surviving rule renders one `fc.*` statement against the manager's
//! form API; the resolver concatenates them (rank order) into a single
//! deferred-execution block.

use crate::object::Value;
use crate::rule::coerce;
use crate::rule::model::{Rule, RuleKind};

/// Render the enforcement fragment for one rule. May be empty.
pub(crate) fn fragment(rule: &Rule) -> String {
    match rule.kind {
        RuleKind::FieldDefault => format!(
            "fc.setFieldValue({}, {});",
            js_str(&rule.field),
            js_value(&rule.value),
        ),
        RuleKind::FieldVisible => format!(
            "fc.setFieldVisible({}, {});",
            js_str(&rule.field),
            js_bool(&rule.value),
        ),
        RuleKind::FieldTitle => format!(
            "fc.setFieldLabel({}, {});",
            js_str(&rule.field),
            js_str(&rule.value.to_string()),
        ),
        RuleKind::TabVisible => format!(
            "fc.setTabVisible({}, {});",
            js_str(&rule.field),
            js_bool(&rule.value),
        ),
        RuleKind::TabTitle => format!(
            "fc.setTabTitle({}, {});",
            js_str(&rule.field),
            js_str(&rule.value.to_string()),
        ),
    }
}

/// Wrap the collected fragments in a single deferred-execution script block.
pub(crate) fn wrap_deferred(fragments: &[String]) -> String {
    let mut out = String::from(
        "<script type=\"text/javascript\">\ndocument.addEventListener(\"DOMContentLoaded\", function() {\n",
    );
    for fragment in fragments {
        out.push_str("    ");
        out.push_str(fragment);
        out.push('\n');
    }
    out.push_str("});\n</script>");
    out
}

fn js_value(value: &Value) -> String {
    match value {
        Value::Str(s) => js_str(s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
    }
}

fn js_bool(value: &Value) -> &'static str {
    if coerce::truthy(value) { "true" } else { "false" }
}

fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_in_labels() {
        assert_eq!(js_str(r#"say "hi""#), r#""say \"hi\"""#);
    }

    #[test]
    fn wrapper_is_deferred() {
        let block = wrap_deferred(&["fc.setTabVisible(\"settings\", false);".to_string()]);
        assert!(block.starts_with("<script"));
        assert!(block.contains("DOMContentLoaded"));
        assert!(block.contains("fc.setTabVisible(\"settings\", false);"));
        assert!(block.ends_with("</script>"));
    }
}
