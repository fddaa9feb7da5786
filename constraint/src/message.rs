//! Violation message resolution.

use veto_core::{Attributes, Value};

use crate::validators::scalar_text;

/// Interpolate a message template.
///
/// `{validatedValue}` renders the checked value; `{name}` renders the
/// attachment parameter of that name. Unknown placeholders are left as-is.
pub(crate) fn interpolate(
    template: &str,
    value: Option<&Value>,
    params: &Attributes,
) -> String {
    let mut message = template.to_string();
    if let Some(value) = value {
        message = message.replace("{validatedValue}", &render(value));
    }
    for (name, param) in params {
        message = message.replace(&format!("{{{}}}", name), &render(param));
    }
    message
}

/// Render a value for a message: raw text, with empty values shown
/// as `<empty>`.
fn render(value: &Value) -> String {
    let text = scalar_text(value);
    if text.is_empty() {
        "<empty>".to_string()
    } else {
        text
    }
}
