//! The default failure callback: plain-text usage on stderr.
//!
//! Deliberately does not exit the process — whether a failed resolution is
//! fatal belongs to the caller.

use heck::ToKebabCase;

use crate::field::FieldDescriptor;

/// Render the usage text: an optional error line, the script name, then one
/// line per field — required fields first (marked `*`), the rest in
/// registration order.
pub fn render_usage(
    script: &str,
    descriptors: &[FieldDescriptor],
    message: Option<&str>,
) -> String {
    let mut sorted: Vec<&FieldDescriptor> = descriptors.iter().collect();
    sorted.sort_by_key(|d| !d.required);

    let mut out = String::new();
    if let Some(message) = message {
        out.push_str(&format!("Error: {message}\n\n"));
    }
    out.push_str(&format!("{script}\n - Usage:\n"));
    for d in sorted {
        out.push_str(&format!(
            "    {} --{}\t-{}\t{}\n",
            if d.required { '*' } else { ' ' },
            d.long.to_kebab_case(),
            d.short,
            d.description.as_deref().unwrap_or(""),
        ));
    }
    out
}

/// Print [`render_usage`] output to stderr. This is the callback
/// [`resolve_os`](crate::resolve_os) uses.
pub fn print_usage(script: &str, descriptors: &[FieldDescriptor], message: Option<&str>) {
    eprint!("{}", render_usage(script, descriptors, message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::schema::Schema;

    fn descriptors() -> Vec<FieldDescriptor> {
        Schema::builder()
            .field(Field::new("what").description("what it does"))
            .field(Field::new("more").required().description("needed"))
            .build()
            .unwrap()
            .descriptors()
            .to_vec()
    }

    #[test]
    fn required_fields_sort_first() {
        let out = render_usage("script", &descriptors(), None);
        let more = out.find("--more").unwrap();
        let what = out.find("--what").unwrap();
        assert!(more < what);
        assert!(out.contains("* --more"));
    }

    #[test]
    fn message_renders_as_error_line() {
        let out = render_usage("script", &descriptors(), Some("boom"));
        assert!(out.starts_with("Error: boom\n"));
        assert!(out.contains("script\n - Usage:"));
    }

    #[test]
    fn no_message_starts_with_script() {
        let out = render_usage("script", &descriptors(), None);
        assert!(out.starts_with("script\n"));
    }

    #[test]
    fn camel_long_renders_kebab() {
        let ds = Schema::builder()
            .field(Field::new("whatThe"))
            .build()
            .unwrap()
            .descriptors()
            .to_vec();
        let out = render_usage("s", &ds, None);
        assert!(out.contains("--what-the"));
    }
}
