//! Minimal server-side HTML rendering
//!
//! Pages are plain `format!` templates around a shared layout.

/// Escape text for use inside HTML element content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` in the shared page layout with a navigation bar
///
/// `nav` holds `(href, label)` pairs. `body` is inserted verbatim.
pub fn layout(title: &str, nav: &[(&str, &str)], body: &str) -> String {
    let links: String = nav
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, escape(href), escape(label)))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: sans-serif; margin: 2em; }}
        nav {{ margin-bottom: 1.5em; }}
        table {{ border-collapse: collapse; }}
        th, td {{ border: 1px solid #ddd; padding: 6px 10px; text-align: left; }}
        th {{ background-color: #667eea; color: white; }}
        .flash {{ color: #b00020; white-space: pre-line; border: 1px solid #b00020; padding: 0.5em; }}
        .notice {{ color: #555; font-style: italic; }}
        label {{ display: block; margin-top: 0.6em; }}
    </style>
</head>
<body>
    <nav>{links}</nav>
    <h1>{title}</h1>
    {body}
</body>
</html>"#,
        title = escape(title),
        links = links,
        body = body,
    )
}

/// Render accumulated validation messages, one per line
pub fn flash(messages: &str) -> String {
    if messages.trim().is_empty() {
        return String::new();
    }
    format!(r#"<div class="flash">{}</div>"#, escape(messages.trim_end()))
}

/// `<option>` list; `selected` is compared against each value
pub fn options<'a, I>(choices: I, selected: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    choices
        .into_iter()
        .map(|(value, label)| {
            let mark = if value == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                mark,
                escape(label)
            )
        })
        .collect()
}
