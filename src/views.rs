/// Escapes text for use inside an HTML attribute or element.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Renders the landing page, loading each component script in order.
pub fn render_home(scripts: &[String]) -> String {
    let script_tags: String = scripts
        .iter()
        .map(|src| format!("    <script src=\"{}\"></script>\n", escape_html(src)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Sentences</title>
  </head>
  <body>
    <main id="app">
      <h1>Sentences</h1>
      <p>Collect sentences from around the web, with the page they came from.</p>
    </main>
{script_tags}  </body>
</html>
"#
    )
}
