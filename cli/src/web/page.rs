//! HTML rendering of the environment status page.

use kubedash_common::EnvironmentInfo;

const UNAVAILABLE: &str = "unavailable";

/// Render the status page for `env`.
#[must_use]
pub fn render_index(env: &EnvironmentInfo) -> String {
    let docker = display(&env.docker_version);
    let compose = display(&env.docker_compose_version);
    let kube = display(env.kube_version.as_deref().unwrap_or_default());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>kubedash</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; }}
    td, th {{ padding: 0.4rem 1rem; border-bottom: 1px solid #ddd; text-align: left; }}
  </style>
</head>
<body>
  <h1>kubedash</h1>
  <table>
    <tr><th>Docker</th><td id="docker-version">{docker}</td></tr>
    <tr><th>Docker Compose</th><td id="compose-version">{compose}</td></tr>
    <tr><th>Kubernetes</th><td id="kube-version">{kube}</td></tr>
  </table>
  <form action="/search" method="get">
    <input name="container" placeholder="image name">
    <button type="submit">Search containers</button>
  </form>
</body>
</html>
"#
    )
}

fn display(value: &str) -> String {
    if value.is_empty() {
        UNAVAILABLE.to_string()
    } else {
        escape(value)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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
