// ============================================================
// HTML PAGES
// ============================================================
// Server-rendered pages for the landing, about, dashboard and 404
// views. Kept as plain format! templates; the JSON endpoints carry
// the machine-readable surface.

use serde_json::Value;

use crate::application::dashboard::DashboardPage;

const STYLE: &str = r#"
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; color: #1c2733; }
  nav a { margin-right: 1rem; }
  table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
  th, td { border: 1px solid #c8d1da; padding: 0.35rem 0.6rem; text-align: left; }
  th { background: #eef3f7; }
  .stats { color: #51606e; margin-top: 0.5rem; }
  .error { color: #a40000; background: #ffecec; padding: 0.75rem; border-radius: 4px; }
  .pager { margin-top: 1rem; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/dashboard">Dashboard</a><a href="/about">About</a></nav>
{body}
</body>
</html>
"#
    )
}

pub fn index_page(model_loaded: bool) -> String {
    let mode = if model_loaded {
        "a trained model bundle"
    } else {
        "the built-in heuristic scorer"
    };
    layout(
        "Exoplanet Candidates",
        &format!(
            "<h1>Exoplanet Candidate Explorer</h1>\
             <p>Browse Kepler Objects of Interest, search across every column, \
             and score candidate feature sets.</p>\
             <p>Predictions currently use {mode}. POST a JSON feature object \
             to <code>/predict</code>.</p>"
        ),
    )
}

pub fn about_page() -> String {
    layout(
        "About",
        "<h1>About</h1>\
         <p>This service reads the KOI candidate table straight from disk on \
         every request and serves it with pagination and free-text search. \
         The classifier endpoint scores feature sets with a persisted linear \
         model when one is available, otherwise with a fixed heuristic over \
         signal-to-noise, transit duration, transit depth and planetary \
         radius.</p>",
    )
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        "<h1>404 &mdash; Page not found</h1>\
         <p>The page you are looking for does not exist. \
         <a href=\"/\">Back to the start.</a></p>",
    )
}

pub fn dashboard_page(view: &DashboardPage, error: Option<&str>) -> String {
    let mut body = String::from("<h1>Dashboard</h1>");

    if let Some(message) = error {
        body.push_str(&format!(
            "<p class=\"error\">{}</p>",
            escape(message)
        ));
        return layout("Dashboard", &body);
    }

    body.push_str(&format!(
        "<p class=\"stats\">{} rows &middot; {} columns &middot; page {} of {}</p>",
        view.stats.total_rows,
        view.stats.total_columns,
        view.stats.current_page,
        view.stats.total_pages
    ));

    body.push_str("<table><thead><tr>");
    for column in &view.columns {
        body.push_str(&format!("<th>{}</th>", escape(column)));
    }
    body.push_str("</tr></thead><tbody>");
    for row in &view.rows {
        body.push_str("<tr>");
        for column in &view.columns {
            let cell = row.get(column).map(value_text).unwrap_or_default();
            body.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        body.push_str("</tr>");
    }
    body.push_str("</tbody></table>");

    body.push_str("<p class=\"pager\">");
    if view.stats.current_page > 1 {
        body.push_str(&format!(
            "<a href=\"/dashboard?page={}\">&laquo; Previous</a> ",
            view.stats.current_page - 1
        ));
    }
    if view.stats.current_page < view.stats.total_pages {
        body.push_str(&format!(
            "<a href=\"/dashboard?page={}\">Next &raquo;</a>",
            view.stats.current_page + 1
        ));
    }
    body.push_str("</p>");

    layout("Dashboard", &body)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
