//! HTML roster page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined. Every piece
//! of student-supplied text is escaped before insertion.

use anyhow::{Context, Result};
use std::path::Path;

use roster_core::model::{Average, PerformanceRecord, Student};
use roster_core::notice::Notice;
use roster_core::store::{RosterStore, StudentDetail};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Percentage cell text, or `N/A` when there is nothing to average.
pub fn format_average(average: Option<Average>) -> String {
    match average {
        Some(avg) => format!("{avg}%"),
        None => "N/A".to_string(),
    }
}

/// One `<tr>` per student: ID, name, current form, latest average.
pub fn render_student_rows(store: &RosterStore) -> String {
    let mut rows = String::new();
    for student in store.iter() {
        rows.push_str(&format!(
            "<tr id=\"student-{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(student.id()),
            html_escape(student.id()),
            html_escape(student.name()),
            student.form(),
            format_average(student.average()),
        ));
    }
    rows
}

/// One `<tr>` per performance record, in entry order.
pub fn render_performance_history(student: &Student) -> String {
    render_records(student.performance())
}

fn render_records(records: &[PerformanceRecord]) -> String {
    if records.is_empty() {
        return "<tr><td colspan=\"6\" class=\"empty\">No performance records yet</td></tr>\n"
            .to_string();
    }

    let mut rows = String::new();
    for record in records {
        rows.push_str(&format!("<tr><td>{}</td>", record.form));
        for (_, score) in record.scores.iter() {
            rows.push_str(&format!("<td>{score}</td>"));
        }
        rows.push_str(&format!("<td>{}%</td></tr>\n", record.average()));
    }
    rows
}

/// Definition list for the single-student detail view.
pub fn render_student_detail(detail: &StudentDetail) -> String {
    let mut html = String::from("<dl class=\"detail\">\n");
    let fields = [
        ("Name", html_escape(&detail.name)),
        ("ID", html_escape(&detail.id)),
        ("Age", detail.age.to_string()),
        ("Gender", html_escape(&detail.gender)),
        ("Current Form", detail.form.to_string()),
        ("Total Performance Records", detail.record_count.to_string()),
        ("Latest Average", format_average(detail.average)),
    ];
    for (label, value) in fields {
        html.push_str(&format!("<dt>{label}</dt><dd>{value}</dd>\n"));
    }
    html.push_str("</dl>\n");
    html
}

pub fn render_notice(notice: &Notice) -> String {
    format!(
        "<div class=\"alert alert-{}\">{}</div>\n",
        notice.severity,
        html_escape(&notice.message)
    )
}

/// Generate the full roster page.
pub fn generate_html(store: &RosterStore, notices: &[Notice]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Student Roster</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");

    for notice in notices {
        html.push_str(&render_notice(notice));
    }

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Student Roster</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} student(s) | generated {}</p>\n",
        store.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Student table
    html.push_str("<section class=\"students\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table class=\"student-table\">\n");
    html.push_str("<thead><tr><th>ID</th><th>Name</th><th>Form</th><th>Average</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    html.push_str(&render_student_rows(store));
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-student detail and history
    for student in store.iter() {
        html.push_str("<section class=\"student\">\n");
        html.push_str(&format!(
            "<h3>Student: {} ({})</h3>\n",
            html_escape(student.name()),
            html_escape(student.id())
        ));
        html.push_str(&render_student_detail(&StudentDetail::from(student)));
        html.push_str("<table class=\"performance-table\">\n");
        html.push_str("<thead><tr><th>Form</th><th>Math</th><th>English</th><th>Science</th><th>Social</th><th>Average</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        html.push_str(&render_performance_history(student));
        html.push_str("</tbody></table>\n");
        html.push_str("</section>\n");
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Write the roster page to a file.
pub fn write_html_report(store: &RosterStore, notices: &[Notice], path: &Path) -> Result<()> {
    let html = generate_html(store, notices);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write roster page to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --success: #dcfce7; --error: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --success: #064e3b; --error: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.container { max-width: 960px; margin: 0 auto; }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
td.empty { text-align: center; }
.alert { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; }
.alert-success { background: var(--success); }
.alert-error { background: var(--error); }
dl.detail { display: grid; grid-template-columns: max-content auto; gap: 0.25rem 1rem; }
dt { font-weight: bold; }
dd { margin: 0; }
"#;
