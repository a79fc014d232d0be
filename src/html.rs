// Customer Dashboard - HTML Target
// The page served at `/`: table body, two canvases and the sort controls

use crate::chart::{ChartKind, ChartWidget};
use crate::dashboard::Dashboard;
use crate::view::{TableBody, TABLE_BODY_ID};

pub const SORT_BUTTON_ID: &str = "sort-button";
pub const AMOUNT_BUTTON_ID: &str = "amount-button";

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";

// Same format as `chart::tooltip_label`, run by Chart.js in the browser
const TOOLTIP_CALLBACK: &str = r#"function withTooltip(config) {
  config.options = config.options || {};
  config.options.plugins = { tooltip: { callbacks: { label: function (context) {
    let label = context.dataset.label || '';
    if (label) { label += ': '; }
    label += context.raw;
    label += ` (${context.label})`;
    return label;
  } } } };
  return config;
}"#;

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

/// Rows of `customer-table-body`, each with a nested transactions table
pub fn render_table_body(table: &TableBody) -> String {
    let mut html = String::new();

    for row in table.rows() {
        html.push_str(&format!(
            "<tr><th scope=\"row\">{}</th><td>{}</td><td><table class=\"table table-striped\"><tbody>",
            row.id,
            escape(&row.name)
        ));
        for tx in &row.transactions {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                tx.amount,
                escape(&tx.date)
            ));
        }
        html.push_str("</tbody></table></td></tr>\n");
    }

    html
}

/// `<script>` that draws `widget` on its canvas
pub fn render_chart_script(widget: &ChartWidget) -> String {
    // `</` must not appear inside a script element
    let config = widget.config().to_string().replace("</", "<\\/");
    format!(
        "<script>new Chart(document.getElementById('{}').getContext('2d'), withTooltip({}));</script>\n",
        widget.kind.target_id(),
        config
    )
}

/// The whole page. Charts that were never constructed get no script.
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Customer Transactions</title>\n");
    html.push_str(&format!("<script src=\"{}\"></script>\n", CHART_JS));
    html.push_str(&format!("<script>{}</script>\n", TOOLTIP_CALLBACK));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/sort/name\"><button id=\"{}\" type=\"submit\">Sort by name</button></form>\n",
        SORT_BUTTON_ID
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/sort/amount\"><button id=\"{}\" type=\"submit\">Sort by amount ({})</button></form>\n",
        AMOUNT_BUTTON_ID,
        dashboard.sort_order().label()
    ));

    html.push_str("<table class=\"table\">\n");
    html.push_str("<thead><tr><th scope=\"col\">ID</th><th scope=\"col\">Name</th><th scope=\"col\">Transactions</th></tr></thead>\n");
    html.push_str(&format!("<tbody id=\"{}\">\n", TABLE_BODY_ID));
    html.push_str(&render_table_body(dashboard.table()));
    html.push_str("</tbody>\n</table>\n");

    for kind in [ChartKind::Bar, ChartKind::Doughnut] {
        html.push_str(&format!("<canvas id=\"{}\"></canvas>\n", kind.target_id()));
    }
    for widget in dashboard.charts() {
        html.push_str(&render_chart_script(widget));
    }

    html.push_str("</body>\n</html>\n");
    html
}
