// Customer Dashboard - Chart Widgets
// Bar and doughnut widgets built from aggregates, updated in place

use crate::aggregate::Aggregate;
use crate::palette::{self, Rgba};
use serde::Serialize;
use serde_json::{json, Value};

pub const SERIES_LABEL: &str = "Total Salary Amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

impl ChartKind {
    /// Id of the canvas this chart is drawn on
    pub fn target_id(&self) -> &'static str {
        match self {
            ChartKind::Bar => "barchart",
            ChartKind::Doughnut => "doughnut",
        }
    }
}

/// The single data series each chart carries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub border_width: u32,
    pub background_color: Vec<Rgba>,
    pub border_color: Vec<Rgba>,
}

/// A constructed chart. Lives inside a `ChartSlot` and is mutated on refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartWidget {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: ChartSeries,
}

impl ChartWidget {
    pub fn new(kind: ChartKind, aggregates: &[Aggregate]) -> Self {
        let mut widget = Self {
            kind,
            labels: Vec::new(),
            series: ChartSeries {
                label: SERIES_LABEL.to_string(),
                data: Vec::new(),
                border_width: 1,
                background_color: Vec::new(),
                border_color: Vec::new(),
            },
        };
        widget.set_data(aggregates);
        widget
    }

    /// Replace labels, values and colours; series label and kind are kept
    pub fn set_data(&mut self, aggregates: &[Aggregate]) {
        let count = aggregates.len();
        self.labels = aggregates.iter().map(|a| a.name.clone()).collect();
        self.series.data = aggregates.iter().map(|a| a.total).collect();
        self.series.background_color = palette::fill_colors(count);
        self.series.border_color = palette::border_colors(count);
    }

    /// Tooltip text for category `index`, if it exists
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let category = self.labels.get(index)?;
        let value = self.series.data.get(index)?;
        Some(tooltip_label(&self.series.label, *value, category))
    }

    /// Chart.js configuration object for this widget
    pub fn config(&self) -> Value {
        let mut options = json!({});
        if self.kind == ChartKind::Bar {
            options = json!({ "scales": { "y": { "beginAtZero": true } } });
        }

        json!({
            "type": self.kind,
            "data": {
                "labels": self.labels,
                "datasets": [self.series],
            },
            "options": options,
        })
    }
}

/// `"<series>: <value> (<category>)"`, without the series prefix when the
/// series has no name
pub fn tooltip_label(series: &str, value: f64, category: &str) -> String {
    let mut label = String::new();
    if !series.is_empty() {
        label.push_str(series);
        label.push_str(": ");
    }
    label.push_str(&value.to_string());
    label.push_str(&format!(" ({})", category));
    label
}

// ============================================================================
// CHART SLOT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Constructed,
    Updated,
}

/// Optional handle to a chart: empty until the first render
#[derive(Debug)]
pub struct ChartSlot {
    kind: ChartKind,
    widget: Option<ChartWidget>,
}

impl ChartSlot {
    pub fn new(kind: ChartKind) -> Self {
        Self { kind, widget: None }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn widget(&self) -> Option<&ChartWidget> {
        self.widget.as_ref()
    }

    /// Construct the widget on first use, otherwise update the existing one
    pub fn upsert(&mut self, aggregates: &[Aggregate]) -> Upsert {
        match self.widget.as_mut() {
            Some(widget) => {
                widget.set_data(aggregates);
                Upsert::Updated
            }
            None => {
                self.widget = Some(ChartWidget::new(self.kind, aggregates));
                Upsert::Constructed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregates(items: &[(&str, f64)]) -> Vec<Aggregate> {
        items
            .iter()
            .map(|(name, total)| Aggregate { name: name.to_string(), total: *total })
            .collect()
    }

    #[test]
    fn test_tooltip_label_format() {
        assert_eq!(
            tooltip_label("Total Salary Amount", 5.0, "Amy"),
            "Total Salary Amount: 5 (Amy)"
        );
        assert_eq!(tooltip_label("", 12.5, "Bob"), "12.5 (Bob)");
    }

    #[test]
    fn test_widget_tooltip_by_index() {
        let widget = ChartWidget::new(ChartKind::Bar, &aggregates(&[("Amy", 5.0), ("Bob", 10.0)]));

        assert_eq!(widget.tooltip(1).as_deref(), Some("Total Salary Amount: 10 (Bob)"));
        assert_eq!(widget.tooltip(2), None);
    }

    #[test]
    fn test_upsert_constructs_then_updates() {
        let mut slot = ChartSlot::new(ChartKind::Doughnut);
        assert!(slot.widget().is_none());

        assert_eq!(slot.upsert(&aggregates(&[("Bob", 10.0)])), Upsert::Constructed);
        assert_eq!(
            slot.upsert(&aggregates(&[("Amy", 5.0), ("Bob", 10.0)])),
            Upsert::Updated
        );

        let widget = slot.widget().unwrap();
        assert_eq!(widget.labels, vec!["Amy", "Bob"]);
        assert_eq!(widget.series.data, vec![5.0, 10.0]);
        assert_eq!(widget.series.background_color.len(), 2);
        assert_eq!(widget.series.border_color.len(), 2);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let data = aggregates(&[("Amy", 5.0), ("Bob", 10.0)]);
        let mut slot = ChartSlot::new(ChartKind::Bar);

        slot.upsert(&data);
        let first = slot.widget().cloned();
        slot.upsert(&data);

        assert_eq!(slot.widget().cloned(), first);
    }

    #[test]
    fn test_bar_config() {
        let widget = ChartWidget::new(ChartKind::Bar, &aggregates(&[("Amy", 5.0)]));
        let config = widget.config();

        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"][0], "Amy");
        assert_eq!(config["data"]["datasets"][0]["label"], SERIES_LABEL);
        assert_eq!(config["data"]["datasets"][0]["data"][0], 5.0);
        assert_eq!(config["data"]["datasets"][0]["borderWidth"], 1);
        assert_eq!(
            config["data"]["datasets"][0]["backgroundColor"][0],
            "rgba(255, 99, 132, 0.2)"
        );
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn test_doughnut_config_has_no_axes() {
        let widget = ChartWidget::new(ChartKind::Doughnut, &aggregates(&[("Amy", 5.0)]));
        let config = widget.config();

        assert_eq!(config["type"], "doughnut");
        assert!(config["options"].get("scales").is_none());
    }

    #[test]
    fn test_target_ids() {
        assert_eq!(ChartKind::Bar.target_id(), "barchart");
        assert_eq!(ChartKind::Doughnut.target_id(), "doughnut");
    }
}
