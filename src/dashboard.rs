// Customer Dashboard - Controller
// Owns the store, the table body and both chart handles. Every mutation
// goes through here and is followed by a full re-render.

use crate::aggregate::{compute_totals, Aggregate};
use crate::chart::{ChartKind, ChartSlot, ChartWidget, Upsert};
use crate::error::LoadError;
use crate::model::{Dataset, SortOrder};
use crate::source::DataSource;
use crate::store::DataStore;
use crate::view::TableBody;
use tracing::{debug, error, info};

pub struct Dashboard {
    store: DataStore,
    table: TableBody,
    bar: ChartSlot,
    doughnut: ChartSlot,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            store: DataStore::new(),
            table: TableBody::new(),
            bar: ChartSlot::new(ChartKind::Bar),
            doughnut: ChartSlot::new(ChartKind::Doughnut),
        }
    }

    /// Fetch from `source` and render. Failures are logged and swallowed;
    /// the previous state stays on screen. Returns whether the load succeeded.
    pub fn load(&mut self, source: &dyn DataSource) -> bool {
        let result = self.store.load(source);
        self.finish_load(&source.location(), result)
    }

    /// Same as `load` for a fetch that already happened elsewhere
    pub fn apply_fetch(&mut self, location: &str, fetched: Result<Dataset, LoadError>) -> bool {
        let result = fetched.map(|dataset| self.store.replace(dataset));
        self.finish_load(location, result)
    }

    fn finish_load(&mut self, location: &str, result: Result<(), LoadError>) -> bool {
        match result {
            Ok(()) => {
                info!(
                    source = %location,
                    customers = self.store.customers().len(),
                    transactions = self.store.transactions().len(),
                    "loaded customer data"
                );
                self.refresh();
                true
            }
            Err(e) => {
                error!(source = %location, error = %e, "error loading data");
                false
            }
        }
    }

    /// `sort-button`
    pub fn sort_customers_by_name(&mut self) {
        self.store.sort_customers_by_name();
        debug!("sorted customers by name");
        self.refresh();
    }

    /// `amount-button`: sort by the current direction, then flip it
    pub fn toggle_amount_sort(&mut self) -> SortOrder {
        let applied = self.store.toggle_amount_sort();
        debug!(order = applied.label(), "sorted transactions by amount");
        self.refresh();
        applied
    }

    /// Re-derive aggregates and redraw the table and both charts
    pub fn refresh(&mut self) {
        let aggregates = self.aggregates();
        self.table
            .render(self.store.customers(), self.store.transactions());

        for slot in [&mut self.bar, &mut self.doughnut] {
            let outcome = slot.upsert(&aggregates);
            if outcome == Upsert::Constructed {
                debug!(chart = slot.kind().target_id(), "constructed chart");
            }
        }
    }

    pub fn aggregates(&self) -> Vec<Aggregate> {
        compute_totals(self.store.customers(), self.store.transactions())
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn table(&self) -> &TableBody {
        &self.table
    }

    pub fn bar_chart(&self) -> Option<&ChartWidget> {
        self.bar.widget()
    }

    pub fn doughnut_chart(&self) -> Option<&ChartWidget> {
        self.doughnut.widget()
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartWidget> {
        self.bar.widget().into_iter().chain(self.doughnut.widget())
    }

    pub fn sort_order(&self) -> SortOrder {
        self.store.sort_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Transaction};

    struct Fixed(Dataset);

    impl DataSource for Fixed {
        fn fetch(&self) -> Result<Dataset, LoadError> {
            Ok(self.0.clone())
        }

        fn location(&self) -> String {
            "customer.json".to_string()
        }
    }

    struct Unreachable;

    impl DataSource for Unreachable {
        fn fetch(&self) -> Result<Dataset, LoadError> {
            Err(LoadError::Network {
                location: "customer.json".to_string(),
                message: "simulated network error".to_string(),
            })
        }

        fn location(&self) -> String {
            "customer.json".to_string()
        }
    }

    fn tx(customer_id: i64, amount: f64, date: &str) -> Transaction {
        Transaction { customer_id, amount, date: date.to_string() }
    }

    fn scenario_one() -> Dataset {
        Dataset {
            customers: vec![
                Customer { id: 1, name: "Bob".to_string() },
                Customer { id: 2, name: "Amy".to_string() },
            ],
            transactions: vec![tx(1, 10.0, "2021-01-01"), tx(2, 5.0, "2021-01-02")],
        }
    }

    fn loaded(dataset: Dataset) -> Dashboard {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.load(&Fixed(dataset)));
        dashboard
    }

    fn totals(dashboard: &Dashboard) -> Vec<(String, f64)> {
        dashboard
            .aggregates()
            .into_iter()
            .map(|a| (a.name, a.total))
            .collect()
    }

    #[test]
    fn test_load_renders_table_and_charts() {
        let dashboard = loaded(scenario_one());

        assert_eq!(dashboard.table().rows().len(), 2);
        assert_eq!(dashboard.bar_chart().unwrap().labels, vec!["Bob", "Amy"]);
        assert_eq!(dashboard.doughnut_chart().unwrap().series.data, vec![10.0, 5.0]);
        assert_eq!(dashboard.charts().count(), 2);
    }

    #[test]
    fn test_name_sort_scenario() {
        let mut dashboard = loaded(scenario_one());

        dashboard.sort_customers_by_name();

        assert_eq!(
            totals(&dashboard),
            vec![("Amy".to_string(), 5.0), ("Bob".to_string(), 10.0)]
        );
        // All three views follow the new order
        assert_eq!(dashboard.table().rows()[0].name, "Amy");
        assert_eq!(dashboard.table().rows()[0].transactions[0].amount, 5.0);
        assert_eq!(dashboard.bar_chart().unwrap().labels, vec!["Amy", "Bob"]);
        assert_eq!(dashboard.doughnut_chart().unwrap().series.data, vec![5.0, 10.0]);
    }

    #[test]
    fn test_amount_toggle_scenario() {
        let mut dashboard = loaded(Dataset {
            customers: vec![Customer { id: 1, name: "Bob".to_string() }],
            transactions: vec![
                tx(1, 30.0, "2021-01-01"),
                tx(1, 10.0, "2021-01-02"),
                tx(1, 20.0, "2021-01-03"),
            ],
        });
        assert_eq!(dashboard.sort_order(), SortOrder::Ascending);

        let amounts = |d: &Dashboard| -> Vec<f64> {
            d.table().rows()[0].transactions.iter().map(|t| t.amount).collect()
        };

        assert_eq!(dashboard.toggle_amount_sort(), SortOrder::Ascending);
        assert_eq!(amounts(&dashboard), vec![10.0, 20.0, 30.0]);

        assert_eq!(dashboard.toggle_amount_sort(), SortOrder::Descending);
        assert_eq!(amounts(&dashboard), vec![30.0, 20.0, 10.0]);

        // Totals do not depend on transaction order
        assert_eq!(totals(&dashboard), vec![("Bob".to_string(), 60.0)]);
    }

    #[test]
    fn test_orphan_transaction_scenario() {
        let mut dataset = scenario_one();
        dataset.transactions.push(tx(3, 500.0, "2021-01-05"));
        let dashboard = loaded(dataset);

        assert_eq!(
            totals(&dashboard),
            vec![("Bob".to_string(), 10.0), ("Amy".to_string(), 5.0)]
        );
        assert!(dashboard
            .table()
            .rows()
            .iter()
            .all(|row| row.transactions.iter().all(|t| t.amount != 500.0)));
    }

    #[test]
    fn test_failed_fetch_scenario() {
        let mut dashboard = Dashboard::new();

        assert!(!dashboard.load(&Unreachable));

        assert!(dashboard.store().customers().is_empty());
        assert!(dashboard.store().transactions().is_empty());
        assert!(dashboard.table().is_empty());
        assert!(dashboard.bar_chart().is_none());
        assert!(dashboard.doughnut_chart().is_none());
    }

    #[test]
    fn test_failed_reload_keeps_previous_view() {
        let mut dashboard = loaded(scenario_one());
        let before = dashboard.table().clone();

        assert!(!dashboard.load(&Unreachable));

        assert_eq!(dashboard.table(), &before);
        assert_eq!(dashboard.bar_chart().unwrap().labels.len(), 2);
    }

    #[test]
    fn test_apply_fetch_matches_load() {
        let mut dashboard = Dashboard::new();

        assert!(dashboard.apply_fetch("customer.json", Ok(scenario_one())));
        assert_eq!(dashboard.table().rows().len(), 2);

        let failed = Unreachable.fetch();
        assert!(!dashboard.apply_fetch("customer.json", failed));
        assert_eq!(dashboard.table().rows().len(), 2);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut dashboard = loaded(scenario_one());
        let table = dashboard.table().clone();
        let bar = dashboard.bar_chart().cloned();

        dashboard.refresh();

        assert_eq!(dashboard.table(), &table);
        assert_eq!(dashboard.bar_chart().cloned(), bar);
    }
}
