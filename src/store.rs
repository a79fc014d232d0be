// Customer Dashboard - Data Store
// The two in-memory lists and the amount sort direction

use crate::error::LoadError;
use crate::model::{Customer, Dataset, SortOrder, Transaction};
use crate::source::DataSource;
use feruca::Collator;

#[derive(Debug, Default)]
pub struct DataStore {
    customers: Vec<Customer>,
    transactions: Vec<Transaction>,

    /// Direction the next amount-sort toggle will apply
    sort_order: SortOrder,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Fetch from `source` and replace both lists. Nothing changes on error.
    pub fn load(&mut self, source: &dyn DataSource) -> Result<(), LoadError> {
        let dataset = source.fetch()?;
        self.replace(dataset);
        Ok(())
    }

    pub fn replace(&mut self, dataset: Dataset) {
        self.customers = dataset.customers;
        self.transactions = dataset.transactions;
    }

    /// Ascending by name only, in Unicode collation order (CLDR root:
    /// accents and case only break ties). Transactions keep their order.
    pub fn sort_customers_by_name(&mut self) {
        let mut collator = Collator::default();
        self.customers
            .sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
    }

    /// Reorder transactions by amount; customers keep their order
    pub fn sort_transactions_by_amount(&mut self, order: SortOrder) {
        self.transactions
            .sort_by(|a, b| order.apply(a.amount.total_cmp(&b.amount)));
    }

    /// Sort by the current direction, then flip it for the next call.
    /// Returns the direction that was applied.
    pub fn toggle_amount_sort(&mut self) -> SortOrder {
        let applied = self.sort_order;
        self.sort_transactions_by_amount(applied);
        self.sort_order = applied.toggled();
        applied
    }

    /// Current contents in current order
    pub fn snapshot(&self) -> Dataset {
        Dataset {
            customers: self.customers.clone(),
            transactions: self.transactions.clone(),
        }
    }
}
