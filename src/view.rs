// Customer Dashboard - Table View
// Rows for the `customer-table-body` target, rebuilt on every render

use crate::aggregate::transactions_for;
use crate::model::{Customer, Transaction};
use serde::Serialize;

pub const TABLE_BODY_ID: &str = "customer-table-body";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub amount: f64,
    pub date: String,
}

/// One customer row with its nested transaction sub-table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TableBody {
    rows: Vec<CustomerRow>,
}

impl TableBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[CustomerRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clear and rebuild: one row per customer in customer order, nested
    /// transactions in transaction-list order.
    pub fn render(&mut self, customers: &[Customer], transactions: &[Transaction]) {
        self.rows.clear();
        self.rows.extend(customers.iter().map(|customer| CustomerRow {
            id: customer.id,
            name: customer.name.clone(),
            transactions: transactions_for(customer, transactions)
                .map(|t| TransactionRow {
                    amount: t.amount,
                    date: t.date.clone(),
                })
                .collect(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Vec<Customer> {
        vec![
            Customer { id: 1, name: "Bob".to_string() },
            Customer { id: 2, name: "Amy".to_string() },
        ]
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction { customer_id: 1, amount: 10.0, date: "2021-01-01".to_string() },
            Transaction { customer_id: 2, amount: 5.0, date: "2021-01-02".to_string() },
            Transaction { customer_id: 1, amount: 7.0, date: "2021-01-03".to_string() },
            Transaction { customer_id: 42, amount: 99.0, date: "2021-01-04".to_string() },
        ]
    }

    #[test]
    fn test_render_groups_by_customer_id() {
        let mut table = TableBody::new();
        table.render(&customers(), &transactions());

        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].name, "Bob");
        assert_eq!(
            rows[0].transactions,
            vec![
                TransactionRow { amount: 10.0, date: "2021-01-01".to_string() },
                TransactionRow { amount: 7.0, date: "2021-01-03".to_string() },
            ]
        );
        assert_eq!(rows[1].transactions.len(), 1);
    }

    #[test]
    fn test_orphan_appears_in_no_row() {
        let mut table = TableBody::new();
        table.render(&customers(), &transactions());

        assert!(table
            .rows()
            .iter()
            .flat_map(|r| r.transactions.iter())
            .all(|t| t.amount != 99.0));
    }

    #[test]
    fn test_render_replaces_previous_rows() {
        let mut table = TableBody::new();
        table.render(&customers(), &transactions());
        table.render(&customers()[..1], &[]);

        assert_eq!(table.rows().len(), 1);
        assert!(table.rows()[0].transactions.is_empty());
    }

    #[test]
    fn test_render_twice_is_identical() {
        let mut once = TableBody::new();
        once.render(&customers(), &transactions());

        let mut twice = TableBody::new();
        twice.render(&customers(), &transactions());
        twice.render(&customers(), &transactions());

        assert_eq!(once, twice);
    }
}
