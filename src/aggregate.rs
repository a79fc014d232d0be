// Customer Dashboard - Aggregator
// Per-customer transaction totals, in customer order

use crate::model::{Customer, Transaction};
use serde::Serialize;

/// One chart category: a customer's name and the sum of their amounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub name: String,
    pub total: f64,
}

/// Transactions attributed to `customer`, in transaction-list order
pub fn transactions_for<'a>(
    customer: &'a Customer,
    transactions: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| t.belongs_to(customer))
}

/// One entry per customer, same order as `customers`. Customers without
/// transactions total 0; transactions pointing at no customer are ignored.
pub fn compute_totals(customers: &[Customer], transactions: &[Transaction]) -> Vec<Aggregate> {
    customers
        .iter()
        .map(|customer| Aggregate {
            name: customer.name.clone(),
            total: transactions_for(customer, transactions)
                .fold(0.0, |sum, t| sum + t.amount),
        })
        .collect()
}
