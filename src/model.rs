// Customer Dashboard - Data Model
// Customers, transactions and the JSON document that carries them

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// RECORDS
// ============================================================================

/// A customer as it appears in `customer.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique, stable identifier referenced by `Transaction::customer_id`
    pub id: i64,

    pub name: String,
}

/// A single transaction; linked to its customer by id equality only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub customer_id: i64,
    pub amount: f64,
    pub date: String,
}

impl Transaction {
    /// True when this transaction is attributed to `customer`
    pub fn belongs_to(&self, customer: &Customer) -> bool {
        self.customer_id == customer.id
    }
}

/// The whole resource. Both lists are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

// ============================================================================
// SORT ORDER
// ============================================================================

/// Direction applied to the amount sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}
