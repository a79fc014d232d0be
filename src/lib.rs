// Customer Dashboard - Core Library
// Exposes all modules for use in the TUI, the web server, and tests

pub mod model;
pub mod error;
pub mod source;
pub mod store;
pub mod aggregate;
pub mod palette;
pub mod chart;
pub mod view;
pub mod dashboard;
pub mod html;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use model::{Customer, Dataset, SortOrder, Transaction};
pub use error::LoadError;
pub use source::{DataSource, FileSource};
#[cfg(feature = "fetch")]
pub use source::HttpSource;
pub use store::DataStore;
pub use aggregate::{compute_totals, transactions_for, Aggregate};
pub use palette::Rgba;
pub use chart::{tooltip_label, ChartKind, ChartSlot, ChartWidget, Upsert};
pub use view::{CustomerRow, TableBody, TransactionRow};
pub use dashboard::Dashboard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default location of the customer data
pub const DEFAULT_SOURCE: &str = "customer.json";
