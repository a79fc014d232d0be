use thiserror::Error;

/// Everything that can go wrong while fetching `customer.json`
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {location}: {message}")]
    Network { location: String, message: String },

    #[error("invalid customer data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot load {0}: http sources need the `fetch` feature")]
    UnsupportedLocation(String),
}
