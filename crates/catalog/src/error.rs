use thiserror::Error;

use restock_core::Sku;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("unknown sku {0}")]
    UnknownSku(Sku),
}
