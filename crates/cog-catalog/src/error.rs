//! Error types for the product catalog.

use thiserror::Error;

use crate::token::TokenName;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading the catalog or resolving keys.
///
/// Everything except `MissingContextValue`, `TypeMismatch` and `UnmatchedKey`
/// is raised at load time.
#[derive(Debug, Error)]
pub enum CatalogError {
    // === Template Errors ===
    #[error("Malformed template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    // === Catalog Errors ===
    #[error(
        "Invalid product '{product}'{}: field '{field}' {reason}",
        entry_suffix(.position)
    )]
    InvalidProduct {
        product: String,
        field: &'static str,
        reason: String,
        /// Zero-based index of the entry in the catalog, when loaded through a registry.
        position: Option<usize>,
    },

    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    #[error("Products '{first}' and '{second}' share the storage prefix '{prefix}'")]
    AmbiguousPrefix {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Failed to read catalog: {0}")]
    CatalogRead(#[from] std::io::Error),

    #[error("Failed to parse catalog YAML: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    // === Resolution Errors ===
    #[error("Product '{product}' needs a value for '{token}'")]
    MissingContextValue { product: String, token: TokenName },

    #[error("Product '{product}' expects {expected} for '{token}', got {found}")]
    TypeMismatch {
        product: String,
        token: TokenName,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid resampling method: {0}")]
    InvalidResampling(String),

    #[error("Key does not belong to any product: {0}")]
    UnmatchedKey(String),
}

impl CatalogError {
    /// Name of the offending catalog field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CatalogError::InvalidProduct { field, .. } => Some(field),
            CatalogError::MalformedTemplate { .. } => Some("name_template"),
            CatalogError::AmbiguousPrefix { .. } => Some("prefix"),
            _ => None,
        }
    }

    /// True for errors that can only come out of catalog loading.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CatalogError::MalformedTemplate { .. }
                | CatalogError::InvalidProduct { .. }
                | CatalogError::DuplicateProduct(_)
                | CatalogError::AmbiguousPrefix { .. }
                | CatalogError::CatalogRead(_)
                | CatalogError::CatalogParse(_)
        )
    }

    /// Attach the catalog position to an `InvalidProduct` error.
    pub(crate) fn at_position(self, index: usize) -> Self {
        match self {
            CatalogError::InvalidProduct {
                product,
                field,
                reason,
                ..
            } => CatalogError::InvalidProduct {
                product,
                field,
                reason,
                position: Some(index),
            },
            other => other,
        }
    }
}

fn entry_suffix(position: &Option<usize>) -> String {
    match position {
        Some(index) => format!(" (catalog entry {})", index),
        None => String::new(),
    }
}
