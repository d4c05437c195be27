//! Shared test utilities for the cog-catalog workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Catalog path helpers
//! - Catalog YAML fixtures for load and validation tests
//! - Tile-grid and date generators
//! - Error matching assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_err_matches, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Assert that an expression evaluates to an `Err` matching a pattern.
///
/// An optional guard is checked against the bound pattern variables.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_err_matches;
///
/// assert_err_matches!(registry.get("nope"), CatalogError::UnknownProduct(_));
/// assert_err_matches!(
///     registry.get("nope"),
///     CatalogError::UnknownProduct(name) if name == "nope"
/// );
/// ```
#[macro_export]
macro_rules! assert_err_matches {
    ($expr:expr, $pattern:pat $(if $guard:expr)? $(,)?) => {{
        match $expr {
            Err($pattern) $(if $guard)? => {}
            Err(other) => panic!(
                "assertion failed: error does not match `{}`\n  got: `{:?}`",
                stringify!($pattern),
                other
            ),
            Ok(_) => panic!(
                "assertion failed: expected error matching `{}`, got Ok",
                stringify!($pattern)
            ),
        }
    }};
}

/// Skip a test early when a catalog file is not present.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_catalog;
///
/// #[test]
/// fn test_site_catalog() {
///     let path = require_catalog!("site_products.yaml");
///     // Test code using path...
/// }
/// ```
#[macro_export]
macro_rules! require_catalog {
    ($name:expr) => {{
        match $crate::find_catalog_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Catalog file '{}' not found. Set CATALOG_DIR to point at it.",
                    $name
                );
                return;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Sample {
        Missing(String),
        Other,
    }

    fn fails(name: &str) -> Result<(), Sample> {
        Err(Sample::Missing(name.to_string()))
    }

    #[test]
    fn test_assert_err_matches_passes() {
        assert_err_matches!(fails("x"), Sample::Missing(_));
        assert_err_matches!(fails("x"), Sample::Missing(name) if name == "x");
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_assert_err_matches_wrong_variant() {
        assert_err_matches!(fails("x"), Sample::Other);
    }

    #[test]
    #[should_panic(expected = "got Ok")]
    fn test_assert_err_matches_ok() {
        let ok: Result<(), Sample> = Ok(());
        assert_err_matches!(ok, Sample::Other);
    }
}
