//! Shared, hot-swappable registry handle.
//!
//! Readers take an `Arc<Registry>` snapshot without locking. A reload builds
//! the new registry completely before publishing it with a single atomic
//! store; a failed reload leaves the current snapshot in place.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::product::RawProduct;
use crate::registry::Registry;

/// Process-wide handle to the current registry, passed explicitly to whoever needs it.
#[derive(Debug)]
pub struct SharedRegistry {
    current: ArcSwap<Registry>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// The registry as of now. Holding the snapshot keeps it alive across reloads.
    pub fn snapshot(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// Publish an already-built registry, returning the one it replaced.
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let products = registry.len();
        let previous = self.current.swap(Arc::new(registry));
        info!(
            products = products,
            previous_products = previous.len(),
            "Product registry swapped"
        );
        previous
    }

    /// Build a registry from catalog entries and publish it if it loads cleanly.
    ///
    /// Returns the number of products now available.
    pub fn reload<I, S>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (S, RawProduct)>,
        S: AsRef<str>,
    {
        match Registry::load(entries) {
            Ok(registry) => {
                let products = registry.len();
                self.replace(registry);
                Ok(products)
            }
            Err(e) => {
                warn!(error = %e, "Rejected catalog reload, keeping current registry");
                Err(e)
            }
        }
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
