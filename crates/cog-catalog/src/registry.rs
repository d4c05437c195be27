//! Product registry.
//!
//! The registry is the single source of truth for product definitions. It is
//! built in one pass from an ordered list of catalog entries and never
//! mutated afterwards; reloading builds a fresh registry (see
//! [`crate::handle::SharedRegistry`]).

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::context::CoordinateContext;
use crate::error::{CatalogError, Result};
use crate::product::{validate, ProductDefinition, RawProduct};
use crate::resolver;

/// Name-keyed, insertion-ordered collection of validated products.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Products in catalog order
    products: Vec<Arc<ProductDefinition>>,
    /// Position in `products` keyed by product name
    index: HashMap<String, usize>,
    /// Positions in `products` ordered by descending prefix length, for key lookup
    by_prefix: Vec<usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and load an ordered list of `(name, entry)` pairs.
    ///
    /// Fails on the first duplicate name, the first invalid entry (tagged with
    /// its position) or the first pair of products sharing a storage prefix.
    /// Nothing is returned unless every entry is valid.
    pub fn load<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, RawProduct)>,
        S: AsRef<str>,
    {
        let mut products: Vec<Arc<ProductDefinition>> = Vec::new();
        let mut index = HashMap::new();

        for (position, (name, raw)) in entries.into_iter().enumerate() {
            let name = name.as_ref();
            if index.contains_key(name) {
                return Err(CatalogError::DuplicateProduct(name.to_string()));
            }

            let product = validate(name, &raw).map_err(|e| e.at_position(position))?;

            if let Some((other, prefix)) = products
                .iter()
                .find_map(|other| contested_prefix(other, &product).map(|p| (other, p)))
            {
                return Err(CatalogError::AmbiguousPrefix {
                    prefix,
                    first: other.name().to_string(),
                    second: name.to_string(),
                });
            }

            debug!(
                product = %name,
                prefix = %product.prefix(),
                template = %product.template(),
                "Validated product"
            );

            index.insert(name.to_string(), products.len());
            products.push(Arc::new(product));
        }

        let mut by_prefix: Vec<usize> = (0..products.len()).collect();
        by_prefix.sort_by_key(|&i| std::cmp::Reverse(products[i].normalized_prefix().len()));

        info!(products = products.len(), "Product registry loaded");

        Ok(Self {
            products,
            index,
            by_prefix,
        })
    }

    /// Look up a product by name.
    pub fn get(&self, name: &str) -> Result<&Arc<ProductDefinition>> {
        self.index
            .get(name)
            .map(|&i| &self.products[i])
            .ok_or_else(|| CatalogError::UnknownProduct(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Product names in catalog order.
    pub fn list(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name()).collect()
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProductDefinition>> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolve the storage key for a named product.
    pub fn resolve(&self, name: &str, context: &CoordinateContext) -> Result<String> {
        resolver::resolve(self.get(name)?, context)
    }

    /// Find the product a storage key belongs to and the coordinates it encodes.
    ///
    /// Products with longer prefixes are tried first.
    pub fn match_key(&self, key: &str) -> Result<(Arc<ProductDefinition>, CoordinateContext)> {
        self.by_prefix
            .iter()
            .map(|&i| &self.products[i])
            .find_map(|product| {
                resolver::parse_key(product, key)
                    .ok()
                    .map(|ctx| (Arc::clone(product), ctx))
            })
            .ok_or_else(|| CatalogError::UnmatchedKey(key.to_string()))
    }
}

/// The prefix under which two products could write the same key, if any.
///
/// Equal prefixes always collide. When one prefix nests inside the other, the
/// outer product collides if its template can render the rest of the inner
/// prefix as the start of a name.
fn contested_prefix(a: &ProductDefinition, b: &ProductDefinition) -> Option<String> {
    let (pa, pb) = (a.normalized_prefix(), b.normalized_prefix());
    if pa == pb {
        return Some(pa.to_string());
    }

    let (outer, inner) = if pa.len() < pb.len() { (a, b) } else { (b, a) };
    let remainder = inner
        .normalized_prefix()
        .strip_prefix(outer.normalized_prefix())?
        .strip_prefix('/')?;

    outer
        .template()
        .could_render_prefix(&format!("{}/", remainder))
        .then(|| inner.normalized_prefix().to_string())
}
