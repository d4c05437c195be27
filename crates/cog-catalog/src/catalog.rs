//! Catalog file loading.
//!
//! The catalog is a YAML document of the form:
//!
//! ```yaml
//! products:
//!   wofs_albers:
//!     prefix: WOfS/WOFLs/v2.1.5/combined
//!     name_template: x_{x}/y_{y}/LS_WATER_3577_{x}_{y}_{time:%Y-%m-%d}
//!     predictor: 2
//!     default_rsp: nearest
//! ```
//!
//! Entries are read in document order, and repeated product names are kept
//! so that the registry reports them instead of the last one silently winning.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::product::RawProduct;
use crate::registry::Registry;

/// The catalog shipped with this crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../../config/products.yaml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(deserialize_with = "ordered_entries")]
    products: Vec<(String, RawProduct)>,
}

#[derive(Serialize)]
struct CatalogDump<'a> {
    #[serde(serialize_with = "registry_entries")]
    products: &'a Registry,
}

/// Parse catalog YAML into ordered `(name, entry)` pairs without validating them.
pub fn parse_entries(yaml: &str) -> Result<Vec<(String, RawProduct)>> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    Ok(file.products)
}

/// Parse and validate catalog YAML.
pub fn from_yaml_str(yaml: &str) -> Result<Registry> {
    Registry::load(parse_entries(yaml)?)
}

/// Read, parse and validate a catalog file.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Registry> {
    let content = fs::read_to_string(path.as_ref())?;
    let registry = from_yaml_str(&content)?;
    info!(
        path = ?path.as_ref(),
        products = registry.len(),
        "Loaded product catalog"
    );
    Ok(registry)
}

/// Load the catalog embedded in the crate.
pub fn builtin() -> Result<Registry> {
    from_yaml_str(BUILTIN_CATALOG)
}

/// Write a registry back out in catalog format, in catalog order.
pub fn to_yaml_string(registry: &Registry) -> Result<String> {
    Ok(serde_yaml::to_string(&CatalogDump { products: registry })?)
}

fn ordered_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, RawProduct)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, RawProduct)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of product names to product entries")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, RawProduct>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

fn registry_entries<S>(registry: &&Registry, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(registry.len()))?;
    for product in registry.iter() {
        map.serialize_entry(product.name(), &product.to_raw())?;
    }
    map.end()
}
