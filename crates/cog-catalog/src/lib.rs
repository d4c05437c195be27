//! Product registry and storage-key template resolution for COG raster products.
//!
//! A catalog maps product names to a storage prefix, a file-name template and
//! the compression and resampling settings used when converting source rasters
//! to Cloud Optimized GeoTIFFs.
//!
//! ```
//! use chrono::NaiveDate;
//! use cog_catalog::{catalog, CoordinateContext};
//!
//! let registry = catalog::builtin().unwrap();
//! let date = NaiveDate::from_ymd_opt(2019, 3, 21).unwrap();
//! let key = registry
//!     .resolve("wofs_albers", &CoordinateContext::tile(15, -40).with_time(date))
//!     .unwrap();
//! assert_eq!(
//!     key,
//!     "WOfS/WOFLs/v2.1.5/combined/x_15/y_-40/LS_WATER_3577_15_-40_2019-03-21"
//! );
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod handle;
pub mod params;
pub mod product;
pub mod registry;
pub mod resolver;
pub mod template;
pub mod token;

pub use catalog::BUILTIN_CATALOG;
pub use context::{CoordinateContext, TokenValue};
pub use error::{CatalogError, Result};
pub use handle::SharedRegistry;
pub use params::{predictor_for, resampling_for, CogProfile, ConversionParams};
pub use product::{
    validate, CoordinateSystem, Predictor, ProductDefinition, RawProduct, RawScalar,
    ResamplingMethod,
};
pub use registry::Registry;
pub use resolver::{join_key, parse_key, render_name, resolve, resolve_uri};
pub use template::{Placeholder, Segment, Template};
pub use token::{TimeFormat, TokenKind, TokenName, DEFAULT_TIME_FORMAT};
