//! Common test fixtures for catalog tests.
//!
//! This module provides pre-defined catalog documents, product names and
//! coordinates that represent common scenarios when resolving storage keys.

/// Catalog YAML documents.
///
/// Each document is a complete `products:` mapping. The invalid ones break
/// exactly one rule so tests can assert on a single failure.
pub mod catalogs {
    /// One projected, one geographic and one non-spatial product.
    pub const MINIMAL: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: x_{x}/y_{y}/TILE_{x}_{y}_{time:%Y-%m-%d}
    predictor: 2
    default_rsp: nearest
  cells:
    prefix: test/cells/v1
    name_template: lon_{lon}/lat_{lat}/CELL_{lon}_{lat}
    predictor: 3
    default_rsp: average
  seasons:
    prefix: test/seasons/v1
    name_template: "{start_time:%Y}/SEASON_{start_time:%Y%m%d}_{end_time:%Y%m%d}"
    predictor: 1
    default_rsp: mode
"#;

    /// A catalog whose products list is empty.
    pub const EMPTY: &str = "products: {}\n";

    /// The same product name twice.
    pub const DUPLICATE_NAME: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: TILE_{x}_{y}
    predictor: 2
    default_rsp: nearest
  tiles:
    prefix: test/tiles/v2
    name_template: TILE_{x}_{y}
    predictor: 2
    default_rsp: nearest
"#;

    /// Two products whose prefixes differ only by surrounding slashes.
    pub const AMBIGUOUS_PREFIX: &str = r#"
products:
  first:
    prefix: test/shared
    name_template: A_{x}_{y}
    predictor: 2
    default_rsp: nearest
  second:
    prefix: /test/shared/
    name_template: B_{x}_{y}
    predictor: 2
    default_rsp: nearest
"#;

    /// Second entry has no `default_rsp`.
    pub const MISSING_FIELD: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: TILE_{x}_{y}
    predictor: 2
    default_rsp: nearest
  cells:
    prefix: test/cells/v1
    name_template: CELL_{lon}_{lat}
    predictor: 3
"#;

    /// Unbalanced brace in the template.
    pub const MALFORMED_TEMPLATE: &str = r#"
products:
  broken:
    prefix: test/broken
    name_template: "x_{x/y_{y}"
    predictor: 2
    default_rsp: nearest
"#;

    /// Predictor outside {1, 2, 3}.
    pub const BAD_PREDICTOR: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: TILE_{x}_{y}
    predictor: 4
    default_rsp: nearest
"#;

    /// Resampling name that is not a GDAL method.
    pub const BAD_RESAMPLING: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: TILE_{x}_{y}
    predictor: 2
    default_rsp: bicubic
"#;

    /// Predictor written as a word.
    pub const NON_NUMERIC_PREDICTOR: &str = r#"
products:
  tiles:
    prefix: test/tiles/v1
    name_template: TILE_{x}_{y}
    predictor: two
    default_rsp: nearest
"#;

    /// An outer product whose names start with the inner product's prefix.
    pub const NESTED_PREFIX: &str = r#"
products:
  outer:
    prefix: test/composite
    name_template: high/x_{x}/y_{y}
    predictor: 2
    default_rsp: average
  inner:
    prefix: test/composite/high
    name_template: x_{x}/y_{y}
    predictor: 2
    default_rsp: average
"#;

    /// Template mixing projected and geographic coordinates.
    pub const MIXED_GRID: &str = r#"
products:
  mixed:
    prefix: test/mixed
    name_template: x_{x}/lat_{lat}
    predictor: 2
    default_rsp: nearest
"#;
}

/// Product names from the shipped catalog.
pub mod products {
    pub const WOFS_ALBERS: &str = "wofs_albers";
    pub const FC_PERCENTILE_SEASONAL: &str = "fc_percentile_seasonal";
    pub const ITEM_V2: &str = "item_v2";
    pub const ITEM_V2_CONF: &str = "item_v2_conf";
    pub const MANGROVE_COVER: &str = "mangrove_cover";
    pub const HIGH_TIDE_COMP_20P: &str = "high_tide_comp_20p";
    pub const WOFS_APR_OCT_SUMMARY: &str = "wofs_apr_oct_summary";
    pub const WOFS_NOV_MAR_SUMMARY: &str = "wofs_nov_mar_summary";
    pub const LS8_FC_ALBERS: &str = "ls8_fc_albers";

    /// Number of products in `config/products.yaml`.
    pub const SHIPPED_COUNT: usize = 19;

    /// Shipped product names in catalog order.
    pub const SHIPPED: [&str; SHIPPED_COUNT] = [
        "wofs_albers",
        "wofs_filtered_summary",
        "wofs_statistical_summary",
        "wofs_annual_summary",
        "wofs_apr_oct_summary",
        "wofs_nov_mar_summary",
        "ls5_fc_albers",
        "ls7_fc_albers",
        "ls8_fc_albers",
        "fc_percentile_albers_annual",
        "fc_percentile_seasonal",
        "item_v2",
        "item_v2_conf",
        "mangrove_cover",
        "ls5_nbart_geomedian_annual",
        "ls7_nbart_geomedian_annual",
        "ls8_nbart_geomedian_annual",
        "high_tide_comp_20p",
        "low_tide_comp_20p",
    ];
}

/// Albers tile indices (EPSG:3577, 100 km tiles).
pub mod tiles {
    /// A tile over the Murray-Darling basin.
    pub const MURRAY: (i64, i64) = (15, -40);

    /// Origin tile.
    pub const ORIGIN: (i64, i64) = (0, 0);

    /// Far north-west corner of the continental grid.
    pub const NORTH_WEST: (i64, i64) = (-20, -11);
}

/// Geographic cells in whole and fractional degrees.
pub mod cells {
    pub const CANBERRA: (f64, f64) = (149.0, -35.0);
    pub const DARWIN: (f64, f64) = (130.84, -12.46);
    pub const NEGATIVE_LON: (i64, i64) = (-1, -1);
}

/// Fixed dates as `(year, month, day)`.
pub mod time {
    /// Acquisition date used in the wofs_albers key examples.
    pub const ACQUISITION: (i32, u32, u32) = (2019, 3, 21);

    /// Start and end of the 2010 calendar year.
    pub const YEAR_2010: ((i32, u32, u32), (i32, u32, u32)) = ((2010, 1, 1), (2010, 12, 31));
}
