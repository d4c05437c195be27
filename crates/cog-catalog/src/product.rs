//! Product definitions and their validation.
//!
//! A catalog entry arrives as a [`RawProduct`] with every field optional so
//! that a missing field is reported against the product and field name
//! instead of as an opaque YAML error. [`validate`] turns it into an
//! immutable [`ProductDefinition`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::CoordinateContext;
use crate::error::{CatalogError, Result};
use crate::template::Template;
use crate::token::{TokenKind, TokenName};

/// TIFF predictor hint handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Predictor {
    /// No prediction
    None = 1,
    /// Horizontal differencing, for integer data
    Horizontal = 2,
    /// Floating point prediction
    FloatingPoint = 3,
}

impl Predictor {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Predictor::None),
            2 => Some(Predictor::Horizontal),
            3 => Some(Predictor::FloatingPoint),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<Predictor> for u8 {
    fn from(p: Predictor) -> Self {
        p.code()
    }
}

/// Resampling algorithms understood by the overview builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingMethod {
    Nearest,
    Average,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Mode,
    Gauss,
    Min,
    Max,
    Med,
    Q1,
    Q3,
    Rms,
    Sum,
}

impl ResamplingMethod {
    pub const ALL: [ResamplingMethod; 15] = [
        ResamplingMethod::Nearest,
        ResamplingMethod::Average,
        ResamplingMethod::Bilinear,
        ResamplingMethod::Cubic,
        ResamplingMethod::CubicSpline,
        ResamplingMethod::Lanczos,
        ResamplingMethod::Mode,
        ResamplingMethod::Gauss,
        ResamplingMethod::Min,
        ResamplingMethod::Max,
        ResamplingMethod::Med,
        ResamplingMethod::Q1,
        ResamplingMethod::Q3,
        ResamplingMethod::Rms,
        ResamplingMethod::Sum,
    ];

    /// Name as written in the catalog and passed to `gdaladdo -r`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResamplingMethod::Nearest => "nearest",
            ResamplingMethod::Average => "average",
            ResamplingMethod::Bilinear => "bilinear",
            ResamplingMethod::Cubic => "cubic",
            ResamplingMethod::CubicSpline => "cubicspline",
            ResamplingMethod::Lanczos => "lanczos",
            ResamplingMethod::Mode => "mode",
            ResamplingMethod::Gauss => "gauss",
            ResamplingMethod::Min => "min",
            ResamplingMethod::Max => "max",
            ResamplingMethod::Med => "med",
            ResamplingMethod::Q1 => "q1",
            ResamplingMethod::Q3 => "q3",
            ResamplingMethod::Rms => "rms",
            ResamplingMethod::Sum => "sum",
        }
    }
}

impl fmt::Display for ResamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResamplingMethod {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        ResamplingMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidResampling(s.to_string()))
    }
}

/// Spatial grid a product's keys are indexed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// `x`/`y` tile indices on a projected grid
    Projected,
    /// `lon`/`lat` indices on a geographic grid
    Geographic,
    /// Keys depend on time only
    NonSpatial,
}

impl CoordinateSystem {
    /// Work out which grid a template is bound to.
    ///
    /// Returns `None` when the template mixes both grids.
    pub fn of(template: &Template) -> Option<Self> {
        match (
            template.uses_kind(TokenKind::GridIndex),
            template.uses_kind(TokenKind::GeoIndex),
        ) {
            (true, true) => None,
            (true, false) => Some(CoordinateSystem::Projected),
            (false, true) => Some(CoordinateSystem::Geographic),
            (false, false) => Some(CoordinateSystem::NonSpatial),
        }
    }

    pub fn axes(&self) -> &'static [TokenName] {
        match self {
            CoordinateSystem::Projected => &[TokenName::X, TokenName::Y],
            CoordinateSystem::Geographic => &[TokenName::Lon, TokenName::Lat],
            CoordinateSystem::NonSpatial => &[],
        }
    }

    /// Axes of the other grid, which a context for this product must leave unset.
    pub fn foreign_axes(&self) -> &'static [TokenName] {
        match self {
            CoordinateSystem::Projected => CoordinateSystem::Geographic.axes(),
            CoordinateSystem::Geographic => CoordinateSystem::Projected.axes(),
            CoordinateSystem::NonSpatial => &[],
        }
    }
}

/// A numeric catalog field as written, so a value of the wrong type is
/// reported against its product instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Integer(v) => write!(f, "{}", v),
            RawScalar::Float(v) => write!(f, "{}", v),
            RawScalar::Bool(v) => write!(f, "{}", v),
            RawScalar::Text(v) => write!(f, "'{}'", v),
        }
    }
}

impl From<i64> for RawScalar {
    fn from(v: i64) -> Self {
        RawScalar::Integer(v)
    }
}

/// One catalog entry as written, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub name_template: Option<String>,
    #[serde(default)]
    pub predictor: Option<RawScalar>,
    #[serde(default)]
    pub default_rsp: Option<String>,
}

impl RawProduct {
    pub fn new(prefix: &str, name_template: &str, predictor: i64, default_rsp: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            name_template: Some(name_template.to_string()),
            predictor: Some(RawScalar::Integer(predictor)),
            default_rsp: Some(default_rsp.to_string()),
        }
    }
}

/// A validated catalog entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDefinition {
    name: String,
    prefix: String,
    name_template: Template,
    predictor: Predictor,
    default_rsp: ResamplingMethod,
    coordinate_system: CoordinateSystem,
}

impl ProductDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage prefix exactly as written in the catalog.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn template(&self) -> &Template {
        &self.name_template
    }

    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    pub fn default_rsp(&self) -> ResamplingMethod {
        self.default_rsp
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// True if keys for this product carry a timestamp.
    pub fn is_temporal(&self) -> bool {
        self.name_template.uses_kind(TokenKind::Temporal)
    }

    /// Prefix with surrounding slashes removed, used to compare and match keys.
    pub(crate) fn normalized_prefix(&self) -> &str {
        self.prefix.trim_matches('/')
    }

    /// Render the full storage key for a context.
    pub fn resolve(&self, context: &CoordinateContext) -> Result<String> {
        crate::resolver::resolve(self, context)
    }

    /// The catalog entry this definition was built from.
    pub fn to_raw(&self) -> RawProduct {
        RawProduct {
            prefix: Some(self.prefix.clone()),
            name_template: Some(self.name_template.source().to_string()),
            predictor: Some(RawScalar::Integer(i64::from(self.predictor.code()))),
            default_rsp: Some(self.default_rsp.as_str().to_string()),
        }
    }
}

/// Validate one catalog entry.
pub fn validate(name: &str, raw: &RawProduct) -> Result<ProductDefinition> {
    let invalid = |field: &'static str, reason: String| CatalogError::InvalidProduct {
        product: name.to_string(),
        field,
        reason,
        position: None,
    };
    let required = |field: &'static str| invalid(field, "is required".to_string());

    if name.trim().is_empty() {
        return Err(invalid("name", "must not be empty".to_string()));
    }

    let prefix = raw.prefix.as_deref().ok_or_else(|| required("prefix"))?;
    if prefix.trim_matches('/').trim().is_empty() {
        return Err(invalid("prefix", "must not be empty".to_string()));
    }

    let source = raw
        .name_template
        .as_deref()
        .ok_or_else(|| required("name_template"))?;
    let name_template = Template::parse(source).map_err(|e| match e {
        CatalogError::MalformedTemplate { reason, .. } => {
            invalid("name_template", format!("is malformed: {}", reason))
        }
        other => invalid("name_template", other.to_string()),
    })?;
    let coordinate_system = CoordinateSystem::of(&name_template).ok_or_else(|| {
        invalid(
            "name_template",
            "mixes projected (x/y) and geographic (lon/lat) tokens".to_string(),
        )
    })?;

    let code = match raw.predictor.as_ref().ok_or_else(|| required("predictor"))? {
        RawScalar::Integer(code) => *code,
        other => {
            return Err(invalid(
                "predictor",
                format!("must be an integer (got {})", other),
            ))
        }
    };
    let predictor = Predictor::from_code(code)
        .ok_or_else(|| invalid("predictor", format!("must be one of 1, 2, 3 (got {})", code)))?;

    let rsp = raw
        .default_rsp
        .as_deref()
        .ok_or_else(|| required("default_rsp"))?;
    let default_rsp = rsp.parse::<ResamplingMethod>().map_err(|_| {
        invalid(
            "default_rsp",
            format!("'{}' is not a known resampling method", rsp),
        )
    })?;

    Ok(ProductDefinition {
        name: name.to_string(),
        prefix: prefix.to_string(),
        name_template,
        predictor,
        default_rsp,
        coordinate_system,
    })
}
