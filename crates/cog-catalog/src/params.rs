//! Processing parameters for the raster conversion step.
//!
//! The converter asks for a product's predictor and resampling method here.
//! An explicit resampling override always wins over the catalog default.

use serde::Serialize;

use crate::error::Result;
use crate::product::{Predictor, ProductDefinition, ResamplingMethod};

/// Resampling method for a product, honouring an explicit override.
pub fn resampling_for(
    product: &ProductDefinition,
    override_rsp: Option<&str>,
) -> Result<ResamplingMethod> {
    match override_rsp {
        Some(name) => name.parse(),
        None => Ok(product.default_rsp()),
    }
}

/// Predictor code for a product, exactly as loaded.
pub fn predictor_for(product: &ProductDefinition) -> u8 {
    product.predictor().code()
}

/// Fixed Cloud-Optimised GeoTIFF layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CogProfile {
    /// Internal tile and overview block size in pixels
    pub block_size: u32,
    pub compress: String,
    pub zlevel: u8,
    /// Overview decimation factors
    pub overview_levels: Vec<u32>,
}

impl Default for CogProfile {
    fn default() -> Self {
        Self {
            block_size: 512,
            compress: "DEFLATE".to_string(),
            zlevel: 9,
            overview_levels: vec![2, 4, 8, 16, 32],
        }
    }
}

/// Everything the converter needs to encode one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionParams {
    pub product: String,
    pub predictor: Predictor,
    pub resampling: ResamplingMethod,
    pub profile: CogProfile,
}

impl ConversionParams {
    /// Parameters for a product with the default profile.
    pub fn for_product(product: &ProductDefinition, override_rsp: Option<&str>) -> Result<Self> {
        Ok(Self {
            product: product.name().to_string(),
            predictor: product.predictor(),
            resampling: resampling_for(product, override_rsp)?,
            profile: CogProfile::default(),
        })
    }

    pub fn with_profile(mut self, profile: CogProfile) -> Self {
        self.profile = profile;
        self
    }

    /// GeoTIFF creation options (`-co KEY=VALUE`) for the final COG write.
    pub fn creation_options(&self) -> Vec<String> {
        vec![
            "TILED=YES".to_string(),
            "COPY_SRC_OVERVIEWS=YES".to_string(),
            format!("COMPRESS={}", self.profile.compress),
            format!("ZLEVEL={}", self.profile.zlevel),
            format!("BLOCKXSIZE={}", self.profile.block_size),
            format!("BLOCKYSIZE={}", self.profile.block_size),
            format!("PREDICTOR={}", self.predictor.code()),
            "PROFILE=GeoTIFF".to_string(),
        ]
    }

    /// Overview decimation factors, in build order.
    pub fn overview_levels(&self) -> &[u32] {
        &self.profile.overview_levels
    }
}
