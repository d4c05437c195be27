//! Processing parameters handed to the raster converter.

use cog_catalog::{
    catalog, predictor_for, resampling_for, CatalogError, CogProfile, ConversionParams,
    ResamplingMethod,
};
use test_utils::{assert_err_matches, products};

// ============================================================================
// Resampling policy
// ============================================================================

#[test]
fn test_override_wins() {
    let registry = catalog::builtin().unwrap();
    let wofs = registry.get(products::WOFS_ALBERS).unwrap();
    assert_eq!(
        resampling_for(wofs, Some("average")).unwrap(),
        ResamplingMethod::Average
    );
}

#[test]
fn test_default_without_override() {
    let registry = catalog::builtin().unwrap();
    let wofs = registry.get(products::WOFS_ALBERS).unwrap();
    assert_eq!(resampling_for(wofs, None).unwrap(), ResamplingMethod::Nearest);

    let mangroves = registry.get(products::MANGROVE_COVER).unwrap();
    assert_eq!(resampling_for(mangroves, None).unwrap(), ResamplingMethod::Mode);
}

#[test]
fn test_invalid_override() {
    let registry = catalog::builtin().unwrap();
    let wofs = registry.get(products::WOFS_ALBERS).unwrap();
    assert_err_matches!(
        resampling_for(wofs, Some("bicubic")),
        CatalogError::InvalidResampling(name) if name == "bicubic"
    );
}

#[test]
fn test_every_method_accepted_as_override() {
    let registry = catalog::builtin().unwrap();
    let item = registry.get(products::ITEM_V2).unwrap();
    for method in ResamplingMethod::ALL {
        assert_eq!(resampling_for(item, Some(method.as_str())).unwrap(), method);
    }
}

// ============================================================================
// Predictor
// ============================================================================

#[test]
fn test_predictor_verbatim() {
    let registry = catalog::builtin().unwrap();
    assert_eq!(predictor_for(registry.get(products::ITEM_V2).unwrap()), 2);
    assert_eq!(predictor_for(registry.get(products::ITEM_V2_CONF).unwrap()), 3);
}

// ============================================================================
// Conversion parameters
// ============================================================================

#[test]
fn test_conversion_params_carry_predictor() {
    let registry = catalog::builtin().unwrap();
    for product in registry.iter() {
        let params = ConversionParams::for_product(product, None).unwrap();
        let expected = format!("PREDICTOR={}", predictor_for(product));
        assert!(
            params.creation_options().contains(&expected),
            "{} missing {}",
            product.name(),
            expected
        );
        assert_eq!(params.resampling, product.default_rsp());
    }
}

#[test]
fn test_conversion_params_default_profile() {
    let registry = catalog::builtin().unwrap();
    let params =
        ConversionParams::for_product(registry.get(products::ITEM_V2_CONF).unwrap(), Some("nearest"))
            .unwrap();

    assert_eq!(params.product, products::ITEM_V2_CONF);
    assert_eq!(params.resampling, ResamplingMethod::Nearest);
    assert_eq!(params.profile, CogProfile::default());
    assert_eq!(params.overview_levels(), &[2, 4, 8, 16, 32]);

    let options = params.creation_options();
    for option in [
        "TILED=YES",
        "COPY_SRC_OVERVIEWS=YES",
        "COMPRESS=DEFLATE",
        "ZLEVEL=9",
        "BLOCKXSIZE=512",
        "BLOCKYSIZE=512",
        "PREDICTOR=3",
        "PROFILE=GeoTIFF",
    ] {
        assert!(options.iter().any(|o| o == option), "missing {}", option);
    }
}

#[test]
fn test_conversion_params_custom_profile() {
    let registry = catalog::builtin().unwrap();
    let profile = CogProfile {
        block_size: 256,
        overview_levels: vec![2, 4],
        ..CogProfile::default()
    };
    let params = ConversionParams::for_product(registry.get(products::WOFS_ALBERS).unwrap(), None)
        .unwrap()
        .with_profile(profile);

    assert!(params
        .creation_options()
        .contains(&"BLOCKXSIZE=256".to_string()));
    assert_eq!(params.overview_levels(), &[2, 4]);
}

#[test]
fn test_conversion_params_bad_override() {
    let registry = catalog::builtin().unwrap();
    assert_err_matches!(
        ConversionParams::for_product(registry.get(products::ITEM_V2).unwrap(), Some("Average")),
        CatalogError::InvalidResampling(_)
    );
}
