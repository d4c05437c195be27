//! Storage key resolution.
//!
//! Rendering is a pure walk over the parsed template segments: literals are
//! copied, tokens are replaced by the context value formatted for their kind.
//! [`parse_key`] runs the same walk in reverse to recover a context from a key.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Write;

use crate::context::{CoordinateContext, TokenValue};
use crate::error::{CatalogError, Result};
use crate::product::{CoordinateSystem, ProductDefinition};
use crate::template::{Placeholder, Segment};
use crate::token::{TokenKind, TokenName, DEFAULT_TIME_FORMAT};

/// Render the full storage key (`prefix/name`) for a product.
pub fn resolve(product: &ProductDefinition, context: &CoordinateContext) -> Result<String> {
    let name = render_name(product, context)?;
    Ok(join_key(product.prefix(), &name))
}

/// Render a product's template without its prefix.
pub fn render_name(product: &ProductDefinition, context: &CoordinateContext) -> Result<String> {
    let template = product.template();
    let mut out = String::with_capacity(template.source().len() + 16);

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(placeholder) => render_token(product, placeholder, context, &mut out)?,
        }
    }

    check_foreign_axes(product, context)?;
    Ok(out)
}

/// A product keyed on one grid rejects coordinates from the other.
fn check_foreign_axes(product: &ProductDefinition, context: &CoordinateContext) -> Result<()> {
    let system = product.coordinate_system();
    for &token in system.foreign_axes() {
        if let Some(value) = context.get(token) {
            return Err(CatalogError::TypeMismatch {
                product: product.name().to_string(),
                token,
                expected: match system {
                    CoordinateSystem::Projected => "no value on a projected product",
                    _ => "no value on a geographic product",
                },
                found: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Resolve a key and place it under a destination root such as `s3://bucket`.
pub fn resolve_uri(
    base: &str,
    product: &ProductDefinition,
    context: &CoordinateContext,
) -> Result<String> {
    Ok(join_key(base, &resolve(product, context)?))
}

/// Join two key parts with exactly one `/` between them.
pub fn join_key(head: &str, tail: &str) -> String {
    let head = head.trim_end_matches('/');
    let tail = tail.trim_start_matches('/');

    let mut key = String::with_capacity(head.len() + tail.len() + 1);
    key.push_str(head);
    key.push('/');
    key.push_str(tail);
    key
}

fn render_token(
    product: &ProductDefinition,
    placeholder: &Placeholder,
    context: &CoordinateContext,
    out: &mut String,
) -> Result<()> {
    let token = placeholder.name;
    let value = context
        .get(token)
        .ok_or_else(|| CatalogError::MissingContextValue {
            product: product.name().to_string(),
            token,
        })?;
    let mismatch = |expected: &'static str, found: String| CatalogError::TypeMismatch {
        product: product.name().to_string(),
        token,
        expected,
        found,
    };

    let written = match (token.kind(), value) {
        (TokenKind::GridIndex, TokenValue::Int(v)) | (TokenKind::GeoIndex, TokenValue::Int(v)) => {
            write!(out, "{}", v)
        }
        (TokenKind::GeoIndex, TokenValue::Float(v)) if v.is_finite() => write!(out, "{}", v),
        (TokenKind::GeoIndex, TokenValue::Float(v)) => {
            return Err(mismatch("a finite number", v.to_string()))
        }
        (TokenKind::Temporal, TokenValue::Time(t)) => {
            let format = placeholder
                .format
                .as_ref()
                .map(|f| f.as_str())
                .unwrap_or(DEFAULT_TIME_FORMAT);
            write!(out, "{}", t.format(format))
        }
        (TokenKind::GridIndex, other) => {
            return Err(mismatch("an integer", other.kind_name().to_string()))
        }
        (TokenKind::GeoIndex, other) => {
            return Err(mismatch("a number", other.kind_name().to_string()))
        }
        (TokenKind::Temporal, other) => {
            return Err(mismatch("a timestamp", other.kind_name().to_string()))
        }
    };

    written.map_err(|_| CatalogError::MalformedTemplate {
        template: product.template().source().to_string(),
        reason: format!("token '{}' could not be rendered", token),
    })
}

/// Recover the coordinate context a key was rendered from.
///
/// Repeated tokens must carry the same value everywhere they appear. Temporal
/// fields a template never writes default to the start of the period, so a
/// `%Y` token reads back as 1 January, midnight.
pub fn parse_key(product: &ProductDefinition, key: &str) -> Result<CoordinateContext> {
    let unmatched = || CatalogError::UnmatchedKey(key.to_string());

    let name = strip_key_prefix(product, key).ok_or_else(unmatched)?;
    let captures = product
        .template()
        .split_rendered(&name)
        .ok_or_else(unmatched)?;

    let mut context = CoordinateContext::new();
    let mut times: Vec<(TokenName, Parsed)> = Vec::new();

    for (placeholder, raw) in captures {
        let token = placeholder.name;
        let value = match token.kind() {
            TokenKind::GridIndex => TokenValue::Int(raw.parse().map_err(|_| unmatched())?),
            TokenKind::GeoIndex if raw.contains('.') => {
                TokenValue::Float(raw.parse().map_err(|_| unmatched())?)
            }
            TokenKind::GeoIndex => TokenValue::Int(raw.parse().map_err(|_| unmatched())?),
            TokenKind::Temporal => {
                let index = match times.iter().position(|(t, _)| *t == token) {
                    Some(index) => index,
                    None => {
                        times.push((token, Parsed::new()));
                        times.len() - 1
                    }
                };
                let format = placeholder
                    .format
                    .as_ref()
                    .map(|f| f.as_str())
                    .unwrap_or(DEFAULT_TIME_FORMAT);
                parse(&mut times[index].1, raw, StrftimeItems::new(format))
                    .map_err(|_| unmatched())?;
                continue;
            }
        };

        match context.get(token) {
            Some(existing) if existing != value => return Err(unmatched()),
            _ => context.set(token, value),
        }
    }

    for (token, parsed) in times {
        context.set(token, finish_time(parsed).ok_or_else(unmatched)?);
    }

    Ok(context)
}

/// The part of `key` after the product prefix, with the template's own
/// leading slashes restored.
fn strip_key_prefix(product: &ProductDefinition, key: &str) -> Option<String> {
    let rest = key
        .trim_start_matches('/')
        .strip_prefix(product.normalized_prefix())?;
    if !rest.starts_with('/') {
        return None;
    }
    let name = rest.trim_start_matches('/');

    let leading = match product.template().segments().first() {
        Some(Segment::Literal(text)) => text.len() - text.trim_start_matches('/').len(),
        _ => 0,
    };
    Some(format!("{}{}", "/".repeat(leading), name))
}

fn finish_time(mut parsed: Parsed) -> Option<DateTime<Utc>> {
    // Setters fail without effect when the field was already read from the key.
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    let date = parsed.to_naive_date().ok()?;

    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
    let time = parsed.to_naive_time().ok()?;

    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{validate, RawProduct};
    use chrono::NaiveDate;

    fn product(prefix: &str, template: &str) -> ProductDefinition {
        validate("test_product", &RawProduct::new(prefix, template, 2, "average")).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_join_key_slashes() {
        assert_eq!(join_key("a/b", "c"), "a/b/c");
        assert_eq!(join_key("a/b/", "c"), "a/b/c");
        assert_eq!(join_key("a/b", "/c"), "a/b/c");
        assert_eq!(join_key("a/b//", "//c/"), "a/b/c/");
        assert_eq!(join_key("/a/b", "c"), "/a/b/c");
    }

    #[test]
    fn test_render_default_time_format() {
        let p = product("fc", "LS5_{x}_{y}_{time}");
        let time = Utc.with_ymd_and_hms(1987, 5, 6, 23, 12, 57).unwrap();
        let ctx = CoordinateContext::tile(9, -39).with_time(time);
        assert_eq!(render_name(&p, &ctx).unwrap(), "LS5_9_-39_19870506231257");
    }

    #[test]
    fn test_render_escaped_braces() {
        let p = product("raw", "{{band}}_{x}_{y}");
        assert_eq!(
            render_name(&p, &CoordinateContext::tile(1, 2)).unwrap(),
            "{band}_1_2"
        );
    }

    #[test]
    fn test_type_mismatches() {
        let p = product("fc", "x_{x}/y_{y}/{time:%Y}");

        let ctx = CoordinateContext::new()
            .with(TokenName::X, 1.5)
            .with(TokenName::Y, 2i64)
            .with_time(day(2000, 1, 1));
        assert!(matches!(
            resolve(&p, &ctx),
            Err(CatalogError::TypeMismatch { token: TokenName::X, expected: "an integer", .. })
        ));

        let ctx = CoordinateContext::tile(1, 2).with(TokenName::Time, 2000i64);
        assert!(matches!(
            resolve(&p, &ctx),
            Err(CatalogError::TypeMismatch { token: TokenName::Time, expected: "a timestamp", .. })
        ));

        let g = product("item", "lon_{lon}/lat_{lat}");
        let ctx = CoordinateContext::geo(f64::NAN, 2i64);
        assert!(matches!(
            resolve(&g, &ctx),
            Err(CatalogError::TypeMismatch { token: TokenName::Lon, .. })
        ));
    }

    #[test]
    fn test_other_grid_axes_rejected() {
        let g = product("item", "lon_{lon}/lat_{lat}");
        let ctx = CoordinateContext::geo(149i64, -35i64)
            .with(TokenName::X, 15i64)
            .with(TokenName::Y, -40i64);
        match resolve(&g, &ctx) {
            Err(CatalogError::TypeMismatch { token, found, .. }) => {
                assert_eq!(token, TokenName::X);
                assert_eq!(found, "15");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }

        let p = product("wofs", "x_{x}/y_{y}");
        let ctx = CoordinateContext::tile(1, 2).with(TokenName::Lat, -35.5);
        assert!(matches!(
            resolve(&p, &ctx),
            Err(CatalogError::TypeMismatch { token: TokenName::Lat, .. })
        ));
    }

    #[test]
    fn test_missing_value_reported_before_other_grid() {
        let g = product("item", "lon_{lon}/lat_{lat}");
        assert!(matches!(
            resolve(&g, &CoordinateContext::tile(15, -40)),
            Err(CatalogError::MissingContextValue { token: TokenName::Lon, .. })
        ));
    }

    #[test]
    fn test_time_only_product_accepts_any_grid() {
        let p = product("seasonal", "{start_time:%Y}/FC_{start_time:%Y%m%d}_{end_time:%Y%m%d}");
        let ctx = CoordinateContext::tile(1, 2)
            .with(TokenName::Lon, 3i64)
            .with_period(day(2010, 1, 1), day(2010, 12, 31));
        assert_eq!(render_name(&p, &ctx).unwrap(), "2010/FC_20100101_20101231");
    }

    #[test]
    fn test_parse_key_partial_dates() {
        let p = product("wofs/annual", "x_{x}/y_{y}/{time:%Y}/WOFS_{x}_{y}_{time:%Y}");
        let ctx = parse_key(&p, "wofs/annual/x_3/y_-4/2015/WOFS_3_-4_2015").unwrap();
        assert_eq!(ctx.get(TokenName::X), Some(TokenValue::Int(3)));
        assert_eq!(ctx.get(TokenName::Time), Some(TokenValue::from(day(2015, 1, 1))));
    }

    #[test]
    fn test_parse_key_rejects_inconsistent_repeats() {
        let p = product("wofs/annual", "x_{x}/y_{y}/{time:%Y}/WOFS_{x}_{y}_{time:%Y}");
        assert!(matches!(
            parse_key(&p, "wofs/annual/x_3/y_-4/2015/WOFS_4_-4_2015"),
            Err(CatalogError::UnmatchedKey(_))
        ));
        assert!(matches!(
            parse_key(&p, "wofs/annual/x_3/y_-4/2015/WOFS_3_-4_2016"),
            Err(CatalogError::UnmatchedKey(_))
        ));
    }

    #[test]
    fn test_parse_key_requires_segment_boundary() {
        let p = product("item_v2/v2.0.1/relative", "lon_{lon}/lat_{lat}");
        assert!(parse_key(&p, "item_v2/v2.0.1/relative/lon_150/lat_-35").is_ok());
        assert!(parse_key(&p, "item_v2/v2.0.1/relativeX/lon_150/lat_-35").is_err());
        assert!(parse_key(&p, "/item_v2/v2.0.1/relative/lon_150.25/lat_-35").is_ok());
    }

    #[test]
    fn test_parse_key_restores_leading_slash() {
        let p = product("root", "/x_{x}/y_{y}");
        let key = resolve(&p, &CoordinateContext::tile(5, 6)).unwrap();
        assert_eq!(key, "root/x_5/y_6");
        assert_eq!(parse_key(&p, &key).unwrap(), CoordinateContext::tile(5, 6));
    }
}
