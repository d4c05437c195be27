//! Coordinate and date generators for exercising templates in bulk.
//!
//! These generators create predictable, verifiable inputs that can be used
//! across the test suite and benches.

use chrono::{Datelike, Duration, NaiveDate};

/// Creates every `(x, y)` tile index in the inclusive ranges, row-major.
///
/// # Example
///
/// ```
/// use test_utils::tile_grid;
///
/// let tiles = tile_grid(-1..=1, 0..=1);
/// assert_eq!(tiles.len(), 6);
/// assert_eq!(tiles[0], (-1, 0));
/// assert_eq!(tiles[1], (0, 0));
/// assert_eq!(tiles[3], (-1, 1));
/// ```
pub fn tile_grid(
    xs: std::ops::RangeInclusive<i64>,
    ys: std::ops::RangeInclusive<i64>,
) -> Vec<(i64, i64)> {
    let mut tiles = Vec::new();
    for y in ys {
        for x in xs.clone() {
            tiles.push((x, y));
        }
    }
    tiles
}

/// Creates whole-degree `(lon, lat)` cells covering the Australian continent.
pub fn australian_cells() -> Vec<(i64, i64)> {
    tile_grid(112..=153, -44..=-10)
}

/// Creates `count` consecutive days starting at `start`.
pub fn daily_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start.iter_days().take(count).collect()
}

/// Creates `count` dates spaced `step_days` apart, like a revisit cycle.
pub fn revisit_dates(start: NaiveDate, step_days: i64, count: usize) -> Vec<NaiveDate> {
    (0..count as i64)
        .map(|i| start + Duration::days(i * step_days))
        .collect()
}

/// Creates calendar-year periods `(Jan 1, Dec 31)` for each year in the range.
pub fn annual_periods(years: std::ops::RangeInclusive<i32>) -> Vec<(NaiveDate, NaiveDate)> {
    years
        .filter_map(|year| {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
            Some((start, end))
        })
        .collect()
}

/// Creates April-October and November-March periods for each year.
pub fn seasonal_periods(years: std::ops::RangeInclusive<i32>) -> Vec<(NaiveDate, NaiveDate)> {
    let mut periods = Vec::new();
    for year in years {
        let dates = (
            NaiveDate::from_ymd_opt(year, 4, 1),
            NaiveDate::from_ymd_opt(year, 10, 31),
            NaiveDate::from_ymd_opt(year, 11, 1),
            NaiveDate::from_ymd_opt(year + 1, 3, 31),
        );
        if let (Some(a), Some(b), Some(c), Some(d)) = dates {
            periods.push((a, b));
            periods.push((c, d));
        }
    }
    periods
}

/// Builds a date from a `(year, month, day)` fixture tuple.
pub fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid fixture date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_grid() {
        let tiles = tile_grid(0..=2, -1..=0);
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles.first(), Some(&(0, -1)));
        assert_eq!(tiles.last(), Some(&(2, 0)));
    }

    #[test]
    fn test_empty_tile_grid() {
        #[allow(clippy::reversed_empty_ranges)]
        let tiles = tile_grid(1..=0, 0..=3);
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_australian_cells() {
        let cells = australian_cells();
        assert_eq!(cells.len(), 42 * 35);
        assert!(cells.contains(&(149, -35)));
    }

    #[test]
    fn test_daily_dates_cross_month() {
        let dates = daily_dates(date((2019, 2, 27)), 3);
        assert_eq!(dates[2], date((2019, 3, 1)));
    }

    #[test]
    fn test_revisit_dates() {
        let dates = revisit_dates(date((2019, 1, 1)), 16, 3);
        assert_eq!(dates, vec![date((2019, 1, 1)), date((2019, 1, 17)), date((2019, 2, 2))]);
    }

    #[test]
    fn test_annual_periods() {
        let periods = annual_periods(2010..=2012);
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0], (date((2010, 1, 1)), date((2010, 12, 31))));
    }

    #[test]
    fn test_seasonal_periods_wrap_year() {
        let periods = seasonal_periods(2015..=2015);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].0.month(), 11);
        assert_eq!(periods[1].1.year(), 2016);
    }
}
