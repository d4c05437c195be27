//! Template token grammar.
//!
//! A template placeholder is one of a closed set of names. Each name has a
//! value kind that decides which context values it accepts and whether it may
//! carry a date format specifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder names recognised in a `name_template`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenName {
    X,
    Y,
    Lon,
    Lat,
    Time,
    StartTime,
    EndTime,
}

/// What kind of value a token is substituted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer tile index on a projected grid (`x`, `y`)
    GridIndex,
    /// Integer or fractional geographic index (`lon`, `lat`)
    GeoIndex,
    /// Timestamp rendered through a date format (`time`, `start_time`, `end_time`)
    Temporal,
}

impl TokenName {
    /// Every recognised token, in slot order.
    pub const ALL: [TokenName; 7] = [
        TokenName::X,
        TokenName::Y,
        TokenName::Lon,
        TokenName::Lat,
        TokenName::Time,
        TokenName::StartTime,
        TokenName::EndTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenName::X => "x",
            TokenName::Y => "y",
            TokenName::Lon => "lon",
            TokenName::Lat => "lat",
            TokenName::Time => "time",
            TokenName::StartTime => "start_time",
            TokenName::EndTime => "end_time",
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            TokenName::X | TokenName::Y => TokenKind::GridIndex,
            TokenName::Lon | TokenName::Lat => TokenKind::GeoIndex,
            TokenName::Time | TokenName::StartTime | TokenName::EndTime => TokenKind::Temporal,
        }
    }

    /// Only temporal tokens accept a `:`-prefixed format specifier.
    pub fn accepts_format(&self) -> bool {
        self.kind() == TokenKind::Temporal
    }

    /// Position of this token in a fixed-size slot array.
    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenName::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown token '{}'", s))
    }
}

/// Format used for temporal tokens that carry no specifier.
pub const DEFAULT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// A validated strftime specifier.
///
/// Only fixed-width numeric codes are accepted so that a rendered value always
/// occupies the same number of characters and can be read back out of a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeFormat {
    spec: String,
    width: usize,
}

impl TimeFormat {
    /// Validate a specifier such as `%Y-%m-%d`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        if spec.is_empty() {
            return Err("empty format specifier".to_string());
        }

        let mut width = 0;
        let mut chars = spec.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                width += ch.len_utf8();
                continue;
            }
            let code = chars
                .next()
                .ok_or_else(|| format!("format specifier '{}' ends with a bare '%'", spec))?;
            width += code_width(code).ok_or_else(|| {
                format!("unsupported date code '%{}' in '{}'", code, spec)
            })?;
        }

        Ok(Self {
            spec: spec.to_string(),
            width,
        })
    }

    pub fn default_format() -> Self {
        Self {
            spec: DEFAULT_TIME_FORMAT.to_string(),
            width: 14,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.spec
    }

    /// Number of bytes a rendered value occupies.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if `c` is written verbatim by the format, outside any date code.
    pub(crate) fn emits_literal(&self, c: char) -> bool {
        let mut chars = self.spec.chars();
        while let Some(ch) = chars.next() {
            if ch == '%' {
                if chars.next() == Some('%') && c == '%' {
                    return true;
                }
            } else if ch == c {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

/// Rendered width of a supported date code.
fn code_width(code: char) -> Option<usize> {
    match code {
        'Y' => Some(4),
        'y' | 'm' | 'd' | 'H' | 'M' | 'S' => Some(2),
        'f' => Some(9),
        '%' => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_names() {
        for token in TokenName::ALL {
            assert_eq!(token.as_str().parse::<TokenName>().unwrap(), token);
        }
        assert!("z".parse::<TokenName>().is_err());
        assert!("X".parse::<TokenName>().is_err());
    }

    #[test]
    fn test_token_kinds() {
        assert_eq!(TokenName::X.kind(), TokenKind::GridIndex);
        assert_eq!(TokenName::Lat.kind(), TokenKind::GeoIndex);
        assert_eq!(TokenName::EndTime.kind(), TokenKind::Temporal);
        assert!(TokenName::StartTime.accepts_format());
        assert!(!TokenName::Y.accepts_format());
    }

    #[test]
    fn test_slots_are_distinct() {
        let slots: Vec<usize> = TokenName::ALL.iter().map(|t| t.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_time_format_width() {
        assert_eq!(TimeFormat::parse("%Y-%m-%d").unwrap().width(), 10);
        assert_eq!(TimeFormat::parse("%Y%m%d").unwrap().width(), 8);
        assert_eq!(TimeFormat::parse("%Y%m%d%H%M%S%f").unwrap().width(), 23);
        assert_eq!(TimeFormat::parse("%%Y").unwrap().width(), 2);
        assert_eq!(TimeFormat::default_format().width(), 14);
        assert_eq!(
            TimeFormat::parse(DEFAULT_TIME_FORMAT).unwrap(),
            TimeFormat::default_format()
        );
    }

    #[test]
    fn test_time_format_rejects_unsupported() {
        assert!(TimeFormat::parse("").is_err());
        assert!(TimeFormat::parse("%Y-%").is_err());
        assert!(TimeFormat::parse("%j").is_err());
        assert!(TimeFormat::parse("%b %Y").is_err());
    }

    #[test]
    fn test_time_format_literal_chars() {
        let format = TimeFormat::parse("%Y/%m-%%").unwrap();
        assert!(format.emits_literal('/'));
        assert!(format.emits_literal('-'));
        assert!(format.emits_literal('%'));
        assert!(!format.emits_literal('Y'));
        assert!(!TimeFormat::default_format().emits_literal('/'));
    }
}
