//! Filename template parsing.
//!
//! Templates are brace-delimited in the style of `LS_WATER_3577_{x}_{y}_{time:%Y-%m-%d}`.
//! `{{` and `}}` stand for literal braces. Parsing happens once at catalog load
//! time; everything downstream works on the parsed segment list.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{CatalogError, Result};
use crate::token::{TimeFormat, TokenKind, TokenName};

/// One substitution point in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: TokenName,
    /// Date format for temporal tokens. Temporal tokens written without a
    /// specifier get the default format; other tokens never carry one.
    pub format: Option<TimeFormat>,
}

impl Placeholder {
    fn parse(body: &str) -> std::result::Result<Self, String> {
        let (name, spec) = match body.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (body, None),
        };

        if name.is_empty() {
            return Err("empty token '{}'".to_string());
        }
        let name: TokenName = name.parse()?;

        let format = match (name.accepts_format(), spec) {
            (true, Some(spec)) => Some(TimeFormat::parse(spec)?),
            (true, None) => Some(TimeFormat::default_format()),
            (false, Some(_)) => {
                return Err(format!("token '{}' does not take a format specifier", name))
            }
            (false, None) => None,
        };

        Ok(Self { name, format })
    }

    /// True if a rendered value of this placeholder may contain `c`.
    fn can_emit(&self, c: char) -> bool {
        match (self.name.kind(), &self.format) {
            (TokenKind::GridIndex, _) => c.is_ascii_digit() || c == '-',
            (TokenKind::GeoIndex, _) => c.is_ascii_digit() || c == '-' || c == '.',
            (TokenKind::Temporal, Some(format)) => c.is_ascii_digit() || format.emits_literal(c),
            (TokenKind::Temporal, None) => c.is_ascii_digit(),
        }
    }
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(Placeholder),
}

/// A parsed and validated filename template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    /// Distinct tokens in order of first appearance.
    tokens: Vec<TokenName>,
}

impl Template {
    /// Parse a template string.
    ///
    /// Unknown tokens, unbalanced braces, bad format specifiers and templates
    /// without any token are rejected here rather than at render time.
    pub fn parse(source: &str) -> Result<Self> {
        let malformed = |reason: String| CatalogError::MalformedTemplate {
            template: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => {
                                return Err(malformed(format!(
                                    "'{{' inside token '{{{}'",
                                    body
                                )))
                            }
                            Some(c) => body.push(c),
                            None => return Err(malformed(format!("unclosed token '{{{}'", body))),
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token(Placeholder::parse(&body).map_err(malformed)?));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(malformed("unmatched '}'".to_string())),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let mut tokens = Vec::new();
        for segment in &segments {
            if let Segment::Token(p) = segment {
                if !tokens.contains(&p.name) {
                    tokens.push(p.name);
                }
            }
        }
        if tokens.is_empty() {
            return Err(malformed("template has no substitution token".to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            tokens,
        })
    }

    /// The template exactly as written in the catalog.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distinct tokens the template needs, in order of first appearance.
    pub fn tokens(&self) -> &[TokenName] {
        &self.tokens
    }

    pub fn uses(&self, token: TokenName) -> bool {
        self.tokens.contains(&token)
    }

    pub fn uses_kind(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|t| t.kind() == kind)
    }

    /// True if some context could render a name that starts with `target`.
    ///
    /// Leading slashes of the template are ignored, as they are when the name
    /// is joined to a prefix.
    pub(crate) fn could_render_prefix(&self, target: &str) -> bool {
        match self.segments.split_first() {
            Some((Segment::Literal(text), rest)) => {
                literal_then(text.trim_start_matches('/'), rest, target)
            }
            _ => segments_could_render(&self.segments, target),
        }
    }

    /// Split a rendered name back into raw token values.
    ///
    /// Literal segments must match exactly. Temporal tokens span the fixed
    /// width of their format; coordinate tokens span the longest numeric run.
    /// Values are not checked for consistency between repeated tokens here.
    pub(crate) fn split_rendered<'a>(
        &'a self,
        rendered: &'a str,
    ) -> Option<Vec<(&'a Placeholder, &'a str)>> {
        let mut rest = rendered;
        let mut captures = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rest = rest.strip_prefix(text.as_str())?,
                Segment::Token(placeholder) => {
                    let len = match (placeholder.name.kind(), &placeholder.format) {
                        (TokenKind::Temporal, Some(format)) => format.width(),
                        (TokenKind::GeoIndex, _) => numeric_run(rest, true),
                        _ => numeric_run(rest, false),
                    };
                    if len == 0 || len > rest.len() || !rest.is_char_boundary(len) {
                        return None;
                    }
                    let (value, tail) = rest.split_at(len);
                    captures.push((placeholder, value));
                    rest = tail;
                }
            }
        }

        rest.is_empty().then_some(captures)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

fn literal_then(text: &str, rest: &[Segment], target: &str) -> bool {
    let n = text.len().min(target.len());
    text.as_bytes()[..n] == target.as_bytes()[..n] && segments_could_render(rest, &target[n..])
}

fn segments_could_render(segments: &[Segment], target: &str) -> bool {
    if target.is_empty() {
        return true;
    }
    match segments.split_first() {
        None => false,
        Some((Segment::Literal(text), rest)) => literal_then(text, rest, target),
        Some((Segment::Token(placeholder), rest)) => target
            .char_indices()
            .take_while(|&(_, c)| placeholder.can_emit(c))
            .any(|(i, c)| segments_could_render(rest, &target[i + c.len_utf8()..])),
    }
}

/// Length of the signed number at the start of `s`, 0 if there is none.
fn numeric_run(s: &str, fractional: bool) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let sign = usize::from(bytes.first() == Some(&b'-'));
    let whole = digits_from(sign);
    if whole == 0 {
        return 0;
    }

    let mut end = sign + whole;
    if fractional && bytes.get(end) == Some(&b'.') {
        let frac = digits_from(end + 1);
        if frac > 0 {
            end += 1 + frac;
        }
    }
    end
}
