//! Range types and their text-encoding converters.
//!
//! The wire form is the Postgres range text encoding: `[lo,hi)`, `(,hi]`,
//! quoted bounds where the text requires it, and the literal `empty` for the
//! canonical empty range. Construction of a [`Range`] is total; only parsing
//! a malformed text or bound can fail.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bind::ConverterScope;
use crate::convert::Converter;
use crate::error::{ConversionError, ConversionResult};

/// An interval with two optional endpoints and per-endpoint inclusivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub lower: Option<T>,
    pub lower_inc: bool,
    pub upper: Option<T>,
    pub upper_inc: bool,
}

impl<T> Range<T> {
    /// Construct a range from two optional bounds and inclusivity flags.
    /// Total: any combination is a value.
    pub fn new(lower: Option<T>, lower_inc: bool, upper: Option<T>, upper_inc: bool) -> Self {
        Self {
            lower,
            lower_inc,
            upper,
            upper_inc,
        }
    }

    /// The common `[lo, hi)` form.
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::new(Some(lower), true, Some(upper), false)
    }
}

impl<T: PartialEq> Range<T> {
    /// Whether this range contains no points.
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => lower == upper && !(self.lower_inc && self.upper_inc),
            _ => false,
        }
    }
}

pub type DateRange = Range<NaiveDate>;
pub type TimestampRange = Range<NaiveDateTime>;
pub type IntRange = Range<i32>;
pub type BigIntRange = Range<i64>;
pub type NumericRange = Range<Decimal>;

/// A type usable as a range endpoint.
pub trait RangeBound: Default + PartialEq + Sized {
    /// Parse one bound from its unquoted text form.
    fn parse_bound(text: &str) -> ConversionResult<Self>;

    /// Format one bound as unquoted text.
    fn format_bound(&self) -> String;
}

impl RangeBound for NaiveDate {
    fn parse_bound(text: &str) -> ConversionResult<Self> {
        text.parse()
            .map_err(|e: chrono::ParseError| {
                ConversionError::invalid_value("date", text, e.to_string())
            })
    }

    fn format_bound(&self) -> String {
        self.to_string()
    }
}

impl RangeBound for NaiveDateTime {
    fn parse_bound(text: &str) -> ConversionResult<Self> {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|e| ConversionError::invalid_value("timestamp", text, e.to_string()))
    }

    fn format_bound(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

impl RangeBound for i32 {
    fn parse_bound(text: &str) -> ConversionResult<Self> {
        text.parse()
            .map_err(|e: std::num::ParseIntError| {
                ConversionError::invalid_value("i32", text, e.to_string())
            })
    }

    fn format_bound(&self) -> String {
        self.to_string()
    }
}

impl RangeBound for i64 {
    fn parse_bound(text: &str) -> ConversionResult<Self> {
        text.parse()
            .map_err(|e: std::num::ParseIntError| {
                ConversionError::invalid_value("i64", text, e.to_string())
            })
    }

    fn format_bound(&self) -> String {
        self.to_string()
    }
}

impl RangeBound for Decimal {
    fn parse_bound(text: &str) -> ConversionResult<Self> {
        text.parse()
            .map_err(|e: rust_decimal::Error| {
                ConversionError::invalid_value("decimal", text, e.to_string())
            })
    }

    fn format_bound(&self) -> String {
        self.to_string()
    }
}

/// Converts between range text and [`Range<T>`].
pub struct RangeConverter<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> RangeConverter<T> {
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> Default for RangeConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RangeBound> RangeConverter<T> {
    /// The canonical empty range for this bound type: `[epoch, epoch)`.
    pub fn empty_range() -> Range<T> {
        Range::closed_open(T::default(), T::default())
    }
}

impl<T: RangeBound + 'static> Converter for RangeConverter<T> {
    type Wire = String;
    type Domain = Range<T>;

    fn to(
        &self,
        value: Option<Range<T>>,
        _scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<String>> {
        Ok(value.map(|range| {
            if range.is_empty() {
                return "empty".to_string();
            }
            let mut out = String::new();
            out.push(if range.lower_inc { '[' } else { '(' });
            if let Some(lower) = &range.lower {
                out.push_str(&quote_bound(&lower.format_bound()));
            }
            out.push(',');
            if let Some(upper) = &range.upper {
                out.push_str(&quote_bound(&upper.format_bound()));
            }
            out.push(if range.upper_inc { ']' } else { ')' });
            out
        }))
    }

    fn from(
        &self,
        value: Option<String>,
        _scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Range<T>>> {
        value.map(|text| parse_range(&text)).transpose()
    }
}

fn parse_range<T: RangeBound>(text: &str) -> ConversionResult<Range<T>> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("empty") {
        return Ok(RangeConverter::<T>::empty_range());
    }

    let mut chars = trimmed.chars();
    let lower_inc = match chars.next() {
        Some('[') => true,
        Some('(') => false,
        _ => return Err(ConversionError::MalformedRange(text.to_string())),
    };
    let upper_inc = match chars.next_back() {
        Some(']') => true,
        Some(')') => false,
        _ => return Err(ConversionError::MalformedRange(text.to_string())),
    };

    let inner = chars.as_str();
    let (lower_text, upper_text) =
        split_bounds(inner).ok_or_else(|| ConversionError::MalformedRange(text.to_string()))?;

    let lower = parse_bound_text::<T>(&lower_text)?;
    let upper = parse_bound_text::<T>(&upper_text)?;
    Ok(Range::new(lower, lower_inc, upper, upper_inc))
}

/// Split the range interior at the top-level comma, honoring quoted bounds.
fn split_bounds(inner: &str) -> Option<(String, String)> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                return Some((inner[..i].to_string(), inner[i + 1..].to_string()));
            }
            _ => {}
        }
    }
    None
}

fn parse_bound_text<T: RangeBound>(text: &str) -> ConversionResult<Option<T>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let unquoted = if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1]
            .replace("\\\"", "\"")
            .replace("\"\"", "\"")
    } else {
        trimmed.to_string()
    };
    T::parse_bound(&unquoted).map(Some)
}

fn quote_bound(text: &str) -> String {
    let needs_quoting = text.is_empty()
        || text
            .chars()
            .any(|c| matches!(c, ',' | '"' | '\\' | ' ' | '(' | ')' | '[' | ']'));
    if needs_quoting {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        text.to_string()
    }
}
