//! Column filter kinds and values.
//!
//! Every filterable column has a [`FilterKind`] that fixes the shape of its
//! [`FilterValue`]. Each kind has an "unset" representation that clearing a
//! filter returns to, and unset values are never sent to the data source.
//!
//! # Example
//!
//! ```
//! use datatable_lib::filter::{Comparator, FilterKind, FilterValue};
//!
//! let value = FilterValue::number(Comparator::Ge, 66.0);
//! assert_eq!(value.kind(), FilterKind::Number);
//! assert!(!value.is_unset());
//!
//! assert!(FilterKind::Text.empty_value().unwrap().is_unset());
//! ```

mod store;

pub use store::FilterStateStore;

use chrono::DateTime;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// The filter widget a column uses, which determines its value shape.
///
/// Serialized names follow the table settings format (`"NumberFilter"`,
/// `"TextFilter"`, `"CustomDateRangeFilter"`, `"SelectFilter"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterKind {
    /// No filter UI and no filter value.
    #[default]
    None,
    /// Numeric comparison: comparator plus number.
    #[serde(rename = "NumberFilter")]
    Number,
    /// Free text.
    #[serde(rename = "TextFilter")]
    Text,
    /// Inclusive date range.
    #[serde(rename = "CustomDateRangeFilter", alias = "DateRangeFilter")]
    DateRange,
    /// One value out of a fixed option list.
    #[serde(rename = "SelectFilter")]
    Select,
}

impl FilterKind {
    /// Returns the unset value for this kind, or `None` for [`FilterKind::None`].
    pub fn empty_value(self) -> Option<FilterValue> {
        match self {
            FilterKind::None => None,
            FilterKind::Number => Some(FilterValue::Number(NumberFilter::default())),
            FilterKind::Text => Some(FilterValue::Text(String::new())),
            FilterKind::DateRange => Some(FilterValue::DateRange(DateRange::default())),
            FilterKind::Select => Some(FilterValue::Select(String::new())),
        }
    }

    /// Fits a value to this kind, returning `None` if its shape does not match.
    ///
    /// Text and select values share a shape, so either is accepted for both
    /// kinds and re-tagged. An empty number value is accepted as an empty date
    /// range because both deserialize from `{}`.
    pub fn accept(self, value: FilterValue) -> Option<FilterValue> {
        match (self, value) {
            (FilterKind::Number, FilterValue::Number(n)) => {
                n.number.is_none_or(f64::is_finite).then_some(FilterValue::Number(n))
            }
            (FilterKind::DateRange, FilterValue::DateRange(r)) => Some(FilterValue::DateRange(r)),
            (FilterKind::DateRange, FilterValue::Number(n)) if n == NumberFilter::default() => {
                Some(FilterValue::DateRange(DateRange::default()))
            }
            (FilterKind::Text, FilterValue::Text(s) | FilterValue::Select(s)) => Some(FilterValue::Text(s)),
            (FilterKind::Select, FilterValue::Text(s) | FilterValue::Select(s)) => Some(FilterValue::Select(s)),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterKind::None => "none",
            FilterKind::Number => "number",
            FilterKind::Text => "text",
            FilterKind::DateRange => "date range",
            FilterKind::Select => "select",
        };
        f.write_str(name)
    }
}

/// Comparison operator of a number filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Comparator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Comparator {
    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
        }
    }
}

/// Value of a number filter.
///
/// The filter is unset while `number` is absent, even when a comparator has
/// been pre-selected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
}

impl NumberFilter {
    /// Creates a number filter with only a comparator selected.
    pub fn with_comparator(comparator: Comparator) -> Self {
        Self {
            comparator: Some(comparator),
            number: None,
        }
    }

    /// Returns the comparator, falling back to `=`.
    pub fn comparator_or_default(&self) -> Comparator {
        self.comparator.unwrap_or_default()
    }
}

/// Value of a date range filter. Either bound may be open.
///
/// Bounds decode from plain dates (`"2017-01-01"`) or RFC 3339 timestamps
/// (`"2017-01-01T00:00:00.000Z"`), keeping the timestamp's calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    #[serde(default, deserialize_with = "deserialize_bound", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_bound", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Deserializes a date bound which can be either a date or a timestamp.
fn deserialize_bound<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .or_else(|_| DateTime::parse_from_rfc3339(&s).map(|timestamp| timestamp.date_naive()))
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date bound: {}", s))),
    }
}

impl DateRange {
    /// Returns `true` if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// A kind-tagged filter value.
///
/// Deserialization is untagged: objects become number filters or date
/// ranges, strings become text. Use [`FilterKind::accept`] to re-tag a
/// decoded value for its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(NumberFilter),
    DateRange(DateRange),
    Text(String),
    Select(String),
}

impl FilterValue {
    /// Creates a number filter value.
    pub fn number(comparator: Comparator, number: f64) -> Self {
        FilterValue::Number(NumberFilter {
            comparator: Some(comparator),
            number: Some(number),
        })
    }

    /// Creates a text filter value.
    pub fn text(text: impl Into<String>) -> Self {
        FilterValue::Text(text.into())
    }

    /// Creates a select filter value.
    pub fn select(option: impl Into<String>) -> Self {
        FilterValue::Select(option.into())
    }

    /// Creates a date range filter value.
    pub fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        FilterValue::DateRange(DateRange { from, to })
    }

    /// Returns the kind this value belongs to.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::Number(_) => FilterKind::Number,
            FilterValue::DateRange(_) => FilterKind::DateRange,
            FilterValue::Text(_) => FilterKind::Text,
            FilterValue::Select(_) => FilterKind::Select,
        }
    }

    /// Returns `true` if this is the unset representation of its kind.
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::Number(n) => n.number.is_none(),
            FilterValue::DateRange(r) => r.is_empty(),
            FilterValue::Text(s) | FilterValue::Select(s) => s.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_decoding() {
        let number: FilterValue = serde_json::from_str(r#"{"comparator":"=","number":66}"#).unwrap();
        assert_eq!(number, FilterValue::number(Comparator::Eq, 66.0));

        let range: FilterValue = serde_json::from_str(r#"{"from":"2017-01-01","to":"2017-01-02"}"#).unwrap();
        assert_eq!(range.kind(), FilterKind::DateRange);

        let text: FilterValue = serde_json::from_str(r#""Dave""#).unwrap();
        assert_eq!(text, FilterValue::text("Dave"));
    }

    #[test]
    fn test_date_bounds_accept_timestamps() {
        let range: DateRange =
            serde_json::from_str(r#"{"from":"2017-01-01T00:00:00.000Z","to":"2017-01-31"}"#).unwrap();

        assert_eq!(range.from, NaiveDate::from_ymd_opt(2017, 1, 1));
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2017, 1, 31));
        assert_eq!(serde_json::to_string(&range).unwrap(), r#"{"from":"2017-01-01","to":"2017-01-31"}"#);
    }

    #[test]
    fn test_date_bounds_reject_garbage() {
        assert!(serde_json::from_str::<DateRange>(r#"{"from":"yesterday"}"#).is_err());

        let open: DateRange = serde_json::from_str(r#"{"from":null}"#).unwrap();
        assert!(open.is_empty());
    }

    #[test]
    fn test_accept_retags_strings() {
        assert_eq!(
            FilterKind::Select.accept(FilterValue::text("Amend")),
            Some(FilterValue::select("Amend"))
        );
        assert_eq!(
            FilterKind::Text.accept(FilterValue::select("Dave")),
            Some(FilterValue::text("Dave"))
        );
    }

    #[test]
    fn test_accept_empty_object_as_date_range() {
        let empty: FilterValue = serde_json::from_str("{}").unwrap();
        assert_eq!(
            FilterKind::DateRange.accept(empty),
            Some(FilterValue::DateRange(DateRange::default()))
        );
    }

    #[test]
    fn test_accept_rejects_mismatched_shapes() {
        assert_eq!(FilterKind::Number.accept(FilterValue::text("66")), None);
        assert_eq!(FilterKind::Text.accept(FilterValue::number(Comparator::Eq, 1.0)), None);
        assert_eq!(FilterKind::None.accept(FilterValue::text("x")), None);
        assert_eq!(FilterKind::Number.accept(FilterValue::number(Comparator::Eq, f64::NAN)), None);
    }

    #[test]
    fn test_unset_representations() {
        for kind in [FilterKind::Number, FilterKind::Text, FilterKind::DateRange, FilterKind::Select] {
            let empty = kind.empty_value().unwrap();
            assert!(empty.is_unset());
            assert_eq!(empty.kind(), kind);
        }
        assert!(FilterKind::None.empty_value().is_none());
        assert!(FilterValue::Number(NumberFilter::with_comparator(Comparator::Gt)).is_unset());
    }

    #[test]
    fn test_comparator_symbols() {
        assert_eq!(serde_json::to_string(&Comparator::Ge).unwrap(), r#"">=""#);
        assert_eq!(Comparator::Ne.as_str(), "!=");
        assert_eq!(NumberFilter::default().comparator_or_default(), Comparator::Eq);
    }
}
