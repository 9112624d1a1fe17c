//! Date resolution.
//!
//! Turns the first date entry of an archival object into one normalized date
//! for the digital object. Undated items borrow the collection's date range.

use aspace_model::{CollectionDateRange, DateRecord, ResolvedDate};

use crate::error::{Result, TransformError};

/// Marker that lets an item without a begin date fall back to the collection range.
const UNDATED: &str = "undated";

fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolve a date entry, or explain why it cannot be resolved.
///
/// Blank strings count as absent. `end` is dropped for single dates.
pub fn resolve_date(
    record: Option<&DateRecord>,
    collection_range: &CollectionDateRange,
) -> Result<ResolvedDate> {
    let record = record.ok_or(TransformError::MissingDates)?;
    let date_type = present(record.date_type.as_ref()).ok_or(TransformError::MissingDateType)?;

    let mut begin = present(record.begin.as_ref());
    let mut end = present(record.end.as_ref());
    let expression = present(record.expression.as_ref());

    let is_undated = expression
        .as_deref()
        .is_some_and(|expression| expression.contains(UNDATED));
    let is_single = date_type.contains("single");

    if begin.is_none() && expression.is_none() {
        return Err(TransformError::NoBeginNoExpression);
    }
    if begin.is_none() && !is_undated {
        return Err(TransformError::NoBeginNotUndated);
    }

    if is_undated {
        if begin.is_none() {
            begin = collection_range.start().map(str::to_string);
        }
        if end.is_none() {
            end = collection_range.end().map(str::to_string);
        }
    }

    let expression = match expression {
        Some(expression) => expression,
        None => derive_expression(begin.as_deref(), end.as_deref(), is_single)
            .ok_or(TransformError::NoBeginNoExpression)?,
    };

    let mut resolved = ResolvedDate::new(&date_type, expression);
    resolved.begin = begin;
    // The record's own end, never a copy of begin.
    resolved.end = if is_single { None } else { end };
    Ok(resolved)
}

fn derive_expression(begin: Option<&str>, end: Option<&str>, is_single: bool) -> Option<String> {
    let begin = begin?;
    if is_single {
        return Some(begin.to_string());
    }
    match end {
        // begin may already hold a compound range such as "1875-1879"
        Some(end) if begin.contains(end) => Some(begin.to_string()),
        Some(end) => Some(format!("{begin} - {end}")),
        None => Some(begin.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_range() -> CollectionDateRange {
        CollectionDateRange::default()
    }

    #[test]
    fn missing_entry_and_type_fail() {
        assert_eq!(
            resolve_date(None, &no_range()),
            Err(TransformError::MissingDates)
        );
        let record = DateRecord::default().begin("1900");
        assert_eq!(
            resolve_date(Some(&record), &no_range()),
            Err(TransformError::MissingDateType)
        );
    }

    #[test]
    fn begin_contained_range_keeps_begin() {
        let record = DateRecord::with_type("inclusive")
            .begin("1875-1879")
            .end("1879");
        let resolved = resolve_date(Some(&record), &no_range()).unwrap();
        assert_eq!(resolved.expression, "1875-1879");
        assert_eq!(resolved.end.as_deref(), Some("1879"));
    }

    #[test]
    fn begin_and_end_join_with_dash() {
        let record = DateRecord::with_type("inclusive").begin("1875").end("1879");
        let resolved = resolve_date(Some(&record), &no_range()).unwrap();
        assert_eq!(resolved.expression, "1875 - 1879");
        assert_eq!(resolved.begin.as_deref(), Some("1875"));
        assert_eq!(resolved.end.as_deref(), Some("1879"));
    }

    #[test]
    fn begin_alone_is_the_expression() {
        let record = DateRecord::with_type("bulk").begin("1901");
        let resolved = resolve_date(Some(&record), &no_range()).unwrap();
        assert_eq!(resolved.expression, "1901");
        assert_eq!(resolved.end, None);
    }

    #[test]
    fn expression_without_begin_must_be_undated() {
        let record = DateRecord::with_type("inclusive").expression("circa 1900");
        assert_eq!(
            resolve_date(Some(&record), &CollectionDateRange::parse("1875/1879")),
            Err(TransformError::NoBeginNotUndated)
        );
    }

    #[test]
    fn undated_without_range_keeps_expression_only() {
        let record = DateRecord::with_type("inclusive").expression("undated");
        let resolved = resolve_date(Some(&record), &CollectionDateRange::parse("1875")).unwrap();
        assert_eq!(resolved.expression, "undated");
        assert_eq!(resolved.begin, None);
        assert_eq!(resolved.end, None);
    }

    #[test]
    fn undated_fill_keeps_existing_begin() {
        let record = DateRecord::with_type("inclusive")
            .begin("1876")
            .expression("undated");
        let resolved =
            resolve_date(Some(&record), &CollectionDateRange::parse("1875/1879")).unwrap();
        assert_eq!(resolved.begin.as_deref(), Some("1876"));
        assert_eq!(resolved.end.as_deref(), Some("1879"));
    }

    #[test]
    fn undated_with_open_ended_range_fills_begin_only() {
        let record = DateRecord::with_type("inclusive").expression("undated");
        let resolved = resolve_date(Some(&record), &CollectionDateRange::parse("1875/")).unwrap();
        assert_eq!(resolved.begin.as_deref(), Some("1875"));
        assert_eq!(resolved.end, None);
        assert_eq!(resolved.expression, "undated");
    }

    #[test]
    fn undated_with_open_start_range_fills_end_only() {
        let record = DateRecord::with_type("inclusive").expression("undated");
        let resolved = resolve_date(Some(&record), &CollectionDateRange::parse("/1879")).unwrap();
        assert_eq!(resolved.begin, None);
        assert_eq!(resolved.end.as_deref(), Some("1879"));
        assert_eq!(resolved.expression, "undated");
    }

    #[test]
    fn end_is_never_copied_from_begin() {
        let record = DateRecord::with_type("inclusive").begin("1875").end("1890");
        let resolved = resolve_date(Some(&record), &no_range()).unwrap();
        assert_eq!(resolved.end.as_deref(), Some("1890"));
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let record = DateRecord::with_type("inclusive").begin("  ").expression("");
        assert_eq!(
            resolve_date(Some(&record), &no_range()),
            Err(TransformError::NoBeginNoExpression)
        );
    }
}
