//! Field parsing and type normalization for WLS data lines
//!
//! Data lines carry whitespace-delimited text fields aligned to the global
//! column declaration. Columns named in the fixed type table are coerced to
//! their numeric kind; coercion failure yields a null for that field rather
//! than discarding the row. The sentinel literal `999.00` also denotes null.

use crate::app::models::{FieldValue, Row};
use crate::constants::{column_kind, ColumnKind, MISSING_SENTINEL};

use super::columns::ColumnMap;

/// Parse a single text field against the kind declared for its column.
///
/// Unknown columns keep the raw text; the sentinel and any coercion failure
/// produce `Null`.
pub fn parse_field(token: &str, kind: Option<ColumnKind>) -> FieldValue {
    if token == MISSING_SENTINEL {
        return FieldValue::Null;
    }

    match kind {
        Some(ColumnKind::Integer) => match parse_integer(token) {
            Some(v) => FieldValue::Int(v),
            None => FieldValue::Null,
        },
        Some(ColumnKind::Real) => match token.parse::<f64>() {
            Ok(v) => FieldValue::Float(v),
            Err(_) => FieldValue::Null,
        },
        None => FieldValue::Text(token.to_string()),
    }
}

/// Parse an integer field, accepting float-formatted whole numbers.
///
/// The vendor emits integer-kind columns as "5" or "5.0" depending on the
/// firmware revision; both must land in the same typed value.
fn parse_integer(token: &str) -> Option<i64> {
    if let Ok(v) = token.parse::<i64>() {
        return Some(v);
    }
    match token.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

/// Parse one data line into a typed row aligned to the declared columns.
///
/// Short lines pad the remaining fields with nulls; excess fields are
/// dropped. Returns the row together with the count of excess fields so
/// the caller can emit a diagnostic.
pub fn parse_data_line(line: &str, columns: &ColumnMap) -> (Row, usize) {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let mut fields = Vec::with_capacity(columns.len());
    for (i, name) in columns.names().iter().enumerate() {
        let value = match tokens.get(i) {
            Some(token) => parse_field(token, column_kind(name)),
            None => FieldValue::Null,
        };
        fields.push(value);
    }

    let excess = tokens.len().saturating_sub(columns.len());
    (Row::new(fields), excess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_integer() {
        assert_eq!(
            parse_field("2022", Some(ColumnKind::Integer)),
            FieldValue::Int(2022)
        );
        assert_eq!(
            parse_field("5.0", Some(ColumnKind::Integer)),
            FieldValue::Int(5)
        );
        assert_eq!(
            parse_field("5.7", Some(ColumnKind::Integer)),
            FieldValue::Null
        );
        assert_eq!(
            parse_field("abc", Some(ColumnKind::Integer)),
            FieldValue::Null
        );
    }

    #[test]
    fn test_parse_field_real() {
        assert_eq!(
            parse_field("2.41", Some(ColumnKind::Real)),
            FieldValue::Float(2.41)
        );
        assert_eq!(
            parse_field("-0.5", Some(ColumnKind::Real)),
            FieldValue::Float(-0.5)
        );
        assert_eq!(parse_field("n/a", Some(ColumnKind::Real)), FieldValue::Null);
    }

    #[test]
    fn test_parse_field_sentinel_is_null_for_every_kind() {
        assert_eq!(parse_field("999.00", Some(ColumnKind::Real)), FieldValue::Null);
        assert_eq!(
            parse_field("999.00", Some(ColumnKind::Integer)),
            FieldValue::Null
        );
        assert_eq!(parse_field("999.00", None), FieldValue::Null);
    }

    #[test]
    fn test_parse_field_unknown_column_keeps_text() {
        assert_eq!(
            parse_field("XYZ", None),
            FieldValue::Text("XYZ".to_string())
        );
    }

    #[test]
    fn test_parse_data_line_alignment() {
        let columns = ColumnMap::from_tokens(["TYRS", "MWHT", "NOTE"]);

        let (row, excess) = parse_data_line("2022 2.41 calm", &columns);
        assert_eq!(excess, 0);
        assert_eq!(row.fields[0], FieldValue::Int(2022));
        assert_eq!(row.fields[1], FieldValue::Float(2.41));
        assert_eq!(row.fields[2], FieldValue::Text("calm".to_string()));
    }

    #[test]
    fn test_parse_data_line_short_row_pads_nulls() {
        let columns = ColumnMap::from_tokens(["TYRS", "MWHT", "MWPD"]);

        let (row, excess) = parse_data_line("2022", &columns);
        assert_eq!(excess, 0);
        assert_eq!(row.fields.len(), 3);
        assert_eq!(row.fields[1], FieldValue::Null);
        assert_eq!(row.fields[2], FieldValue::Null);
    }

    #[test]
    fn test_parse_data_line_excess_fields_counted() {
        let columns = ColumnMap::from_tokens(["TYRS"]);

        let (row, excess) = parse_data_line("2022 9 9 9", &columns);
        assert_eq!(row.fields.len(), 1);
        assert_eq!(excess, 3);
    }
}
