pub mod decimal;
pub mod record;

use crate::consts::NULL_TOKEN;
use crate::error::{Blamed, FieldError};
use crate::schema::{ColumnDefinition, DataType};
use crate::types::Side;
use std::str::FromStr;

/// Compares one candidate value with its reference value under `column`'s type.
///
/// `tolerance` is the relative difference, in percent, allowed between
/// decimals; zero requires an exact match. Malformed values are reported with
/// the side they came from.
pub fn compare_field(
    column: &ColumnDefinition,
    candidate: &str,
    reference: &str,
    tolerance: f64,
) -> Result<bool, Blamed> {
    let candidate_null = candidate == NULL_TOKEN;
    let reference_null = reference == NULL_TOKEN;
    if column.is_nullable() {
        if candidate_null && reference_null {
            return Ok(true);
        }
    } else {
        if candidate_null {
            return Err(Blamed::new(Side::Candidate, FieldError::NullNotAllowed));
        }
        if reference_null {
            return Err(Blamed::new(Side::Reference, FieldError::NullNotAllowed));
        }
    }

    match *column.data_type() {
        DataType::Integer => compare_parsed::<i32>("integer", candidate, reference),
        DataType::BigInt => compare_parsed::<i64>("bigint", candidate, reference),
        DataType::Date => compare_parsed::<i64>("date", candidate, reference),
        DataType::Varchar { length } => compare_bounded("varchar", length, candidate, reference),
        DataType::Char { length } => compare_bounded("character", length, candidate, reference),
        DataType::Decimal { precision, .. } => {
            decimal::compare_decimal(candidate, reference, precision, tolerance)
        }
    }
}

// Converts the candidate, then the reference, tagging the first failure with
// its side.
pub(crate) fn convert_each<T, F>(
    candidate: &str,
    reference: &str,
    convert: F,
) -> Result<(T, T), Blamed>
where
    F: Fn(&str) -> Result<T, FieldError>,
{
    let candidate = convert(candidate).map_err(|e| Blamed::new(Side::Candidate, e))?;
    let reference = convert(reference).map_err(|e| Blamed::new(Side::Reference, e))?;
    Ok((candidate, reference))
}

fn compare_parsed<T: FromStr + PartialEq>(
    kind: &'static str,
    candidate: &str,
    reference: &str,
) -> Result<bool, Blamed> {
    let (candidate, reference) = convert_each(candidate, reference, |value| {
        value.parse::<T>().map_err(|_| FieldError::InvalidNumber {
            kind,
            value: value.to_string(),
        })
    })?;
    Ok(candidate == reference)
}

fn compare_bounded(
    kind: &'static str,
    length: u32,
    candidate: &str,
    reference: &str,
) -> Result<bool, Blamed> {
    convert_each(candidate, reference, |value| {
        if value.len() > length as usize {
            Err(FieldError::ExceedsLength { kind, length })
        } else {
            Ok(())
        }
    })?;
    Ok(candidate == reference)
}
