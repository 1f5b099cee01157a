use super::compare_field;
use crate::error::{Blamed, Result, StructureError, VerifyError};
use crate::read::fields::FieldReader;
use crate::schema::Schema;
use crate::types::{Side, Token};
use std::borrow::Cow;

fn structure_error(reader: &FieldReader, side: Side, kind: StructureError) -> VerifyError {
    VerifyError::RecordStructure {
        side,
        location: reader.location(),
        kind,
    }
}

fn next_value<'a>(reader: &mut FieldReader<'a>, side: Side) -> Result<Option<Cow<'a, str>>> {
    match reader.next_field() {
        Token::Field(value) => Ok(Some(value)),
        Token::EndOfFile => Ok(None),
        Token::EndOfRecord => Err(structure_error(reader, side, StructureError::TooFewFields)),
    }
}

/// Compares `candidate` against `reference` record by record and returns the
/// number of records that matched. Stops at the first discrepancy.
pub fn verify_records(
    schema: &Schema,
    candidate: &mut FieldReader,
    reference: &mut FieldReader,
    tolerance: f64,
) -> Result<usize> {
    let mut records = 0;
    loop {
        for (index, column) in schema.columns().iter().enumerate() {
            let candidate_value = next_value(candidate, Side::Candidate)?;
            let reference_value = next_value(reference, Side::Reference)?;

            let (candidate_value, reference_value) = match (candidate_value, reference_value) {
                (Some(c), Some(r)) => (c, r),
                (None, None) => {
                    if index > 0 {
                        tracing::warn!(
                            candidate = candidate.filename(),
                            reference = reference.filename(),
                            line = candidate.line_number(),
                            "both files end inside a record, the partial record was not compared"
                        );
                    }
                    tracing::debug!(
                        candidate = candidate.filename(),
                        records,
                        "file pair verified"
                    );
                    return Ok(records);
                }
                (None, Some(_)) => {
                    return Err(structure_error(
                        candidate,
                        Side::Candidate,
                        StructureError::TooFewResults,
                    ))
                }
                (Some(_), None) => {
                    return Err(structure_error(
                        candidate,
                        Side::Candidate,
                        StructureError::TooManyResults,
                    ))
                }
            };

            match compare_field(column, &candidate_value, &reference_value, tolerance) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(VerifyError::ValueMismatch {
                        location: candidate.location(),
                        column: column.name().to_string(),
                        expected: reference_value.into_owned(),
                        actual: candidate_value.into_owned(),
                    })
                }
                Err(Blamed { side, source }) => {
                    let location = match side {
                        Side::Candidate => candidate.location(),
                        Side::Reference => reference.location(),
                    };
                    return Err(VerifyError::Field {
                        side,
                        location,
                        column: column.name().to_string(),
                        source,
                    });
                }
            }
        }
        tracing::trace!(line = candidate.line_number(), "record matched");
        candidate.next_record();
        reference.next_record();
        records += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::options::VerifyOptions;
    use crate::schema::{ColumnDefinition, DataType};
    use assert_matches::assert_matches;

    fn schema() -> Schema {
        Schema::with_columns(vec![
            ColumnDefinition::new("id", DataType::Integer, false),
            ColumnDefinition::new("name", DataType::Varchar { length: 5 }, true),
            ColumnDefinition::new("price", DataType::Decimal { length: 8, precision: 2 }, true),
        ])
    }

    fn verify(candidate: &[u8], reference: &[u8]) -> Result<usize> {
        let options = VerifyOptions::default().with_skip_header(false);
        let mut candidate = FieldReader::with_options("candidate", candidate, &options);
        let mut reference = FieldReader::with_options("reference", reference, &options);
        verify_records(&schema(), &mut candidate, &mut reference, 0.0)
    }

    #[test]
    fn test_matching_files() {
        let data = b"1\tfoo\t1.50\n2\tnull\tnull\n";
        assert_matches!(verify(data, data), Ok(2));
        assert_matches!(verify(b"", b""), Ok(0));
    }

    #[test]
    fn test_too_few_fields() {
        assert_matches!(
            verify(b"1\tfoo\n", b"1\tfoo\t1.50\n"),
            Err(VerifyError::RecordStructure {
                side: Side::Candidate,
                location,
                kind: StructureError::TooFewFields,
            }) => {
                assert_eq!(location.file(), "candidate");
                assert_eq!(location.line(), 1);
            }
        );
        assert_matches!(
            verify(b"1\tfoo\t1.50\n2\tbar\t2\n", b"1\tfoo\t1.50\n2\tbar\n"),
            Err(VerifyError::RecordStructure {
                side: Side::Reference,
                location,
                kind: StructureError::TooFewFields,
            }) => {
                assert_eq!(location.file(), "reference");
                assert_eq!(location.line(), 2);
            }
        );
    }

    #[test]
    fn test_extra_field_spills_into_next_record() {
        assert_matches!(
            verify(b"1\tfoo\t1.50\t9\n", b"1\tfoo\t1.50\n"),
            Err(VerifyError::RecordStructure { kind: StructureError::TooManyResults, .. })
        );
    }

    #[test]
    fn test_file_length_mismatch() {
        assert_matches!(
            verify(b"1\tfoo\t1.50\n", b"1\tfoo\t1.50\n2\tbar\t2\n"),
            Err(VerifyError::RecordStructure {
                side: Side::Candidate,
                location,
                kind: StructureError::TooFewResults,
            }) => {
                assert_eq!(location.line(), 2);
            }
        );
        assert_matches!(
            verify(b"1\tfoo\t1.50\n2\tbar\t2\n", b"1\tfoo\t1.50\n"),
            Err(VerifyError::RecordStructure {
                side: Side::Candidate,
                location,
                kind: StructureError::TooManyResults,
            }) => {
                assert_eq!(location.line(), 2);
            }
        );
    }

    #[test]
    fn test_value_mismatch() {
        assert_matches!(
            verify(b"1\tfoo\t1.49\n", b"1\tfoo\t1.50\n"),
            Err(VerifyError::ValueMismatch { location, column, expected, actual }) => {
                assert_eq!(location.line(), 1);
                assert_eq!(column, "price");
                assert_eq!(expected, "1.50");
                assert_eq!(actual, "1.49");
            }
        );
    }

    #[test]
    fn test_field_error_blames_reference() {
        assert_matches!(
            verify(b"1\tfoo\t1.50\n2\tbar\t2\n", b"1\tfoo\t1.50\n2\ttoolong\t2\n"),
            Err(VerifyError::Field {
                side: Side::Reference,
                location,
                column,
                source: FieldError::ExceedsLength { .. },
            }) => {
                assert_eq!(location.file(), "reference");
                assert_eq!(location.line(), 2);
                assert_eq!(column, "name");
            }
        );
    }

    #[test]
    fn test_partial_final_record() {
        assert_matches!(verify(b"1\tfoo\t1.50\n2\tbar", b"1\tfoo\t1.50\n2\tbaz"), Ok(1));
    }

    #[test]
    fn test_unterminated_last_line() {
        let options = VerifyOptions::default().with_skip_header(false);
        let mut candidate = FieldReader::with_options("c", b"1\tfoo\t1.50\n2", &options);
        let mut reference = FieldReader::with_options("r", b"1\tfoo\t1.50\n3", &options);
        assert_matches!(verify_records(&schema(), &mut candidate, &mut reference, 0.0), Ok(1));
        assert_eq!(candidate.discarded(), 1);
        assert_eq!(reference.discarded(), 1);
    }

    #[test]
    fn test_tolerance() {
        let options = VerifyOptions::default().with_skip_header(false);
        let mut candidate = FieldReader::with_options("c", b"1\tfoo\t100.0\n", &options);
        let mut reference = FieldReader::with_options("r", b"1\tfoo\t99.0\n", &options);
        assert_matches!(
            verify_records(&schema(), &mut candidate, &mut reference, 2.0),
            Ok(1)
        );
    }
}
