use crate::consts::{
    DEFAULT_DECIMAL_LENGTH, DEFAULT_DECIMAL_PRECISION, DEFAULT_STRING_LENGTH, MAX_DECIMAL_PRECISION,
};
use crate::error::{Result, VerifyError};
use crate::schema::*;
use nom::{
    character::complete::{char, digit1},
    combinator::all_consuming,
    sequence::terminated,
    IResult,
};
use std::mem;

// Every state owns what has been resolved so far for the current column.
#[derive(Debug)]
enum ParserState {
    Name,
    Type {
        name: String,
    },
    TypeLength {
        name: String,
        data_type: DataType,
    },
    TypePrecision {
        name: String,
        data_type: DataType,
    },
    NullInfo {
        name: String,
        data_type: DataType,
    },
    EndOfColumn(ColumnDefinition),
}

// Whether the byte that caused a transition is consumed or handed to the
// next state.
enum Step {
    Consume,
    Reprocess,
}

struct SchemaParser {
    state: ParserState,
    token: Vec<u8>,
    line: usize,
    columns: Vec<ColumnDefinition>,
}

impl SchemaParser {
    fn new() -> Self {
        Self {
            state: ParserState::Name,
            token: Vec::new(),
            line: 1,
            columns: Vec::new(),
        }
    }

    fn error<S: Into<String>>(&self, message: S) -> VerifyError {
        VerifyError::SchemaDefinition {
            line: self.line,
            message: message.into(),
        }
    }

    fn take_token(&mut self) -> Vec<u8> {
        mem::take(&mut self.token)
    }

    fn feed(&mut self, byte: u8) -> Result<()> {
        loop {
            match self.step(byte)? {
                Step::Consume => break,
                Step::Reprocess => continue,
            }
        }
        if byte == b'\n' {
            self.line += 1;
        }
        Ok(())
    }

    fn step(&mut self, byte: u8) -> Result<Step> {
        let state = mem::replace(&mut self.state, ParserState::Name);
        let (next, step) = match state {
            ParserState::Name => match byte {
                b' ' => {
                    let name = String::from_utf8_lossy(&self.take_token()).into_owned();
                    if name.is_empty() {
                        return Err(self.error("missing column name"));
                    }
                    (ParserState::Type { name }, Step::Consume)
                }
                // blank line
                b'\n' if self.token.is_empty() => (ParserState::Name, Step::Consume),
                b'\n' => {
                    let name = String::from_utf8_lossy(&self.token).into_owned();
                    return Err(self.error(format!("column {name} is missing a type")));
                }
                _ => {
                    self.token.push(byte);
                    (ParserState::Name, Step::Consume)
                }
            },
            ParserState::Type { name } => match byte {
                b' ' | b'(' | b'\n' => {
                    let token = self.take_token();
                    let data_type = self.resolve_type(&token)?;
                    match byte {
                        b'(' => (ParserState::TypeLength { name, data_type }, Step::Consume),
                        b' ' => (ParserState::NullInfo { name, data_type }, Step::Consume),
                        _ => (ParserState::NullInfo { name, data_type }, Step::Reprocess),
                    }
                }
                _ => {
                    self.token.push(byte);
                    (ParserState::Type { name }, Step::Consume)
                }
            },
            ParserState::TypeLength { name, data_type } => match byte {
                b' ' | b',' | b'\n' => {
                    let data_type = self.apply_length(data_type, byte != b',')?;
                    match byte {
                        b',' => (ParserState::TypePrecision { name, data_type }, Step::Consume),
                        b' ' => (ParserState::NullInfo { name, data_type }, Step::Consume),
                        _ => (ParserState::NullInfo { name, data_type }, Step::Reprocess),
                    }
                }
                _ => {
                    self.token.push(byte);
                    (ParserState::TypeLength { name, data_type }, Step::Consume)
                }
            },
            ParserState::TypePrecision { name, data_type } => match byte {
                b' ' | b'\n' => {
                    let data_type = self.apply_precision(data_type)?;
                    let step = if byte == b'\n' {
                        Step::Reprocess
                    } else {
                        Step::Consume
                    };
                    (ParserState::NullInfo { name, data_type }, step)
                }
                _ => {
                    self.token.push(byte);
                    (ParserState::TypePrecision { name, data_type }, Step::Consume)
                }
            },
            ParserState::NullInfo { name, data_type } => match byte {
                b'\n' => {
                    let nullable = self.resolve_null_info()?;
                    let column = ColumnDefinition::new(name, data_type, nullable);
                    (ParserState::EndOfColumn(column), Step::Reprocess)
                }
                _ => {
                    self.token.push(byte);
                    (ParserState::NullInfo { name, data_type }, Step::Consume)
                }
            },
            ParserState::EndOfColumn(column) => match byte {
                b'\n' => {
                    self.columns.push(column);
                    (ParserState::Name, Step::Consume)
                }
                _ => return Err(self.error("missing newline at end of attribute")),
            },
        };
        self.state = next;
        Ok(step)
    }

    // Input may end without a trailing newline; the last column is resolved
    // with the same rules as a terminated one.
    fn finish(mut self) -> Result<Vec<ColumnDefinition>> {
        let state = mem::replace(&mut self.state, ParserState::Name);
        let column = match state {
            ParserState::Name if self.token.is_empty() => None,
            ParserState::Name => {
                let name = String::from_utf8_lossy(&self.token).into_owned();
                return Err(self.error(format!("column {name} is missing a type")));
            }
            ParserState::Type { name } => {
                let token = self.take_token();
                let data_type = self.resolve_type(&token)?;
                Some(ColumnDefinition::new(name, data_type, true))
            }
            ParserState::TypeLength { name, data_type } => {
                let data_type = self.apply_length(data_type, true)?;
                Some(ColumnDefinition::new(name, data_type, true))
            }
            ParserState::TypePrecision { name, data_type } => {
                let data_type = self.apply_precision(data_type)?;
                Some(ColumnDefinition::new(name, data_type, true))
            }
            ParserState::NullInfo { name, data_type } => {
                let nullable = self.resolve_null_info()?;
                Some(ColumnDefinition::new(name, data_type, nullable))
            }
            ParserState::EndOfColumn(column) => Some(column),
        };
        self.columns.extend(column);
        if self.columns.is_empty() {
            return Err(self.error("schema defines no columns"));
        }
        Ok(self.columns)
    }

    fn resolve_type(&self, token: &[u8]) -> Result<DataType> {
        match token {
            b"integer" => Ok(DataType::Integer),
            b"bigint" => Ok(DataType::BigInt),
            b"varchar" => Ok(DataType::Varchar {
                length: DEFAULT_STRING_LENGTH,
            }),
            b"char" => Ok(DataType::Char {
                length: DEFAULT_STRING_LENGTH,
            }),
            b"decimal" => Ok(DataType::Decimal {
                length: DEFAULT_DECIMAL_LENGTH,
                precision: DEFAULT_DECIMAL_PRECISION,
            }),
            b"date" => Ok(DataType::Date),
            _ => Err(self.error(format!(
                "unknown type {}",
                String::from_utf8_lossy(token)
            ))),
        }
    }

    fn apply_length(&mut self, data_type: DataType, closes_group: bool) -> Result<DataType> {
        if data_type.length().is_none() {
            return Err(self.error(format!(
                "type {} cannot have a length",
                data_type.keyword()
            )));
        }
        let token = self.take_token();
        let length = match parse_number(&token, closes_group) {
            Some(length) if length > 0 => length,
            _ => {
                return Err(self.error(format!(
                    "invalid length {}",
                    String::from_utf8_lossy(&token)
                )))
            }
        };
        Ok(match data_type {
            DataType::Varchar { .. } => DataType::Varchar { length },
            DataType::Char { .. } => DataType::Char { length },
            DataType::Decimal { precision, .. } => DataType::Decimal { length, precision },
            other => other,
        })
    }

    fn apply_precision(&mut self, data_type: DataType) -> Result<DataType> {
        let length = match data_type {
            DataType::Decimal { length, .. } => length,
            other => {
                return Err(self.error(format!(
                    "type {} cannot have a precision",
                    other.keyword()
                )))
            }
        };
        let token = self.take_token();
        match parse_number(&token, true) {
            Some(precision) if precision <= MAX_DECIMAL_PRECISION => {
                Ok(DataType::Decimal { length, precision })
            }
            Some(precision) => Err(self.error(format!(
                "precision {precision} exceeds the maximum of {MAX_DECIMAL_PRECISION}"
            ))),
            None => Err(self.error(format!(
                "invalid precision {}",
                String::from_utf8_lossy(&token)
            ))),
        }
    }

    fn resolve_null_info(&mut self) -> Result<bool> {
        let token = self.take_token();
        match token.as_slice() {
            b"not null" => Ok(false),
            b"null" | b"" => Ok(true),
            _ => Err(self.error(format!(
                "invalid null info {}",
                String::from_utf8_lossy(&token)
            ))),
        }
    }
}

// The token that closes `(length[,precision])` carries the `)`.
fn parse_number(token: &[u8], closes_group: bool) -> Option<u32> {
    let result: IResult<&[u8], &[u8]> = if closes_group {
        all_consuming(terminated(digit1, char(')')))(token)
    } else {
        all_consuming(digit1)(token)
    };
    let (_, digits) = result.ok()?;
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Parses a schema definition: one `name type[(length[,precision])] [null|not null]`
/// column per line. Either the whole definition parses or nothing is returned.
pub fn parse_schema(input: &[u8]) -> Result<Schema> {
    let mut parser = SchemaParser::new();
    for &byte in input {
        parser.feed(byte)?;
    }
    let columns = parser.finish()?;
    tracing::debug!(columns = columns.len(), "parsed schema");
    Ok(Schema::with_columns(columns))
}
