use crate::error::Location;
use crate::options::VerifyOptions;
use crate::types::Token;

/// Forward-only reader over the fields of a delimited result file.
///
/// Each record must be drained with exactly one [`next_field`](Self::next_field)
/// per column followed by one [`next_record`](Self::next_record). Asking for
/// another field once the record delimiter has been seen yields
/// [`Token::EndOfRecord`] until `next_record` is called.
#[cfg_attr(test, derive(Debug))]
pub struct FieldReader<'a> {
    filename: &'a str,
    data: &'a [u8],
    position: usize,
    field_delimiter: u8,
    record_delimiter: u8,
    skip_header: bool,
    in_header: bool,
    end_of_record: bool,
    records: usize,
    discarded: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(filename: &'a str, data: &'a [u8]) -> Self {
        Self::with_options(filename, data, &VerifyOptions::default())
    }

    pub fn with_options(filename: &'a str, data: &'a [u8], options: &VerifyOptions) -> Self {
        Self {
            filename,
            data,
            position: 0,
            field_delimiter: options.field_delimiter(),
            record_delimiter: options.record_delimiter(),
            skip_header: options.skip_header(),
            in_header: options.skip_header(),
            end_of_record: false,
            records: 0,
            discarded: 0,
        }
    }

    pub fn filename(&self) -> &str {
        self.filename
    }

    /// 1-based line of the record currently being read.
    pub fn line_number(&self) -> usize {
        self.records + 1 + usize::from(self.skip_header)
    }

    pub fn location(&self) -> Location {
        Location::new(self.filename, self.line_number())
    }

    /// Bytes of an unterminated last line that were dropped at end of file.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn next_field(&mut self) -> Token<'a> {
        if self.end_of_record {
            return Token::EndOfRecord;
        }

        if self.in_header {
            let header = &self.data[self.position..];
            match header.iter().position(|&b| b == self.record_delimiter) {
                Some(end) => {
                    self.position += end + 1;
                    self.in_header = false;
                }
                None => {
                    self.position = self.data.len();
                    return Token::EndOfFile;
                }
            }
        }

        let rest = &self.data[self.position..];
        match rest
            .iter()
            .position(|&b| b == self.field_delimiter || b == self.record_delimiter)
        {
            Some(end) => {
                if rest[end] != self.field_delimiter {
                    self.end_of_record = true;
                }
                self.position += end + 1;
                Token::Field(String::from_utf8_lossy(&rest[..end]))
            }
            // An unterminated trailing field is not a field.
            None => {
                if !rest.is_empty() {
                    self.discarded = rest.len();
                    tracing::warn!(
                        file = self.filename,
                        line = self.line_number(),
                        bytes = rest.len(),
                        "unterminated last line was not compared"
                    );
                }
                self.position = self.data.len();
                Token::EndOfFile
            }
        }
    }

    pub fn next_record(&mut self) {
        self.end_of_record = false;
        self.records += 1;
    }
}
