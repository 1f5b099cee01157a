use crate::consts::{DEFAULT_FIELD_DELIMITER, DEFAULT_RECORD_DELIMITER};
use crate::error::{Result, VerifyError};

/// Settings shared by every file pair of one verification run.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyOptions {
    field_delimiter: u8,
    record_delimiter: u8,
    skip_header: bool,
    tolerance: f64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            field_delimiter: DEFAULT_FIELD_DELIMITER,
            record_delimiter: DEFAULT_RECORD_DELIMITER,
            skip_header: true,
            tolerance: 0.0,
        }
    }
}

impl VerifyOptions {
    pub fn with_field_delimiter(mut self, delimiter: u8) -> Self {
        self.field_delimiter = delimiter;
        self
    }

    pub fn with_record_delimiter(mut self, delimiter: u8) -> Self {
        self.record_delimiter = delimiter;
        self
    }

    pub fn with_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    /// Relative difference allowed between decimals, in percent. Zero
    /// requires an exact match.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(VerifyError::InvalidTolerance { value: tolerance });
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn field_delimiter(&self) -> u8 {
        self.field_delimiter
    }

    pub fn record_delimiter(&self) -> u8 {
        self.record_delimiter
    }

    pub fn skip_header(&self) -> bool {
        self.skip_header
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
