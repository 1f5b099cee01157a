pub(crate) const NULL_TOKEN: &str = "null";

pub(crate) const DEFAULT_FIELD_DELIMITER: u8 = b'\t';
pub(crate) const DEFAULT_RECORD_DELIMITER: u8 = b'\n';

// Placeholders until an explicit `(length[,precision])` is parsed.
pub(crate) const DEFAULT_STRING_LENGTH: u32 = 1;
pub(crate) const DEFAULT_DECIMAL_LENGTH: u32 = 4;
pub(crate) const DEFAULT_DECIMAL_PRECISION: u32 = 2;

// Largest precision whose scaled fraction still fits in a u128.
pub(crate) const MAX_DECIMAL_PRECISION: u32 = 38;
