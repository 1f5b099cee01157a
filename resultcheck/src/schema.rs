use std::fmt;

/// Ordered column definitions for one result file.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Schema {
    columns: Vec<ColumnDefinition>,
}

impl Schema {
    pub fn with_columns(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDefinition {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl ColumnDefinition {
    pub fn new<S: Into<String>>(name: S, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Column types. Length and precision live on the variants that allow them,
/// so an integer with a length cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Integer,
    BigInt,
    Varchar { length: u32 },
    Char { length: u32 },
    Decimal { length: u32, precision: u32 },
    Date,
}

impl DataType {
    pub fn keyword(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::BigInt => "bigint",
            DataType::Varchar { .. } => "varchar",
            DataType::Char { .. } => "char",
            DataType::Decimal { .. } => "decimal",
            DataType::Date => "date",
        }
    }

    pub fn length(&self) -> Option<u32> {
        match self {
            DataType::Varchar { length }
            | DataType::Char { length }
            | DataType::Decimal { length, .. } => Some(*length),
            DataType::Integer | DataType::BigInt | DataType::Date => None,
        }
    }

    pub fn precision(&self) -> Option<u32> {
        match self {
            DataType::Decimal { precision, .. } => Some(*precision),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Varchar { length } | DataType::Char { length } => {
                write!(f, "{}({length})", self.keyword())
            }
            DataType::Decimal { length, precision } => {
                write!(f, "{}({length},{precision})", self.keyword())
            }
            DataType::Integer | DataType::BigInt | DataType::Date => {
                write!(f, "{}", self.keyword())
            }
        }
    }
}
