//! Type-aware verification of tabular result files.
//!
//! A [`Schema`](schema::Schema) parsed from a small column grammar tells the
//! comparison how to read each field of a candidate and a reference file
//! (integers, fixed-precision decimals, bounded strings, dates), so that e.g.
//! `10.5` and `10.50` compare equal in a `decimal(12,2)` column.
//!
//! ```
//! use resultcheck::compare::record::verify_records;
//! use resultcheck::options::VerifyOptions;
//! use resultcheck::read::fields::FieldReader;
//! use resultcheck::read::schema::parse_schema;
//!
//! let schema = parse_schema(b"id integer not null\nprice decimal(12,2)\n").unwrap();
//! let options = VerifyOptions::default().with_skip_header(false);
//! let mut candidate = FieldReader::with_options("out.tbl", b"1\t10.5\n", &options);
//! let mut reference = FieldReader::with_options("ref.tbl", b"1\t10.50\n", &options);
//! let records =
//!     verify_records(&schema, &mut candidate, &mut reference, options.tolerance()).unwrap();
//! assert_eq!(records, 1);
//! ```

pub mod compare;
mod consts;
pub mod error;
pub mod options;
pub mod read;
pub mod schema;
pub mod types;
