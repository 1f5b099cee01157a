use clap::{ArgAction, Parser};
use resultcheck::options::VerifyOptions;
use std::path::PathBuf;

/// Verify computed result files against reference results.
///
/// Every regular file in CANDIDATE_DIR is compared with the same-named file
/// in REFERENCE_DIR, using the same-named column definition in SCHEMA_DIR.
#[derive(Parser, Clone, Debug)]
#[command(name = "resultverify", version)]
pub struct Args {
    /// Directory with the computed result files
    pub candidate_dir: PathBuf,

    /// Directory with the expected result files
    pub reference_dir: PathBuf,

    /// Directory with one schema definition per result file
    pub schema_dir: PathBuf,

    /// Skip the first line (header) of every result file
    #[arg(default_value_t = true, action = ArgAction::Set)]
    pub skip_header: bool,

    /// Relative difference allowed between decimal values, in percent
    #[arg(default_value_t = 0.0)]
    pub tolerance: f64,

    /// Also verify files whose name starts with a dot
    #[arg(long)]
    pub include_hidden: bool,

    /// Field delimiter (a single ASCII character, `\t` for tab)
    #[arg(long, value_parser = parse_delimiter)]
    pub field_delimiter: Option<u8>,

    /// Record delimiter (a single ASCII character, `\n` for newline)
    #[arg(long, value_parser = parse_delimiter)]
    pub record_delimiter: Option<u8>,

    /// Print every schema as a table before verifying its file
    #[arg(long)]
    pub describe_schemas: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" => Ok(b'\t'),
        "\\n" => Ok(b'\n'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("expected a single ASCII character, got {s:?}")),
        },
    }
}

impl Args {
    pub fn options(&self) -> resultcheck::error::Result<VerifyOptions> {
        let mut options = VerifyOptions::default()
            .with_skip_header(self.skip_header)
            .with_tolerance(self.tolerance)?;
        if let Some(delimiter) = self.field_delimiter {
            options = options.with_field_delimiter(delimiter);
        }
        if let Some(delimiter) = self.record_delimiter {
            options = options.with_record_delimiter(delimiter);
        }
        Ok(options)
    }
}
