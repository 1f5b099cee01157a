use crate::args::Args;
use crate::mapped::MappedFile;
use anyhow::{bail, Context, Result};
use resultcheck::compare::record::verify_records;
use resultcheck::options::VerifyOptions;
use resultcheck::read::fields::FieldReader;
use resultcheck::read::inspect::format_schema;
use resultcheck::read::schema::parse_schema;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Summary {
    verified: usize,
    failed: Vec<String>,
}

impl Summary {
    pub fn verified(&self) -> usize {
        self.verified
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Verifier {
    candidate_dir: PathBuf,
    reference_dir: PathBuf,
    schema_dir: PathBuf,
    include_hidden: bool,
    describe_schemas: bool,
    options: VerifyOptions,
}

fn require_path(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{}: no such file or directory", path.display());
    }
    Ok(())
}

impl Verifier {
    pub fn new(args: &Args) -> Result<Self> {
        require_path(&args.candidate_dir)?;
        require_path(&args.reference_dir)?;
        require_path(&args.schema_dir)?;
        Ok(Self {
            candidate_dir: args.candidate_dir.clone(),
            reference_dir: args.reference_dir.clone(),
            schema_dir: args.schema_dir.clone(),
            include_hidden: args.include_hidden,
            describe_schemas: args.describe_schemas,
            options: args.options()?,
        })
    }

    /// Names of the regular files in the candidate directory, sorted.
    pub fn files(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.candidate_dir).with_context(|| {
            format!("{}: could not open directory", self.candidate_dir.display())
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.include_hidden && name.starts_with('.') {
                continue;
            }
            files.push(name);
        }
        files.sort();
        Ok(files)
    }

    pub fn verify(&self) -> Result<Summary> {
        let files = self.files()?;
        if files.is_empty() {
            eprintln!("no input files");
        }
        let mut summary = Summary::default();
        for file in files {
            println!("{file}");
            match self.verify_file(&file) {
                Ok(records) => {
                    tracing::info!(file = file.as_str(), records, "verified");
                    summary.verified += 1;
                }
                Err(e) => {
                    tracing::debug!(file = file.as_str(), error = %e, "verification failed");
                    eprintln!("{e:#}");
                    eprintln!("skipping file after first error");
                    summary.failed.push(file);
                }
            }
        }
        Ok(summary)
    }

    pub fn verify_file(&self, file: &str) -> Result<usize> {
        let schema_file = MappedFile::open(&self.schema_dir.join(file))?;
        let schema = parse_schema(schema_file.bytes())
            .with_context(|| schema_file.name().to_string())?;
        if self.describe_schemas {
            println!("{}", format_schema(file, &schema));
        }

        let candidate_file = MappedFile::open(&self.candidate_dir.join(file))?;
        let reference_file = MappedFile::open(&self.reference_dir.join(file))?;
        let mut candidate =
            FieldReader::with_options(candidate_file.name(), candidate_file.bytes(), &self.options);
        let mut reference =
            FieldReader::with_options(reference_file.name(), reference_file.bytes(), &self.options);

        let records = verify_records(
            &schema,
            &mut candidate,
            &mut reference,
            self.options.tolerance(),
        )?;
        Ok(records)
    }
}
