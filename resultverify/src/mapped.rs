use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Read-only view of a file's bytes.
pub struct MappedFile {
    name: String,
    map: Option<Mmap>,
}

impl MappedFile {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("{}: could not open file", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("{}: could not stat file", path.display()))?
            .len();
        // Mapping an empty file fails on some platforms.
        let map = if len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and result files are not
            // modified while a verification run is in progress.
            let map = unsafe { Mmap::map(&file) }
                .with_context(|| format!("{}: could not map file", path.display()))?;
            Some(map)
        };
        Ok(Self {
            name: path.display().to_string(),
            map,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}
