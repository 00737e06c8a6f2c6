use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one pretty-printed JSON document per theater into the output
/// directory, overwriting any file left by a previous run.
pub struct JsonFileSink {
    output_dir: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn write(&self, theater: &str, inventory: &Value) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{theater}.json"));
        let pretty = serde_json::to_string_pretty(inventory)?;
        fs::write(&path, pretty)?;
        Ok(path)
    }
}
