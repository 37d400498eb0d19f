use crate::Report::composer::Report;
use crate::Volumes::volume_calc::round2;
use crate::errors::HofCalcError;
use log::info;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._()+\-]").expect("valid file name regex"));

/// `<tokens joined by '_'>_<T>K_HofCalc.json`, e.g. `C34H28N3O5Cl1_293K_HofCalc.json`
pub fn summary_file_name(user_input: &[String], temperature: f64) -> String {
    let joined = user_input
        .iter()
        .map(|t| t.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(' ', "_");
    let stem = UNSAFE_FILE_CHARS.replace_all(&joined, "_");
    format!("{}_{}K_HofCalc.json", stem, round2(temperature))
}

impl Report {
    pub fn file_name(&self) -> String {
        summary_file_name(&self.user_input, self.temperature)
    }

    /// Writes the pretty-printed summary into `dir` (created if missing) and
    /// returns the path of the file.
    pub fn write_summary(&self, dir: &Path) -> Result<PathBuf, HofCalcError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json()?)?;
        info!("summary written to {}", path.display());
        Ok(path)
    }
}
