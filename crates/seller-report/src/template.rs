//! Header-only CSV templates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::common::ensure_parent_dir;

/// `{name}-template.csv` with the name lowercased, or `template.csv`.
pub fn template_file_name(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{}-template.csv", name.to_lowercase()),
        None => "template.csv".to_string(),
    }
}

/// The header line followed by a newline.
pub fn template_csv<H: AsRef<str>>(headers: &[H]) -> String {
    let line: Vec<&str> = headers.iter().map(AsRef::as_ref).collect();
    format!("{}\n", line.join(","))
}

/// Writes a template into `dir` and returns its path.
pub fn write_template<H: AsRef<str>>(dir: &Path, headers: &[H], name: Option<&str>) -> Result<PathBuf> {
    let path = dir.join(template_file_name(name));
    ensure_parent_dir(&path)?;
    fs::write(&path, template_csv(headers))
        .with_context(|| format!("write template {}", path.display()))?;
    info!(path = %path.display(), columns = headers.len(), "template written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(template_file_name(Some("Sales")), "sales-template.csv");
        assert_eq!(template_file_name(Some("  ")), "template.csv");
        assert_eq!(template_file_name(None), "template.csv");
    }

    #[test]
    fn test_write_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), &["date", "revenue"], Some("Sales")).unwrap();
        assert!(path.ends_with("sales-template.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), "date,revenue\n");
    }
}
