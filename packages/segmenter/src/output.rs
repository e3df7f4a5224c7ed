//! Report serialization to JSON or YAML.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, SegmenterError};

/// Serialization format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = SegmenterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(SegmenterError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Render `value` in `format`.
///
/// JSON is pretty-printed. YAML starts with a document marker and carries
/// no trailing whitespace. Both end with a newline.
///
/// # Examples
/// ```
/// use patent_segmenter::output::{render, OutputFormat};
///
/// let yaml = render(&vec!["請求項"], OutputFormat::Yaml).unwrap();
/// assert_eq!(yaml, "---\n- 請求項\n");
/// ```
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            let lines: Vec<&str> = yaml
                .trim_start_matches("---\n")
                .lines()
                .map(str::trim_end)
                .collect();
            Ok(format!("---\n{}\n", lines.join("\n")))
        }
    }
}

/// Write `value` to `path`.
///
/// Writes to a temp file next to the target, syncs, then renames, so an
/// interrupted run never leaves a truncated report.
pub fn save_report<T: Serialize + ?Sized>(value: &T, format: OutputFormat, path: &Path) -> Result<()> {
    let content = render(value, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), format = %format, "Saved report");
    Ok(())
}

/// Write `value` to `path`, or to stdout when no path is given.
pub fn write_report<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<()> {
    match path {
        Some(path) => save_report(value, format, path),
        None => {
            let content = render(value, format)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
