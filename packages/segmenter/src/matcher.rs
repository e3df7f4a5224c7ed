//! Pairing of source and target patent files by file name.
//!
//! File names carry the patent identifier and a language tag:
//!
//! ```text
//! P14770(JP).doc               source, id P14770
//! P10555(SCW+KVN+GT)Final.docx target, id P10555
//! 20231234_zh.pdf              target, id 20231234
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::{validate_directory, ProcessOptions};
use crate::error::{Result, SkipReason};
use crate::types::Language;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIXED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"P[0-9]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4,}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(JP\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TARGET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(SCW[^)]*\)|\(ZH\)|_zh\.").expect("valid regex"));

/// Extract the patent identifier from a file name.
///
/// `P` followed by digits wins; otherwise the first run of four or more
/// digits is used.
///
/// # Examples
/// ```
/// use patent_segmenter::matcher::extract_patent_id;
///
/// assert_eq!(extract_patent_id("P14770(JP).doc").as_deref(), Some("P14770"));
/// assert_eq!(extract_patent_id("2023001234_zh.pdf").as_deref(), Some("2023001234"));
/// assert_eq!(extract_patent_id("draft(JP).docx"), None);
/// ```
#[must_use]
pub fn extract_patent_id(name: &str) -> Option<String> {
    PREFIXED_ID
        .find(name)
        .or_else(|| NUMERIC_ID.find(name))
        .map(|m| m.as_str().to_string())
}

/// Infer the document language from the tag in a file name.
///
/// Names with no tag, or with both a source and a target tag, are
/// ambiguous and yield `None`.
#[must_use]
pub fn classify(name: &str) -> Option<Language> {
    match (SOURCE_TAG.is_match(name), TARGET_TAG.is_match(name)) {
        (true, false) => Some(Language::Japanese),
        (false, true) => Some(Language::Chinese),
        _ => None,
    }
}

/// One candidate document file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Full path.
    pub path: PathBuf,

    /// File name.
    pub name: String,

    /// Lowercase extension without the dot.
    pub extension: String,

    /// Patent identifier inferred from the name.
    pub patent_id: Option<String>,

    /// Language inferred from the name.
    pub language: Option<Language>,
}

impl FileDescriptor {
    /// Describe a file from its path.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self {
            patent_id: extract_patent_id(&name),
            language: classify(&name),
            path,
            name,
            extension,
        }
    }
}

/// A matched source/target file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePair {
    /// Identifier shared by both files.
    pub patent_id: String,

    /// Japanese file.
    pub source: FileDescriptor,

    /// Chinese file.
    pub target: FileDescriptor,
}

/// A source file without a counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unmatched {
    /// The source file.
    pub file: FileDescriptor,

    /// Why no pair was produced.
    pub reason: SkipReason,
}

/// Outcome of matching two file listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Matched pairs in source listing order.
    pub pairs: Vec<FilePair>,

    /// Source files that could not be paired.
    pub unmatched: Vec<Unmatched>,

    /// Ambiguities resolved by the tie-break rule.
    pub warnings: Vec<String>,
}

/// Matcher holding the eligible document extensions.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    options: ProcessOptions,
}

impl Default for FileMatcher {
    fn default() -> Self {
        Self::from_options(&ProcessOptions::default())
    }
}

impl FileMatcher {
    /// Create a matcher for the default extensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher for the extensions configured in `options`.
    #[must_use]
    pub fn from_options(options: &ProcessOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }

    fn is_document(&self, file: &FileDescriptor) -> bool {
        self.options.accepts_extension(&file.extension)
    }

    /// Match source files against target files.
    ///
    /// Candidates for a source file are the target files with the same
    /// identifier. With several candidates, the lexicographically first name
    /// containing "final" wins; without one, the lexicographically first name
    /// is used and a warning is recorded.
    pub fn match_files<S, T>(&self, sources: &[S], targets: &[T]) -> MatchReport
    where
        S: AsRef<Path>,
        T: AsRef<Path>,
    {
        let mut by_id: BTreeMap<String, Vec<FileDescriptor>> = BTreeMap::new();
        for target in targets {
            let file = FileDescriptor::from_path(target.as_ref());
            if !self.is_document(&file) || file.language != Some(Language::Chinese) {
                continue;
            }
            if let Some(id) = file.patent_id.clone() {
                by_id.entry(id).or_default().push(file);
            }
        }
        for candidates in by_id.values_mut() {
            candidates.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let mut report = MatchReport::default();

        for source in sources {
            let file = FileDescriptor::from_path(source.as_ref());
            if !self.is_document(&file) || file.language != Some(Language::Japanese) {
                tracing::debug!(file = %file.name, "Not a source document, ignoring");
                continue;
            }

            let Some(patent_id) = file.patent_id.clone() else {
                tracing::warn!(file = %file.name, "Cannot extract patent id");
                report.unmatched.push(Unmatched {
                    file,
                    reason: SkipReason::NoIdentifier,
                });
                continue;
            };

            let candidates = by_id.get(&patent_id).map(Vec::as_slice).unwrap_or_default();
            let Some(target) = select_candidate(candidates, &file, &mut report.warnings) else {
                tracing::warn!(file = %file.name, patent_id = %patent_id, "No target file found");
                report.unmatched.push(Unmatched {
                    file,
                    reason: SkipReason::NoMatch { patent_id },
                });
                continue;
            };

            tracing::debug!(source = %file.name, target = %target.name, "Matched");
            report.pairs.push(FilePair {
                patent_id,
                source: file,
                target: target.clone(),
            });
        }

        tracing::info!(
            pairs = report.pairs.len(),
            unmatched = report.unmatched.len(),
            "Matched file pairs"
        );
        report
    }

    /// List the top level of both directories and match them.
    ///
    /// Entries are sorted by file name, so results are deterministic.
    pub fn match_directories(&self, source_dir: &Path, target_dir: &Path) -> Result<MatchReport> {
        let sources = list_files(source_dir)?;
        let targets = list_files(target_dir)?;
        Ok(self.match_files(&sources, &targets))
    }
}

/// Pick the target among candidates sorted by name.
fn select_candidate<'a>(
    candidates: &'a [FileDescriptor],
    source: &FileDescriptor,
    warnings: &mut Vec<String>,
) -> Option<&'a FileDescriptor> {
    match candidates {
        [] => None,
        [only] => Some(only),
        [first, ..] => {
            if let Some(final_version) = candidates
                .iter()
                .find(|c| c.name.to_lowercase().contains("final"))
            {
                return Some(final_version);
            }

            let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
            let warning = format!(
                "Multiple targets for {}: {}; using {}",
                source.name,
                names.join(", "),
                first.name
            );
            tracing::warn!(source = %source.name, target = %first.name, "Multiple target files, using first");
            warnings.push(warning);
            Some(first)
        }
    }
}

/// List regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_directory(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Match two file listings with the default extensions.
///
/// # Examples
/// ```
/// use patent_segmenter::match_files;
///
/// let report = match_files(
///     &["jp/P100(JP).docx"],
///     &["zh/P100(SCW).docx", "zh/P100(SCW+KVN)Final.docx"],
/// );
/// assert_eq!(report.pairs[0].target.name, "P100(SCW+KVN)Final.docx");
/// ```
pub fn match_files<S, T>(sources: &[S], targets: &[T]) -> MatchReport
where
    S: AsRef<Path>,
    T: AsRef<Path>,
{
    FileMatcher::new().match_files(sources, targets)
}

/// Match the files of two directories with the default extensions.
pub fn match_directories(source_dir: &Path, target_dir: &Path) -> Result<MatchReport> {
    FileMatcher::new().match_directories(source_dir, target_dir)
}
