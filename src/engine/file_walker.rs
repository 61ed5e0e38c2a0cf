//! File discovery and traversal with gitignore support
//!
//! Walks a root path with the `ignore` crate, filters entries through the
//! configured include/exclude globs and keeps only files whose language is
//! one of the selected ones.

use crate::types::{GlobPattern, Language};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use ignore::types::{Types, TypesBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Detects source languages from file names using ripgrep's type definitions
#[derive(Clone)]
pub struct LanguageDetector {
    matchers: Arc<Vec<(Language, Types)>>,
}

impl LanguageDetector {
    /// Creates a detector for `languages`
    ///
    /// A language whose matcher cannot be built is logged and skipped.
    pub fn new(languages: &[Language]) -> Self {
        let mut matchers = Vec::new();

        for &language in languages {
            let mut builder = TypesBuilder::new();
            builder.add_defaults();
            builder.select(language.as_str());

            match builder.build() {
                Ok(types) => matchers.push((language, types)),
                Err(e) => {
                    tracing::warn!(%language, error = %e, "failed to build language detector");
                }
            }
        }

        Self {
            matchers: Arc::new(matchers),
        }
    }

    /// Returns the first selected language matching `path`
    pub fn detect(&self, path: &Path) -> Option<Language> {
        self.matchers
            .iter()
            .find(|(_, types)| types.matched(path, false).is_whitelist())
            .map(|(language, _)| *language)
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(&Language::enabled())
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field(
                "languages",
                &self.matchers.iter().map(|(l, _)| *l).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A discovered source file with its language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub language: Language,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            path: path.into(),
            language,
        }
    }
}

/// Iterator source over discovered files
pub struct FileWalker {
    root: PathBuf,
    walker: ignore::Walk,
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
    language_detector: LanguageDetector,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Directory (or single file) to walk
    /// * `include` - Include patterns (empty means include all)
    /// * `exclude` - Exclude patterns (applied after include)
    /// * `languages` - Languages to keep; other files are skipped
    pub fn new(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
        languages: &[Language],
    ) -> Result<Self, FileWalkerError> {
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .build();

        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        Ok(Self {
            root: root.to_path_buf(),
            walker,
            include_set,
            exclude_set,
            language_detector: LanguageDetector::new(languages),
        })
    }

    fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the tree and yields every selected source file
    ///
    /// Globs are matched against the path relative to the walk root as well
    /// as the full path, so `src/**` works however the root was spelled.
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        let Self {
            root,
            walker,
            include_set,
            exclude_set,
            language_detector,
        } = self;

        walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FileWalkerError::Walk(e))),
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return None;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&root).unwrap_or(path);
            let matches = |set: &GlobSet| set.is_match(path) || set.is_match(relative);

            if include_set.as_ref().is_some_and(|set| !matches(set)) || matches(&exclude_set) {
                tracing::trace!(path = %path.display(), "skipped by pattern");
                return None;
            }

            match language_detector.detect(path) {
                Some(language) => Some(Ok(FileEntry::new(path, language))),
                None => {
                    tracing::trace!(path = %path.display(), "skipped, no selected language");
                    None
                }
            }
        })
    }
}
