//! Host classpath capability and the injection filter.

use std::env;
use std::path::PathBuf;

/// Where extra classpath entries come from. The session queries this
/// once at start and filters the answer before handing it to the
/// interpreter.
pub trait HostEnvironment {
    /// Candidate entries, unfiltered.
    fn extra_classpath_entries(&self) -> Vec<PathBuf>;
}

/// Reads entries from an environment variable, split with the platform
/// path separator. A missing variable means no entries.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    var: String,
}

impl ProcessEnvironment {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl HostEnvironment for ProcessEnvironment {
    fn extra_classpath_entries(&self) -> Vec<PathBuf> {
        match env::var_os(&self.var) {
            Some(joined) => env::split_paths(&joined).collect(),
            None => Vec::new(),
        }
    }
}

/// A fixed entry list, for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    entries: Vec<PathBuf>,
}

impl StaticEnvironment {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }
}

impl HostEnvironment for StaticEnvironment {
    fn extra_classpath_entries(&self) -> Vec<PathBuf> {
        self.entries.clone()
    }
}

/// Keep only entries that exist as local files and whose file name
/// neither starts with the self-artifact prefix nor contains the
/// conflict marker. An empty result is fine.
pub(crate) fn filter_entries(
    entries: Vec<PathBuf>,
    self_prefix: &str,
    conflict_marker: &str,
) -> Vec<PathBuf> {
    entries
        .into_iter()
        .filter(|entry| {
            if !entry.is_file() {
                return false;
            }
            let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            !name.starts_with(self_prefix) && !name.contains(conflict_marker)
        })
        .collect()
}
