//! Session configuration.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// Root directory for session working directories. Default: the
/// platform temp dir.
pub const OUTPUT_ROOT: &str = "session.output-root";

/// File-name prefix identifying this project's own artifacts, which are
/// never injected into the interpreter classpath. Default: `tether-`.
pub const SELF_PREFIX: &str = "session.classpath.self-prefix";

/// Substring marking known-conflicting artifacts, also excluded from
/// injection. Default: `jot-shim`.
pub const CONFLICT_MARKER: &str = "session.classpath.conflict-marker";

/// Environment variable the process host environment reads extra
/// classpath entries from. Default: `TETHER_EXTRA_CLASSPATH`.
pub const CLASSPATH_ENV_VAR: &str = "session.classpath.env-var";

/// String name/value configuration with typed accessors for the keys the
/// session understands. Unknown keys are kept and ignored.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    values: BTreeMap<String, String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_output_root(self, path: impl Into<String>) -> Self {
        self.with(OUTPUT_ROOT, path)
    }

    pub fn with_self_prefix(self, prefix: impl Into<String>) -> Self {
        self.with(SELF_PREFIX, prefix)
    }

    pub fn with_conflict_marker(self, marker: impl Into<String>) -> Self {
        self.with(CONFLICT_MARKER, marker)
    }

    pub fn with_classpath_env_var(self, var: impl Into<String>) -> Self {
        self.with(CLASSPATH_ENV_VAR, var)
    }

    pub fn output_root(&self) -> PathBuf {
        match self.get(OUTPUT_ROOT) {
            Some(root) => PathBuf::from(root),
            None => env::temp_dir(),
        }
    }

    pub fn self_prefix(&self) -> &str {
        self.get(SELF_PREFIX).unwrap_or("tether-")
    }

    pub fn conflict_marker(&self) -> &str {
        self.get(CONFLICT_MARKER).unwrap_or("jot-shim")
    }

    pub fn classpath_env_var(&self) -> &str {
        self.get(CLASSPATH_ENV_VAR).unwrap_or("TETHER_EXTRA_CLASSPATH")
    }
}
