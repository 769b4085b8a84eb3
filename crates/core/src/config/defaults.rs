//! Default values and functions for configuration

// Default constants
pub const DEFAULT_LIBRARY_IMPORT: &str = "github.com/prometheus/client_golang/prometheus";
pub(crate) const DEFAULT_EXTENSION: &str = "go";
pub(crate) const DEFAULT_SKIP_SUFFIX: &str = "_test.go";

pub(crate) fn default_library_imports() -> Vec<String> {
    vec![DEFAULT_LIBRARY_IMPORT.to_string()]
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

pub(crate) fn default_skip_suffixes() -> Vec<String> {
    vec![DEFAULT_SKIP_SUFFIX.to_string()]
}
