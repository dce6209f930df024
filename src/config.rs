/// Default confidence threshold, in percent.
pub const DEFAULT_CONFIDENCE: f64 = 50.0;
/// Default bound on the edit distance used for "did you mean" suggestions.
pub const DEFAULT_SUGGESTION_DISTANCE: usize = 2;
/// Default number of results returned by `Search`.
pub const DEFAULT_SEARCH_RESULTS: usize = 5;
/// Default bound on nested `Run`, inline function and `Import` evaluation.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;
/// Default file extension used by `Import`.
pub const DEFAULT_IMPORT_EXTENSION: &str = "vic";

/// Engine configuration.
///
/// A `Config` is fixed for the lifetime of an interpreter. `Reset[]` restores
/// the session from it, so a host that raises the default confidence keeps
/// that default across resets.
///
/// # Example
/// ```
/// use visionscript::config::Config;
///
/// let config = Config { confidence: 80.0,
///                       ..Config::default() };
/// assert_eq!(config.max_suggestion_distance, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Confidence threshold a fresh session starts with, in percent.
    pub confidence:              f64,
    /// Largest edit distance at which an unknown name still gets a suggestion.
    pub max_suggestion_distance: usize,
    /// Number of images `Search` returns.
    pub search_results:          usize,
    /// Extension appended to the module name by `Import`.
    pub import_extension:        String,
    /// How deeply functions and imports may nest before evaluation fails.
    pub max_call_depth:          usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { confidence:              DEFAULT_CONFIDENCE,
               max_suggestion_distance: DEFAULT_SUGGESTION_DISTANCE,
               search_results:          DEFAULT_SEARCH_RESULTS,
               import_extension:        DEFAULT_IMPORT_EXTENSION.to_string(),
               max_call_depth:          DEFAULT_MAX_CALL_DEPTH, }
    }
}
