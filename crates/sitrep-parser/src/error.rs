//! Parser error types for sitrep-parser.

/// Errors raised while preparing extraction rules.
///
/// Extraction itself never fails: malformed rows are skipped and missing
/// sections become warnings.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}
