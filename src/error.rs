/// Errors that can occur while parsing an SVG document or a path
/// expression.
///
/// The parse variants carry the active command letter (with its original
/// case) and, where applicable, the offending token(s), so callers can
/// produce a diagnostic without re-scanning the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// XML-level failure while walking the document.
    #[error("SVG parse error: {0}")]
    SvgParse(String),
    /// A command run contained no coordinate tokens at all.
    #[error("{command} does not contain coordinate data")]
    EmptyCoordinate { command: char },
    /// A command run violated its arity rule (wrong parity, or not a
    /// multiple of the required group size). `data` is the whole run.
    #[error("{command} does not contain a valid coordinate or set of coordinates: {data}")]
    InvalidCoordinate { command: char, data: String },
    /// A token in x position failed to parse as a number.
    #[error("{command} does not contain a valid x: {data}")]
    InvalidX { command: char, data: String },
    /// A token in y position failed to parse as a number.
    #[error("{command} does not contain a valid y: {data}")]
    InvalidY { command: char, data: String },
    /// One of the `S s Q q T t A a` commands, which this crate rejects
    /// rather than approximates.
    #[error("{command} is not supported")]
    UnsupportedCommand { command: char },
}
