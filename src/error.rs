use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input bytes could not be decoded by any strategy.
    #[error("unable to decode HTML bytes: {0}")]
    DecodeFailure(String),
    /// The underlying HTML parser could not produce a document tree.
    /// The default html5ever parser recovers from any input, so this is
    /// only seen with fallible collaborator parsers.
    #[error("HTML parser did not produce a document tree")]
    ParseFailure,
    /// No bundled stop-list exists for the requested language tag.
    #[error("unknown stoplist: {0}")]
    UnknownStoplist(String),
    /// A caller-supplied tunable is out of its sensible range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
