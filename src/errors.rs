use thiserror::Error;

/// Errors that can occur while compiling a pattern.
///
/// Both variants are terminal: they are raised before any matching work
/// starts, and nothing is retried or partially returned. Once a pattern has
/// been compiled successfully, matching itself cannot fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pattern is not well-formed: unbalanced or empty groups, a bad or
    /// trailing escape, a quantifier that doesn't follow a closed group, or
    /// a non-ASCII character.
    #[error("invalid pattern")]
    InvalidPattern,

    /// The pattern needs more automaton states than the bitmask encoding
    /// used during determinization can hold.
    #[error("pattern needs more than 64 automaton states")]
    PatternTooComplex,
}
