//! Stable error kinds returned by every fallible operation in this crate.
//!
//! Variant order matches the original `errcodes.h` so that numeric error
//! codes (exposed for hosts that want to report one, e.g. over a serial
//! link) stay stable across releases.

/// Something went wrong tokenizing, evaluating or running a program.
///
/// Every variant is unit-like: the diagnostic context (current line,
/// current lexeme) is attached by the caller when formatting the error,
/// not stored on the error itself, so this type stays `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BasicError {
    #[error("Token too long")]
    TokenTooLong,
    #[error("Tokenizer internal error")]
    TokenizerInternal,
    #[error("Out of memory")]
    NoMem,
    #[error("Unnumbered line")]
    NoLineNum,
    #[error("Syntax error")]
    Syntax,
    #[error("Input too long")]
    InputTooLong,
    #[error("Interrupted")]
    Interrupted,
    #[error("Bad line number")]
    BadLineNumber,
    #[error("Division by zero")]
    DivZero,
    #[error("Undefined variable")]
    UndefinedVar,
    #[error("Unknown line")]
    UnknownLine,
    #[error("Too many nested GOSUBs")]
    GosubDepth,
    #[error("RETURN without GOSUB")]
    ReturnWithoutGosub,
    #[error("Too many nested FORs")]
    ForDepth,
    #[error("NEXT without FOR")]
    NextWithoutFor,
    #[error("Number too long")]
    NumberTooLong,
    #[error("Malformed number")]
    MalformedNumber,
    #[error("Unsupported immediate statement")]
    UnsupImmediate,
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Unprintable token")]
    UnprintableToken,
    #[error("FOR must be followed by a variable")]
    NoForVar,
    #[error("FOR without '=' sign")]
    NoForEq,
    #[error("FOR without TO")]
    NoForTo,
    #[error("Expected '=' after name")]
    VarNoEq,
    #[error("Expected variable after keyword")]
    KwNoVar,
    #[error("Expected comma")]
    ExpectedComma,
    #[error("No stored program")]
    NoStoredProgram,
    #[error("Program too large")]
    ProgramTooLarge,
}

impl BasicError {
    /// The numeric code this error had in the original `errcodes.h`
    /// ordering, with 0 reserved for "no error".
    pub fn code(self) -> u8 {
        self as u8 + 1
    }
}

pub type BasicResult<T> = Result<T, BasicError>;
