//! Compile-time size limits, mirroring the original `config.h`.

/// Width of a BASIC variable and numeric literal.
pub type VarType = i32;

/// Longest line the editor/tokenizer will accept, including the line number.
pub const MAX_LINE: usize = 81;

/// Longest single token (identifier or keyword) the tokenizer will buffer.
pub const TOKEN_MAX_LENGTH: usize = 40;

/// Longest string literal, including the terminating quote handling.
pub const MAX_STRINGLEN: usize = 41;

/// Longest run of digits in a decimal literal for a 32-bit `VarType`.
pub const MAX_NUMBER: usize = 10;

/// Longest run of digits in a `#`-prefixed hex literal for a 32-bit `VarType`.
pub const MAX_HEX_NUMBER: usize = 8;

/// Maximum depth of nested GOSUB calls.
pub const GOSUB_STACK_DEPTH: usize = 10;

/// Maximum depth of nested FOR loops.
pub const FOR_STACK_DEPTH: usize = 4;

/// Magic header written at the start of a persisted program.
pub const PERSIST_MAGIC: [u8; 3] = *b"PMB";

/// Largest program the desktop host's single save slot will hold.
/// The original bounded this by EEPROM size; a file-backed host needs its
/// own ceiling so `SAVE`/`LOAD` can still raise `ProgramTooLarge`.
pub const MAX_PROGRAM_SIZE: usize = 16_384;
