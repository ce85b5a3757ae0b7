//! nanobasic: a small interactive BASIC interpreter, built to run
//! unchanged on both a memory-constrained microcontroller and a desktop
//! host. See `Host` for the capability boundary between the two.

pub mod command;
pub mod config;
pub mod error;
pub mod eval;
pub mod host;
pub mod program;
pub mod session;
pub mod strings;
pub mod token;
pub mod trace;
pub mod variables;

pub use command::{process_line, LineOutcome};
pub use error::{BasicError, BasicResult};
pub use eval::Evaluator;
pub use host::{Host, StdioHost};
pub use program::Program;
pub use session::Session;
pub use variables::VariableTable;
