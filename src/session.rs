//! Glues the Program Store, the Variable Table and an optional execution
//! tracer into the single object the binary and the Command Layer share.
//! The Evaluator itself stays stateless across runs (see `eval.rs`); this
//! is the thing that actually persists across lines typed at the prompt.

use crate::program::Program;
use crate::trace::ExecutionTracer;
use crate::variables::VariableTable;

pub struct Session {
    pub program: Program,
    pub vars: VariableTable,
    /// `Some` once tracing has been turned on; `None` is the zero-cost
    /// default every run starts in.
    pub tracer: Option<ExecutionTracer>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            program: Program::new(),
            vars: VariableTable::new(),
            tracer: None,
        }
    }

    /// Turn on execution tracing for every statement run through this
    /// session from now on.
    pub fn enable_tracing(&mut self) {
        let mut tracer = ExecutionTracer::new();
        tracer.enable();
        self.tracer = Some(tracer);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_tracer() {
        let session = Session::new();
        assert!(session.tracer.is_none());
    }

    #[test]
    fn enable_tracing_installs_an_enabled_tracer() {
        let mut session = Session::new();
        session.enable_tracing();
        assert!(session.tracer.unwrap().enabled);
    }
}
