//! Execution tracing: an optional, side-channel record of each statement
//! run -- line number, which variables changed, and what was printed --
//! exported as JSON so a run can be diffed against another implementation
//! or inspected after the fact.

use crate::config::VarType;
use crate::error::BasicResult;
use crate::host::Host;
use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub line_number: i32,
    pub statement_index: usize,
    pub statement_type: String,
    pub variables_snapshot: HashMap<String, VarType>,
    pub output: String,
}

#[derive(Debug, Default)]
pub struct ExecutionTracer {
    pub entries: Vec<TraceEntry>,
    pub enabled: bool,
    current_output: String,
}

impl ExecutionTracer {
    pub fn new() -> Self {
        ExecutionTracer {
            entries: Vec::new(),
            enabled: false,
            current_output: String::new(),
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn record_statement(
        &mut self,
        line_number: i32,
        statement_index: usize,
        statement_type: &str,
        variables: &HashMap<String, VarType>,
    ) {
        if !self.enabled {
            return;
        }

        let entry = TraceEntry {
            line_number,
            statement_index,
            statement_type: statement_type.to_string(),
            variables_snapshot: variables.clone(),
            output: self.current_output.clone(),
        };

        self.entries.push(entry);
        self.current_output.clear();
    }

    pub fn record_output(&mut self, text: &str) {
        if self.enabled {
            self.current_output.push_str(text);
        }
    }

    pub fn save_to_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("=== Execution Trace Summary ===");
        println!("Total statements executed: {}", self.entries.len());

        if let Some(first) = self.entries.first() {
            println!("First line: {}", first.line_number);
        }
        if let Some(last) = self.entries.last() {
            println!("Last line: {}", last.line_number);
        }

        let mut type_counts: HashMap<String, usize> = HashMap::new();
        for entry in &self.entries {
            *type_counts.entry(entry.statement_type.clone()).or_insert(0) += 1;
        }

        println!("\nStatement type counts:");
        let mut types: Vec<_> = type_counts.iter().collect();
        types.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        for (stmt_type, count) in types.iter().take(10) {
            println!("  {}: {}", stmt_type, count);
        }
    }

    pub fn print_detailed(&self, limit: Option<usize>) {
        println!("=== Detailed Execution Trace ===");
        let entries = if let Some(n) = limit {
            &self.entries[..n.min(self.entries.len())]
        } else {
            &self.entries
        };

        for (i, entry) in entries.iter().enumerate() {
            println!(
                "\n[{}] Line {} Statement {}: {}",
                i, entry.line_number, entry.statement_index, entry.statement_type
            );

            if !entry.output.is_empty() {
                println!("  Output: {:?}", entry.output);
            }

            if !entry.variables_snapshot.is_empty() {
                println!("  Variables:");
                let mut vars: Vec<_> = entry.variables_snapshot.iter().collect();
                vars.sort_by_key(|(name, _)| name.as_str());
                for (name, value) in vars.iter().take(10) {
                    println!("    {} = {}", name, value);
                }
                if vars.len() > 10 {
                    println!("    ... and {} more", vars.len() - 10);
                }
            }
        }
    }
}

/// A `Host` wrapper the Evaluator installs for the duration of one
/// statement when a tracer is attached: every character written passes
/// through to the real host unchanged, and is also collected so it can be
/// attached to that statement's `TraceEntry`.
pub(crate) struct TracingHost<'a> {
    inner: &'a mut dyn Host,
    captured: String,
}

impl<'a> TracingHost<'a> {
    pub fn new(inner: &'a mut dyn Host) -> Self {
        TracingHost {
            inner,
            captured: String::new(),
        }
    }

    pub fn take_captured(&mut self) -> String {
        std::mem::take(&mut self.captured)
    }
}

impl Host for TracingHost<'_> {
    fn output_str(&mut self, s: &str) {
        self.captured.push_str(s);
        self.inner.output_str(s);
    }

    fn output_int(&mut self, v: i32) {
        self.captured.push_str(&v.to_string());
        self.inner.output_int(v);
    }

    fn output_eol(&mut self) {
        self.captured.push('\n');
        self.inner.output_eol();
    }

    fn read_line(&mut self, max_len: usize) -> BasicResult<String> {
        self.inner.read_line(max_len)
    }

    fn poll_interrupt(&mut self) -> bool {
        self.inner.poll_interrupt()
    }

    fn millis(&self) -> i32 {
        self.inner.millis()
    }

    fn sleep(&mut self, ms: i32) {
        self.inner.sleep(ms)
    }

    fn peek(&mut self, addr: i32) -> u8 {
        self.inner.peek(addr)
    }

    fn poke(&mut self, addr: i32, value: u8) {
        self.inner.poke(addr, value)
    }

    fn pinmode(&mut self, pin: i32, mode: i32) {
        self.inner.pinmode(pin, mode)
    }

    fn digitalwrite(&mut self, pin: i32, value: i32) {
        self.inner.digitalwrite(pin, value)
    }

    fn digitalread(&mut self, pin: i32) -> i32 {
        self.inner.digitalread(pin)
    }

    fn analogwrite(&mut self, pin: i32, value: i32) {
        self.inner.analogwrite(pin, value)
    }

    fn analogread(&mut self, pin: i32) -> i32 {
        self.inner.analogread(pin)
    }

    fn persist_save(&mut self, program: &Program) -> BasicResult<()> {
        self.inner.persist_save(program)
    }

    fn persist_load(&mut self, program: &mut Program) -> BasicResult<()> {
        self.inner.persist_load(program)
    }

    fn info(&self) -> Vec<String> {
        self.inner.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracer_basic() {
        let mut tracer = ExecutionTracer::new();
        tracer.enable();

        let mut vars = HashMap::new();
        vars.insert("I".to_string(), 1);

        tracer.record_statement(10, 0, "FOR", &vars);
        tracer.record_output("Hello");
        tracer.record_statement(20, 0, "PRINT", &vars);

        assert_eq!(tracer.entries.len(), 2);
        assert_eq!(tracer.entries[0].statement_type, "FOR");
        assert_eq!(tracer.entries[1].output, "Hello");
    }

    #[test]
    fn disabled_tracer_records_nothing() {
        let mut tracer = ExecutionTracer::new();
        let vars = HashMap::new();
        tracer.record_statement(10, 0, "PRINT", &vars);
        assert!(tracer.entries.is_empty());
    }
}
