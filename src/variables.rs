//! The Variable Table: a small, linearly-searched name -> value mapping.
//! Names are case-sensitive. There is no fixed cap on the number of
//! variables other than available memory, matched here by a plain `Vec`
//! rather than a hash map -- small counts make linear scan fine, and it
//! keeps `NoMem` a meaningful, testable outcome of `set_number` rather
//! than something Rust's allocator silently never surfaces.

use std::collections::HashMap;

use crate::config::VarType;
use crate::error::{BasicError, BasicResult};

#[derive(Debug, Default)]
pub struct VariableTable {
    vars: Vec<(String, VarType)>,
}

impl VariableTable {
    pub fn new() -> Self {
        VariableTable { vars: Vec::new() }
    }

    /// Create or update `name`'s value.
    pub fn set_number(&mut self, name: &str, value: VarType) -> BasicResult<()> {
        if let Some(slot) = self.vars.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
            return Ok(());
        }
        if self.vars.len() >= self.vars.capacity() {
            self.vars.try_reserve(1).map_err(|_| BasicError::NoMem)?;
        }
        self.vars.push((name.to_string(), value));
        Ok(())
    }

    pub fn get_number(&self, name: &str) -> Option<VarType> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// A point-in-time copy of every variable, for execution tracing.
    pub fn snapshot(&self) -> HashMap<String, VarType> {
        self.vars.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut vt = VariableTable::new();
        vt.set_number("A", 5).unwrap();
        assert_eq!(vt.get_number("A"), Some(5));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut vt = VariableTable::new();
        vt.set_number("a", 1).unwrap();
        assert_eq!(vt.get_number("A"), None);
    }

    #[test]
    fn set_number_updates_in_place() {
        let mut vt = VariableTable::new();
        vt.set_number("A", 1).unwrap();
        vt.set_number("A", 2).unwrap();
        assert_eq!(vt.len(), 1);
        assert_eq!(vt.get_number("A"), Some(2));
    }

    #[test]
    fn undefined_variable_is_none() {
        let vt = VariableTable::new();
        assert_eq!(vt.get_number("X"), None);
    }

    #[test]
    fn clear_empties_table() {
        let mut vt = VariableTable::new();
        vt.set_number("A", 1).unwrap();
        vt.clear();
        assert!(vt.is_empty());
    }
}
