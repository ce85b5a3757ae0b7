//! The capability surface an evaluator needs from its environment:
//! character I/O, a clock, GPIO-style pins and a single persistence slot.
//! Modeled as a trait so the core crate never depends on a terminal
//! library directly -- `StdioHost` below is the desktop implementation
//! this crate ships; an embedded target would provide its own.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{MAX_PROGRAM_SIZE, PERSIST_MAGIC};
use crate::error::{BasicError, BasicResult};
use crate::program::Program;

pub trait Host {
    fn output_str(&mut self, s: &str);
    fn output_int(&mut self, v: i32);
    fn output_eol(&mut self);

    /// Read one line of input, truncated to `max_len` characters. An
    /// input longer than that is reported as `InputTooLong` rather than
    /// silently truncated.
    fn read_line(&mut self, max_len: usize) -> BasicResult<String>;

    /// Polled once before every statement dispatch.
    fn poll_interrupt(&mut self) -> bool;

    fn millis(&self) -> i32;
    fn sleep(&mut self, ms: i32);

    fn peek(&mut self, addr: i32) -> u8;
    fn poke(&mut self, addr: i32, value: u8);
    fn pinmode(&mut self, pin: i32, mode: i32);
    fn digitalwrite(&mut self, pin: i32, value: i32);
    fn digitalread(&mut self, pin: i32) -> i32;
    fn analogwrite(&mut self, pin: i32, value: i32);
    fn analogread(&mut self, pin: i32) -> i32;

    fn persist_save(&mut self, program: &Program) -> BasicResult<()>;
    fn persist_load(&mut self, program: &mut Program) -> BasicResult<()>;

    /// Lines for the INFO command: memory/storage sizing, one per line.
    fn info(&self) -> Vec<String>;
}

/// Desktop host: stdin/stdout, a wall clock, and a single save slot
/// backed by a file. PEEK/POKE/GPIO have no real target, so they print a
/// diagnostic and return 0, same as the original's Linux interface.
pub struct StdioHost {
    started: Instant,
    save_path: PathBuf,
}

impl StdioHost {
    pub fn new(save_path: PathBuf) -> Self {
        StdioHost {
            started: Instant::now(),
            save_path,
        }
    }
}

impl Host for StdioHost {
    fn output_str(&mut self, s: &str) {
        print!("{s}");
        let _ = io::stdout().flush();
    }

    fn output_int(&mut self, v: i32) {
        print!("{v}");
        let _ = io::stdout().flush();
    }

    fn output_eol(&mut self) {
        println!();
    }

    fn read_line(&mut self, max_len: usize) -> BasicResult<String> {
        let mut line = String::new();
        let n = io::stdin()
            .read_line(&mut line)
            .map_err(|_| BasicError::Interrupted)?;
        if n == 0 {
            // EOF on stdin: treat the session as if the user typed QUIT,
            // rather than the original's exit(0) from inside the read.
            return Err(BasicError::Interrupted);
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.len() > max_len {
            return Err(BasicError::InputTooLong);
        }
        Ok(line.to_string())
    }

    fn poll_interrupt(&mut self) -> bool {
        false
    }

    fn millis(&self) -> i32 {
        self.started.elapsed().as_millis() as i32
    }

    fn sleep(&mut self, ms: i32) {
        if ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(ms as u64));
        }
    }

    fn peek(&mut self, addr: i32) -> u8 {
        log::info!("PEEK {addr} -- not implemented on this platform");
        0
    }

    fn poke(&mut self, addr: i32, value: u8) {
        log::info!("POKE {addr}, {value} -- not implemented on this platform");
    }

    fn pinmode(&mut self, pin: i32, mode: i32) {
        log::info!("PINMODE {pin}, {mode} -- not implemented on this platform");
    }

    fn digitalwrite(&mut self, pin: i32, value: i32) {
        log::info!("DIGITALWRITE {pin}, {value} -- not implemented on this platform");
    }

    fn digitalread(&mut self, pin: i32) -> i32 {
        log::info!("DIGITALREAD {pin} -- not implemented on this platform");
        0
    }

    fn analogwrite(&mut self, pin: i32, value: i32) {
        log::info!("ANALOGWRITE {pin}, {value} -- not implemented on this platform");
    }

    fn analogread(&mut self, pin: i32) -> i32 {
        log::info!("ANALOGREAD {pin} -- not implemented on this platform");
        0
    }

    fn persist_save(&mut self, program: &Program) -> BasicResult<()> {
        if program.length() >= MAX_PROGRAM_SIZE - PERSIST_MAGIC.len() {
            return Err(BasicError::ProgramTooLarge);
        }
        let mut bytes = Vec::with_capacity(PERSIST_MAGIC.len() + program.length() + 1);
        bytes.extend_from_slice(&PERSIST_MAGIC);
        bytes.extend_from_slice(program.raw_bytes());
        bytes.push(0);
        fs::write(&self.save_path, bytes).map_err(|_| BasicError::NoMem)
    }

    fn persist_load(&mut self, program: &mut Program) -> BasicResult<()> {
        let bytes = fs::read(&self.save_path).map_err(|_| BasicError::NoStoredProgram)?;
        if bytes.len() < PERSIST_MAGIC.len() || bytes[..PERSIST_MAGIC.len()] != PERSIST_MAGIC {
            return Err(BasicError::NoStoredProgram);
        }
        program.clear();
        for &b in &bytes[PERSIST_MAGIC.len()..] {
            if b == 0 {
                break;
            }
            program.append_char(b)?;
        }
        Ok(())
    }

    fn info(&self) -> Vec<String> {
        vec![
            "SAVE file: not sized ahead of time on this platform".to_string(),
            "Free RAM: not implemented on this platform".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prog.bas");
        let mut host = StdioHost::new(path);

        let mut program = Program::new();
        program.insert_line("10 print 1");
        host.persist_save(&program).unwrap();

        let mut loaded = Program::new();
        host.persist_load(&mut loaded).unwrap();
        assert_eq!(loaded.as_str(), program.as_str());
    }

    #[test]
    fn load_without_a_saved_program_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bas");
        let mut host = StdioHost::new(path);
        let mut program = Program::new();
        assert_eq!(
            host.persist_load(&mut program),
            Err(BasicError::NoStoredProgram)
        );
    }
}
