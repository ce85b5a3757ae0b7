//! The Program Store: a flat buffer of `"<number> <text>\n"` lines, kept in
//! line-number order. There is no parsed representation held between edits
//! or runs -- the Evaluator re-tokenizes this buffer's bytes directly, so
//! every offset it hands out (for GOTO/GOSUB/FOR) is a byte offset into
//! exactly this buffer.

use crate::config::MAX_NUMBER;
use crate::error::{BasicError, BasicResult};

/// Outcome of `Program::insert_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramResult {
    /// A line-number-only input matched no existing line; nothing changed.
    Unchanged,
    /// The input did not start with a line number.
    BadLineNumber,
    /// A line-number-only input deleted the matching existing line.
    LineDeleted,
    /// An existing line was replaced with new text.
    LineReplaced,
    /// A new line was appended after every existing line.
    LineAppended,
    /// A new line was inserted between two existing lines.
    LineInserted,
}

#[derive(Debug, Default)]
pub struct Program {
    buf: String,
}

impl Program {
    pub fn new() -> Self {
        Program { buf: String::new() }
    }

    /// Parse the leading line number from `line`. Returns the number and
    /// the byte offset of the first non-digit character. Fails if the
    /// line doesn't start with a digit, or the run of digits is too long
    /// for `VarType`.
    pub fn parse_line_number(line: &str) -> Option<(i32, usize)> {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == 0 || i > MAX_NUMBER {
            return None;
        }
        let n: i32 = line[..i].parse().ok()?;
        Some((n, i))
    }

    /// `(line_start, line_end_including_newline, line_number)` for every
    /// stored line, in buffer (== line-number) order.
    fn spans(&self) -> Vec<(usize, usize, i32)> {
        let mut out = Vec::new();
        let bytes = self.buf.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            let end = self.buf[pos..]
                .find('\n')
                .map(|o| pos + o + 1)
                .unwrap_or(bytes.len());
            let text = self.buf[pos..end].trim_end_matches('\n');
            if let Some((n, _)) = Self::parse_line_number(text) {
                out.push((pos, end, n));
            }
            pos = end;
        }
        out
    }

    fn find_line(&self, n: i32) -> Option<(usize, usize)> {
        self.spans()
            .into_iter()
            .find(|(_, _, num)| *num == n)
            .map(|(s, e, _)| (s, e))
    }

    /// Byte offset of the first character of line `n`, if it exists.
    /// Used by GOTO/GOSUB to reposition the tokenizer.
    pub fn line_offset(&self, n: i32) -> Option<usize> {
        self.find_line(n).map(|(start, _)| start)
    }

    fn insertion_point(&self, n: i32) -> Option<usize> {
        self.spans()
            .into_iter()
            .find(|(_, _, num)| *num > n)
            .map(|(s, _, _)| s)
    }

    /// Insert, replace, delete or append a line, following `line`'s own
    /// leading line number. `line` must not end with a newline -- one is
    /// added here.
    pub fn insert_line(&mut self, line: &str) -> ProgramResult {
        let (n, num_len) = match Self::parse_line_number(line) {
            Some(v) => v,
            None => return ProgramResult::BadLineNumber,
        };
        let rest = line[num_len..].trim_start();
        let existing = self.find_line(n);

        if rest.is_empty() {
            return match existing {
                Some((start, end)) => {
                    self.buf.replace_range(start..end, "");
                    ProgramResult::LineDeleted
                }
                None => ProgramResult::Unchanged,
            };
        }

        let new_line = format!("{} {}\n", n, rest);
        match existing {
            Some((start, end)) => {
                self.buf.replace_range(start..end, &new_line);
                ProgramResult::LineReplaced
            }
            None => match self.insertion_point(n) {
                Some(pos) => {
                    self.buf.insert_str(pos, &new_line);
                    ProgramResult::LineInserted
                }
                None => {
                    self.buf.push_str(&new_line);
                    ProgramResult::LineAppended
                }
            },
        }
    }

    /// Delete the line numbered `n`. A no-op if there is no such line.
    pub fn delete_line(&mut self, n: i32) -> ProgramResult {
        match self.find_line(n) {
            Some((start, end)) => {
                self.buf.replace_range(start..end, "");
                ProgramResult::LineDeleted
            }
            None => ProgramResult::Unchanged,
        }
    }

    /// Delete the byte range `[b, b + count)`. When the range runs past the
    /// end of the buffer, deletes from `b` to the end instead of failing --
    /// the intended behavior of the original's overrun case.
    pub fn delete_range(&mut self, b: usize, count: usize) {
        let len = self.buf.len();
        let start = b.min(len);
        let end = start.saturating_add(count).min(len);
        self.buf.replace_range(start..end, "");
    }

    /// Call `f(line_number, line_text)` for each stored line in order,
    /// stopping as soon as `f` returns `false`.
    pub fn iterate_lines<F: FnMut(i32, &str) -> bool>(&self, mut f: F) {
        for (start, end, n) in self.spans() {
            let text = self.buf[start..end].trim_end_matches('\n');
            if !f(n, text) {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Byte length of the stored program, not including any terminator.
    pub fn length(&self) -> usize {
        self.buf.len()
    }

    pub fn line_count(&self) -> usize {
        self.spans().len()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn raw_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Used only to stream a program in from persistent storage one byte
    /// at a time, since some hosts can't map their storage into RAM.
    pub fn append_char(&mut self, c: u8) -> BasicResult<()> {
        if self.buf.len() >= crate::config::MAX_PROGRAM_SIZE {
            return Err(BasicError::ProgramTooLarge);
        }
        self.buf.push(c as char);
        Ok(())
    }

    /// Replace the whole program verbatim. Intended for tests and for
    /// `LOAD`, which has already validated the incoming bytes.
    pub fn set_program(&mut self, text: &str) {
        self.buf = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_in_order() {
        let mut p = Program::new();
        assert_eq!(p.insert_line("20 print 2"), ProgramResult::LineAppended);
        assert_eq!(p.insert_line("10 print 1"), ProgramResult::LineInserted);
        assert_eq!(p.insert_line("30 print 3"), ProgramResult::LineAppended);
        assert_eq!(p.as_str(), "10 print 1\n20 print 2\n30 print 3\n");
    }

    #[test]
    fn replaces_existing_line() {
        let mut p = Program::new();
        p.insert_line("10 print 1");
        assert_eq!(p.insert_line("10 print 99"), ProgramResult::LineReplaced);
        assert_eq!(p.as_str(), "10 print 99\n");
    }

    #[test]
    fn bare_number_deletes() {
        let mut p = Program::new();
        p.insert_line("10 print 1");
        assert_eq!(p.insert_line("10"), ProgramResult::LineDeleted);
        assert_eq!(p.as_str(), "");
    }

    #[test]
    fn bare_number_with_no_match_is_unchanged() {
        let mut p = Program::new();
        assert_eq!(p.insert_line("10"), ProgramResult::Unchanged);
    }

    #[test]
    fn non_numeric_line_is_bad_line_number() {
        let mut p = Program::new();
        assert_eq!(p.insert_line("print 1"), ProgramResult::BadLineNumber);
    }

    #[test]
    fn delete_range_overrun_deletes_to_end() {
        let mut p = Program::new();
        p.set_program("10 print 1\n20 print 2\n");
        p.delete_range(5, 1000);
        assert_eq!(p.as_str(), "10 pr");
    }

    #[test]
    fn iterate_lines_can_stop_early() {
        let mut p = Program::new();
        p.insert_line("10 print 1");
        p.insert_line("20 print 2");
        p.insert_line("30 print 3");
        let mut seen = Vec::new();
        p.iterate_lines(|n, _| {
            seen.push(n);
            n < 20
        });
        assert_eq!(seen, vec![10, 20]);
    }
}
