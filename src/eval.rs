//! The Evaluator: recursive-descent expression parsing plus a statement
//! dispatcher that interprets the stored program text directly -- there is
//! no separate pass that builds an AST. GOTO/GOSUB/FOR jumps work by
//! rewriting the tokenizer's cursor to a byte offset captured earlier,
//! either from the Program Store's line index (GOTO/GOSUB targets) or
//! from the tokenizer's own `pos()` at the moment a GOSUB/FOR was entered
//! (RETURN/NEXT targets).

use crate::config::{FOR_STACK_DEPTH, GOSUB_STACK_DEPTH};
use crate::error::{BasicError, BasicResult};
use crate::host::Host;
use crate::program::Program;
use crate::token::{TokenKind, Tokenizer};
use crate::trace::{ExecutionTracer, TracingHost};
use crate::variables::VariableTable;

struct ForState {
    var_name: String,
    back_pos: usize,
    to: i32,
}

/// Holds the GOSUB/FOR stacks and the END flag across one `run`/`run_line`
/// call. A fresh `Evaluator` is cheap, so callers typically make one per
/// run rather than trying to reuse it across unrelated runs.
#[derive(Default)]
pub struct Evaluator {
    current_line: i32,
    last_lexeme: String,
    last_statement_word: String,
    gosub_stack: Vec<usize>,
    for_stack: Vec<ForState>,
    ended: bool,
}

/// The word identifying a statement for trace purposes -- the keyword
/// lexeme itself ("print", "goto", ...), or "assign" for a bare
/// `name = expr` with no keyword.
fn word_of(t: &Tokenizer) -> String {
    t.current()
        .as_word()
        .map(str::to_string)
        .unwrap_or_else(|| "assign".to_string())
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// The line number the error-reporting caller should quote, matching
    /// the original's `self->current_line` -- the most recently entered
    /// numbered statement, not necessarily where an error was raised.
    pub fn current_line(&self) -> i32 {
        self.current_line
    }

    /// The lexeme in play when the last error was returned, for the
    /// `" near: <word>"` part of an error report.
    pub fn last_lexeme(&self) -> &str {
        &self.last_lexeme
    }

    /// Run the whole stored program from its first line. `tracer`, when
    /// `Some`, gets one `TraceEntry` per statement executed.
    pub fn run(
        &mut self,
        program: &Program,
        vars: &mut VariableTable,
        host: &mut dyn Host,
        tracer: Option<&mut ExecutionTracer>,
    ) -> BasicResult<()> {
        self.run_from(program, vars, host, 0, tracer)
    }

    fn run_from(
        &mut self,
        program: &Program,
        vars: &mut VariableTable,
        host: &mut dyn Host,
        start: usize,
        mut tracer: Option<&mut ExecutionTracer>,
    ) -> BasicResult<()> {
        self.gosub_stack.clear();
        self.for_stack.clear();
        self.ended = false;

        let text = program.as_str();
        let mut t = Tokenizer::new(text);
        t.set_pos(start);
        t.next()?;

        let mut statement_index = 0usize;
        loop {
            let result = if let Some(tr) = tracer.as_deref_mut() {
                let mut thost = TracingHost::new(host);
                let result = self.branch_numbered_statement(&mut t, program, vars, &mut thost);
                tr.record_output(&thost.take_captured());
                tr.record_statement(
                    self.current_line,
                    statement_index,
                    &self.last_statement_word,
                    &vars.snapshot(),
                );
                result
            } else {
                self.branch_numbered_statement(&mut t, program, vars, host)
            };
            statement_index += 1;

            if let Err(e) = result {
                self.last_lexeme = t.lexeme().to_string();
                return Err(e);
            }
            if self.ended {
                break;
            }
            if let Err(e) = t.next() {
                self.last_lexeme = t.lexeme().to_string();
                return Err(e);
            }
            if t.is_finished() {
                break;
            }
        }
        Ok(())
    }

    /// Run a single statement that did not come from the stored program
    /// (the command layer's "else it's a statement" fallback). GOTO and
    /// GOSUB are rejected by the caller before this is ever reached.
    pub fn run_line(
        &mut self,
        line: &str,
        vars: &mut VariableTable,
        host: &mut dyn Host,
        tracer: Option<&mut ExecutionTracer>,
    ) -> BasicResult<()> {
        self.gosub_stack.clear();
        self.current_line = 0;
        let mut t = Tokenizer::new(line);
        t.next()?;
        self.last_statement_word = word_of(&t);
        // run_line has no stored program to jump within, so GOTO/GOSUB
        // targets never resolve; pass an empty one.
        let empty = Program::new();

        let result = if let Some(tr) = tracer {
            let mut thost = TracingHost::new(host);
            let result = self.branch_statement(&mut t, &empty, vars, &mut thost);
            tr.record_output(&thost.take_captured());
            tr.record_statement(self.current_line, 0, &self.last_statement_word, &vars.snapshot());
            result
        } else {
            self.branch_statement(&mut t, &empty, vars, host)
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.last_lexeme = t.lexeme().to_string();
                Err(e)
            }
        }
    }

    fn branch_numbered_statement(
        &mut self,
        t: &mut Tokenizer,
        program: &Program,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        match t.current() {
            TokenKind::Number(n) => {
                self.current_line = *n;
                t.set_line(*n);
                t.next()?;
                self.last_statement_word = word_of(t);
                self.branch_statement(t, program, vars, host)
            }
            _ => Err(BasicError::NoLineNum),
        }
    }

    fn branch_statement(
        &mut self,
        t: &mut Tokenizer,
        program: &Program,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        if host.poll_interrupt() {
            return Err(BasicError::Interrupted);
        }

        let word = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::Syntax),
        };

        if word.eq_ignore_ascii_case("print") || word == "?" {
            self.print_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("if") {
            self.if_statement(t, program, vars, host)
        } else if word.eq_ignore_ascii_case("goto") {
            self.goto_statement(t, program, vars)
        } else if word.eq_ignore_ascii_case("gosub") {
            self.gosub_statement(t, program, vars)
        } else if word.eq_ignore_ascii_case("end") {
            t.next()?;
            self.ended = true;
            Ok(())
        } else if word.eq_ignore_ascii_case("return") {
            self.return_statement(t)
        } else if word.eq_ignore_ascii_case("rem") {
            self.skip_to_next_line(t)
        } else if word.eq_ignore_ascii_case("for") {
            self.for_statement(t, vars)
        } else if word.eq_ignore_ascii_case("next") {
            self.next_statement(t, vars)
        } else if word.eq_ignore_ascii_case("input") {
            self.input_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("let") {
            t.next()?;
            self.assignment(t, vars)
        } else if word.eq_ignore_ascii_case("millis") {
            self.millis_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("peek") {
            self.peek_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("digitalread") {
            self.digitalread_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("analogread") {
            self.analogread_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("analogwrite") {
            self.analogwrite_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("digitalwrite") {
            self.digitalwrite_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("pinmode") {
            self.pinmode_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("poke") {
            self.poke_statement(t, vars, host)
        } else if word.eq_ignore_ascii_case("delay") {
            self.delay_statement(t, vars, host)
        } else {
            self.assignment(t, vars)
        }
    }

    fn skip_to_next_line(&mut self, t: &mut Tokenizer) -> BasicResult<()> {
        loop {
            t.next()?;
            if t.current().is_eol() {
                break;
            }
        }
        Ok(())
    }

    fn print_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        if t.current().is_eol() {
            host.output_eol();
            return Ok(());
        }

        let mut no_newline = false;
        loop {
            match t.current().clone() {
                TokenKind::Str(s) => {
                    host.output_str(&s);
                    t.next()?;
                }
                TokenKind::Sym(',') => {
                    host.output_str(" ");
                    t.next()?;
                }
                TokenKind::Sym(';') => {
                    no_newline = true;
                    t.next()?;
                }
                TokenKind::Sym('(') | TokenKind::Sym('-') | TokenKind::Number(_) => {
                    let r = self.branch_expr(t, vars)?;
                    host.output_int(r);
                }
                TokenKind::Word(w) if w.eq_ignore_ascii_case("else") => {
                    self.skip_to_next_line(t)?;
                }
                TokenKind::Word(_) => {
                    let r = self.branch_expr(t, vars)?;
                    host.output_int(r);
                }
                _ => return Err(BasicError::UnprintableToken),
            }
            if t.current().is_eol() {
                break;
            }
        }

        if !no_newline {
            host.output_eol();
        }
        Ok(())
    }

    fn goto_statement(
        &mut self,
        t: &mut Tokenizer,
        program: &Program,
        vars: &mut VariableTable,
    ) -> BasicResult<()> {
        t.next()?;
        let line = self.branch_expr(t, vars)?;
        match program.line_offset(line) {
            Some(pos) => {
                // No `t.next()` here: the run loop's own post-statement
                // advance is what reads the line-number token at `pos`.
                t.set_pos(pos);
                Ok(())
            }
            None => Err(BasicError::UnknownLine),
        }
    }

    fn gosub_statement(
        &mut self,
        t: &mut Tokenizer,
        program: &Program,
        vars: &mut VariableTable,
    ) -> BasicResult<()> {
        t.next()?;
        let line = self.branch_expr(t, vars)?;
        if self.gosub_stack.len() >= GOSUB_STACK_DEPTH {
            return Err(BasicError::GosubDepth);
        }
        match program.line_offset(line) {
            Some(pos) => {
                self.gosub_stack.push(t.pos());
                t.set_pos(pos);
                Ok(())
            }
            None => Err(BasicError::UnknownLine),
        }
    }

    fn return_statement(&mut self, t: &mut Tokenizer) -> BasicResult<()> {
        t.next()?;
        match self.gosub_stack.pop() {
            Some(pos) => {
                t.set_pos(pos);
                Ok(())
            }
            None => Err(BasicError::ReturnWithoutGosub),
        }
    }

    fn if_statement(
        &mut self,
        t: &mut Tokenizer,
        program: &Program,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let condition = self.branch_expr(t, vars)?;
        t.next()?; // the THEN keyword is not actually checked

        if condition != 0 {
            return self.branch_statement(t, program, vars, host);
        }

        let mut found_else = false;
        loop {
            t.next()?;
            if t.current().as_word_ci("else") {
                found_else = true;
                break;
            }
            if t.current().is_eol() {
                break;
            }
        }
        if found_else {
            t.next()?;
            self.branch_statement(t, program, vars, host)
        } else {
            // Leave the cursor sitting on Eol; the run loop's own
            // post-statement advance is what reads the next line's number.
            Ok(())
        }
    }

    fn for_statement(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<()> {
        if self.for_stack.len() >= FOR_STACK_DEPTH {
            return Err(BasicError::ForDepth);
        }
        t.next()?;

        let var_name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::NoForVar),
        };
        t.next()?;

        if !t.current().is_sym('=') {
            return Err(BasicError::NoForEq);
        }
        t.next()?;

        let start = self.branch_expr(t, vars)?;
        vars.set_number(&var_name, start)?;

        if !t.current().as_word_ci("to") {
            return Err(BasicError::NoForTo);
        }
        t.next()?;

        let end = self.branch_expr(t, vars)?;
        let back_pos = t.pos();
        self.for_stack.push(ForState {
            var_name,
            back_pos,
            to: end,
        });
        Ok(())
    }

    fn next_statement(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<()> {
        if self.for_stack.is_empty() {
            return Err(BasicError::NextWithoutFor);
        }
        t.next()?;

        let top = self.for_stack.last().unwrap();
        let count = vars.get_number(&top.var_name).unwrap_or(0);

        if count == top.to {
            self.for_stack.pop();
        } else {
            let var_name = self.for_stack.last().unwrap().var_name.clone();
            let back_pos = self.for_stack.last().unwrap().back_pos;
            vars.set_number(&var_name, count.wrapping_add(1))?;
            // No `t.next()` here either, for the same reason as GOTO.
            t.set_pos(back_pos);
        }
        Ok(())
    }

    fn assignment(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<()> {
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::Syntax),
        };
        t.next()?;
        if !t.current().is_sym('=') {
            return Err(BasicError::VarNoEq);
        }
        t.next()?;
        let value = self.branch_expr(t, vars)?;
        vars.set_number(&name, value)
    }

    fn input_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::KwNoVar),
        };

        let line = match host.read_line(crate::config::MAX_NUMBER) {
            Err(BasicError::InputTooLong) => return Err(BasicError::NumberTooLong),
            other => other?,
        };

        match Program::parse_line_number(line.trim()) {
            Some((value, _)) => {
                vars.set_number(&name, value)?;
                t.next()
            }
            None => Err(BasicError::MalformedNumber),
        }
    }

    fn millis_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::KwNoVar),
        };
        let val = host.millis();
        vars.set_number(&name, val)?;
        t.next()
    }

    fn delay_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let ms = self.branch_expr(t, vars)?;
        host.sleep(ms);
        Ok(())
    }

    fn pin_address_pair(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
    ) -> BasicResult<(i32, i32)> {
        let a = self.branch_expr(t, vars)?;
        if !t.current().is_sym(',') {
            return Err(BasicError::ExpectedComma);
        }
        t.next()?;
        let b = self.branch_expr(t, vars)?;
        Ok((a, b))
    }

    fn digitalwrite_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let (pin, value) = self.pin_address_pair(t, vars)?;
        host.digitalwrite(pin, value);
        Ok(())
    }

    fn analogwrite_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let (pin, value) = self.pin_address_pair(t, vars)?;
        host.analogwrite(pin, value);
        Ok(())
    }

    fn poke_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let (addr, value) = self.pin_address_pair(t, vars)?;
        host.poke(addr, value as u8);
        Ok(())
    }

    fn pinmode_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let (pin, mode) = self.pin_address_pair(t, vars)?;
        host.pinmode(pin, mode);
        Ok(())
    }

    fn peek_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let addr = self.branch_expr(t, vars)?;
        if !t.current().is_sym(',') {
            return Err(BasicError::ExpectedComma);
        }
        t.next()?;
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::KwNoVar),
        };
        let val = host.peek(addr) as i32;
        vars.set_number(&name, val)?;
        t.next()
    }

    fn digitalread_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let addr = self.branch_expr(t, vars)?;
        if !t.current().is_sym(',') {
            return Err(BasicError::ExpectedComma);
        }
        t.next()?;
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::KwNoVar),
        };
        let val = host.digitalread(addr);
        vars.set_number(&name, val)?;
        t.next()
    }

    fn analogread_statement(
        &mut self,
        t: &mut Tokenizer,
        vars: &mut VariableTable,
        host: &mut dyn Host,
    ) -> BasicResult<()> {
        t.next()?;
        let addr = self.branch_expr(t, vars)?;
        if !t.current().is_sym(',') {
            return Err(BasicError::ExpectedComma);
        }
        t.next()?;
        let name = match t.current() {
            TokenKind::Word(w) => w.clone(),
            _ => return Err(BasicError::KwNoVar),
        };
        let val = host.analogread(addr);
        vars.set_number(&name, val)?;
        t.next()
    }

    /// `["not"] term (('+'|'-'|'&'|'|'|'<'|'>'|'=') term)*`
    fn branch_expr(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<i32> {
        if t.current().as_word_ci("not") {
            t.next()?;
            let v = self.branch_expr(t, vars)?;
            return Ok(if v != 0 { 0 } else { 1 });
        }

        let mut t1 = self.branch_term(t, vars)?;
        loop {
            let op = match t.current() {
                TokenKind::Sym(c @ ('+' | '-' | '&' | '|' | '<' | '>' | '=')) => *c,
                _ => break,
            };
            t.next()?;
            let t2 = self.branch_term(t, vars)?;
            t1 = match op {
                '+' => t1.wrapping_add(t2),
                '-' => t1.wrapping_sub(t2),
                '&' => t1 & t2,
                '|' => t1 | t2,
                '<' => (t1 < t2) as i32,
                '>' => (t1 > t2) as i32,
                '=' => (t1 == t2) as i32,
                _ => unreachable!(),
            };
        }
        Ok(t1)
    }

    /// `factor (('*'|'/'|'%') factor)*`
    fn branch_term(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<i32> {
        let mut t1 = self.branch_factor(t, vars)?;
        loop {
            let op = match t.current() {
                TokenKind::Sym(c @ ('*' | '/' | '%')) => *c,
                _ => break,
            };
            t.next()?;
            let t2 = self.branch_factor(t, vars)?;
            t1 = match op {
                '*' => t1.wrapping_mul(t2),
                '/' => {
                    if t2 == 0 {
                        return Err(BasicError::DivZero);
                    }
                    t1.wrapping_div(t2)
                }
                '%' => {
                    if t2 == 0 {
                        return Err(BasicError::DivZero);
                    }
                    t1.wrapping_rem(t2)
                }
                _ => unreachable!(),
            };
        }
        Ok(t1)
    }

    /// `number | '-' factor | '(' expr ')' | word`
    fn branch_factor(&mut self, t: &mut Tokenizer, vars: &mut VariableTable) -> BasicResult<i32> {
        match t.current().clone() {
            TokenKind::Number(n) => {
                t.next()?;
                Ok(n)
            }
            TokenKind::Sym('-') => {
                t.next()?;
                let v = self.branch_factor(t, vars)?;
                Ok(v.wrapping_neg())
            }
            TokenKind::Sym('(') => {
                t.next()?;
                let v = self.branch_expr(t, vars)?;
                if !t.current().is_sym(')') {
                    return Err(BasicError::UnexpectedToken);
                }
                t.next()?;
                Ok(v)
            }
            TokenKind::Word(w) => match vars.get_number(&w) {
                Some(v) => {
                    t.next()?;
                    Ok(v)
                }
                None => Err(BasicError::UndefinedVar),
            },
            _ => Err(BasicError::Syntax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;

    #[derive(Default)]
    struct RecordingHost {
        out: String,
    }

    impl Host for RecordingHost {
        fn output_str(&mut self, s: &str) {
            self.out.push_str(s);
        }
        fn output_int(&mut self, v: i32) {
            self.out.push_str(&v.to_string());
        }
        fn output_eol(&mut self) {
            self.out.push('\n');
        }
        fn read_line(&mut self, _max_len: usize) -> BasicResult<String> {
            Ok(String::new())
        }
        fn poll_interrupt(&mut self) -> bool {
            false
        }
        fn millis(&self) -> i32 {
            0
        }
        fn sleep(&mut self, _ms: i32) {}
        fn peek(&mut self, _addr: i32) -> u8 {
            0
        }
        fn poke(&mut self, _addr: i32, _value: u8) {}
        fn pinmode(&mut self, _pin: i32, _mode: i32) {}
        fn digitalwrite(&mut self, _pin: i32, _value: i32) {}
        fn digitalread(&mut self, _pin: i32) -> i32 {
            0
        }
        fn analogwrite(&mut self, _pin: i32, _value: i32) {}
        fn analogread(&mut self, _pin: i32) -> i32 {
            0
        }
        fn persist_save(&mut self, _program: &Program) -> BasicResult<()> {
            Ok(())
        }
        fn persist_load(&mut self, _program: &mut Program) -> BasicResult<()> {
            Ok(())
        }
        fn info(&self) -> Vec<String> {
            vec![]
        }
    }

    fn run(src: &str) -> (String, BasicResult<()>) {
        let mut program = Program::new();
        for line in src.lines() {
            program.insert_line(line);
        }
        let mut vars = VariableTable::new();
        let mut host = RecordingHost::default();
        let mut ev = Evaluator::new();
        let result = ev.run(&program, &mut vars, &mut host, None);
        (host.out, result)
    }

    #[test]
    fn prints_an_expression() {
        let (out, result) = run("10 print 1+2\n");
        result.unwrap();
        assert_eq!(out, "3\n");
    }

    #[test]
    fn for_next_counts_inclusive() {
        let (out, result) = run("10 for i=1 to 3\n20 print i\n30 next\n");
        result.unwrap();
        assert_eq!(out, "1\n2\n3\n");
    }

    #[test]
    fn gosub_then_return() {
        let (out, result) = run("10 gosub 100\n20 print 2\n30 end\n100 print 1\n110 return\n");
        result.unwrap();
        assert_eq!(out, "1\n2\n");
    }

    #[test]
    fn if_else_picks_the_right_branch() {
        let (out, result) = run("10 if 0 then print 1 else print 2\n");
        result.unwrap();
        assert_eq!(out, "2\n");
    }

    #[test]
    fn division_by_zero_is_reported() {
        let (_, result) = run("10 print 1/0\n");
        assert_eq!(result, Err(BasicError::DivZero));
    }

    #[test]
    fn undefined_variable_is_reported() {
        let (_, result) = run("10 print x\n");
        assert_eq!(result, Err(BasicError::UndefinedVar));
    }

    #[test]
    fn goto_jumps_to_target_line() {
        let (out, result) = run("10 goto 30\n20 print 2\n30 print 3\n");
        result.unwrap();
        assert_eq!(out, "3\n");
    }

    #[test]
    fn goto_to_missing_line_is_unknown_line() {
        let (_, result) = run("10 goto 999\n");
        assert_eq!(result, Err(BasicError::UnknownLine));
    }

    #[test]
    fn gosub_depth_is_bounded() {
        let mut src = String::new();
        for n in (10..10 + GOSUB_STACK_DEPTH as i32 * 10 + 10).step_by(10) {
            src.push_str(&format!("{n} gosub {}\n", n + 10));
        }
        let (_, result) = run(&src);
        assert_eq!(result, Err(BasicError::GosubDepth));
    }

    #[test]
    fn return_without_gosub_is_reported() {
        let (_, result) = run("10 return\n");
        assert_eq!(result, Err(BasicError::ReturnWithoutGosub));
    }

    #[test]
    fn next_without_for_is_reported() {
        let (_, result) = run("10 next\n");
        assert_eq!(result, Err(BasicError::NextWithoutFor));
    }

    #[test]
    fn numeric_addition_wraps_on_overflow() {
        let (out, result) = run("10 print 2147483647+1\n");
        result.unwrap();
        assert_eq!(out, "-2147483648\n");
    }

    #[test]
    fn relational_operators_chain_left_associatively() {
        // (1 < 2) = 1, then 1 < 3 => 1
        let (out, result) = run("10 print 1<2<3\n");
        result.unwrap();
        assert_eq!(out, "1\n");
    }

    #[test]
    fn not_negates_the_whole_expression() {
        let (out, result) = run("10 print not 1=1\n");
        result.unwrap();
        assert_eq!(out, "0\n");
    }

    #[test]
    fn print_accepts_a_hex_literal() {
        let (out, result) = run("10 print #FF\n");
        result.unwrap();
        assert_eq!(out, "255\n");
    }

    #[test]
    fn print_unescapes_doubled_quotes_in_a_string_literal() {
        let (out, result) = run("10 print \"he said \"\"hi\"\"\"\n");
        result.unwrap();
        assert_eq!(out, "he said \"hi\"\n");
    }
}
