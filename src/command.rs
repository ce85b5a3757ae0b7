//! The Command Layer: the thin dispatcher sitting between a line of input
//! and the Program Store / Evaluator. A line starting with a digit is a
//! program-store edit; a line starting with a letter or `?` is a command
//! or an immediate statement; GOTO and GOSUB are rejected immediately
//! since there is no running program to jump within.

use crate::config::MAX_LINE;
use crate::error::BasicError;
use crate::eval::Evaluator;
use crate::host::Host;
use crate::program::{Program, ProgramResult};
use crate::session::Session;
use crate::strings;

/// Outcome of one line processed by the Command Layer.
pub enum LineOutcome {
    /// Nothing more to do.
    Continue,
    /// QUIT was entered; the caller should stop its read loop.
    Quit,
}

/// Handle one line of input: program-store edit, command, or immediate
/// statement. Errors are reported to `host` directly (matching the
/// original's fire-and-forget `parser_emit_if_error`), never propagated,
/// since a REPL always wants to keep going after a bad line.
pub fn process_line(session: &mut Session, host: &mut dyn Host, line: &str) -> LineOutcome {
    if line.is_empty() {
        return LineOutcome::Continue;
    }

    let first = line.chars().next().unwrap();
    if first.is_alphabetic() || first == '?' {
        do_immediate(session, host, line)
    } else {
        match session.program.insert_line(line) {
            ProgramResult::BadLineNumber => {
                emit_error(host, BasicError::BadLineNumber, 0, "");
            }
            ProgramResult::LineDeleted => {
                host.output_str("Line deleted");
                host.output_eol();
            }
            ProgramResult::Unchanged
            | ProgramResult::LineReplaced
            | ProgramResult::LineAppended
            | ProgramResult::LineInserted => {}
        }
        LineOutcome::Continue
    }
}

fn do_immediate(session: &mut Session, host: &mut dyn Host, line: &str) -> LineOutcome {
    let mut words = line.split_whitespace();
    let cmd = match words.next() {
        Some(w) => w,
        None => return LineOutcome::Continue,
    };
    let args: Vec<&str> = words.collect();

    if cmd.eq_ignore_ascii_case(strings::CMD_RUN) {
        let mut ev = Evaluator::new();
        let result = ev.run(
            &session.program,
            &mut session.vars,
            host,
            session.tracer.as_mut(),
        );
        if let Err(e) = result {
            emit_error(host, e, ev.current_line(), ev.last_lexeme());
        }
    } else if cmd.eq_ignore_ascii_case(strings::CMD_LIST) {
        list_program(session, host, &args);
    } else if cmd.eq_ignore_ascii_case(strings::CMD_QUIT) {
        return LineOutcome::Quit;
    } else if cmd.eq_ignore_ascii_case(strings::CMD_SAVE) {
        if let Err(e) = host.persist_save(&session.program) {
            emit_error(host, e, 0, "");
        }
    } else if cmd.eq_ignore_ascii_case(strings::CMD_LOAD) {
        if let Err(e) = host.persist_load(&mut session.program) {
            emit_error(host, e, 0, "");
        }
    } else if cmd.eq_ignore_ascii_case(strings::CMD_INFO) {
        show_info(session, host);
    } else if cmd.eq_ignore_ascii_case(strings::CMD_NEW) {
        session.program.clear();
    } else if cmd.eq_ignore_ascii_case(strings::CMD_HELP) {
        show_help(host);
    } else if cmd.eq_ignore_ascii_case(strings::CMD_CLEAR) {
        session.vars.clear();
    } else if cmd.eq_ignore_ascii_case("goto") || cmd.eq_ignore_ascii_case("gosub") {
        emit_error(host, BasicError::UnsupImmediate, 0, "");
    } else {
        let mut padded = String::with_capacity(line.len() + 1);
        padded.push_str(line);
        padded.push('\n');
        let mut ev = Evaluator::new();
        let result = ev.run_line(&padded, &mut session.vars, host, session.tracer.as_mut());
        if let Err(e) = result {
            emit_error(host, e, ev.current_line(), ev.last_lexeme());
        }
    }
    LineOutcome::Continue
}

fn list_program(session: &Session, host: &mut dyn Host, args: &[&str]) {
    let from = args
        .first()
        .and_then(|a| Program::parse_line_number(a))
        .map(|(n, _)| n)
        .unwrap_or(0);
    let count = args
        .get(1)
        .and_then(|a| Program::parse_line_number(a))
        .map(|(n, _)| n)
        .unwrap_or(0);

    let mut printed = 0i32;
    session.program.iterate_lines(|n, text| {
        if n >= from && (printed < count || count == 0) {
            host.output_str(&text[..text.len().min(MAX_LINE)]);
            host.output_eol();
            printed += 1;
        }
        true
    });
}

fn show_info(session: &Session, host: &mut dyn Host) {
    host.output_str(strings::VERSION);
    host.output_eol();
    host.output_str("Program size: ");
    host.output_int(session.program.length() as i32);
    host.output_str(" bytes");
    host.output_eol();
    for line in host.info() {
        host.output_str(&line);
        host.output_eol();
    }
}

fn show_help(host: &mut dyn Host) {
    for line in strings::HELP_LINES {
        host.output_str(line);
        host.output_eol();
    }
}

/// Format and emit an error exactly as `parser_emit_if_error` does:
/// `"<message>, line: <n>"`, plus `" near: <word>"` when a lexeme is
/// available.
pub fn emit_error(host: &mut dyn Host, error: BasicError, line: i32, near: &str) {
    host.output_str(&error.to_string());
    host.output_str(", line: ");
    host.output_int(line);
    if !near.is_empty() {
        host.output_str(" near: ");
        host.output_str(near);
    }
    host.output_eol();
}
