//! Desktop entry point: wires a `StdioHost` to the library's Command
//! Layer and drives the `"> "` read-eval loop, mirroring the teacher's
//! `basic64` binary's role of owning terminal setup and the event loop
//! while the library stays host-agnostic.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use nanobasic::host::StdioHost;
use nanobasic::{process_line, LineOutcome, Session};

/// nanobasic: a tiny interactive BASIC interpreter.
#[derive(ClapParser, Debug)]
#[command(name = "nanobasic", version, about)]
struct Cli {
    /// Path used for the SAVE/LOAD command's single save slot.
    #[arg(long, default_value = "nanobasic.prg")]
    save_file: PathBuf,

    /// Load this program file and run it immediately, non-interactively.
    #[arg(long)]
    run: Option<PathBuf>,

    /// Record a JSON execution trace (line, statement, variables, output
    /// for every statement run) to this path, and print a summary on exit.
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut host = StdioHost::new(cli.save_file);
    let mut session = Session::new();
    if cli.trace.is_some() {
        session.enable_tracing();
    }

    if let Some(path) = cli.run {
        let text = std::fs::read_to_string(&path)?;
        for line in text.lines() {
            process_line(&mut session, &mut host, line);
        }
        let mut ev = nanobasic::Evaluator::new();
        let result = ev.run(
            &session.program,
            &mut session.vars,
            &mut host,
            session.tracer.as_mut(),
        );
        write_trace(&session, cli.trace.as_deref());
        if let Err(e) = result {
            eprint!("{e}, line: {}", ev.current_line());
            if !ev.last_lexeme().is_empty() {
                eprint!(" near: {}", ev.last_lexeme());
            }
            eprintln!();
            std::process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let line = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(_)) | None => break,
        };
        match process_line(&mut session, &mut host, &line) {
            LineOutcome::Continue => {}
            LineOutcome::Quit => break,
        }
    }
    write_trace(&session, cli.trace.as_deref());
    Ok(())
}

fn write_trace(session: &Session, path: Option<&std::path::Path>) {
    let (Some(tracer), Some(path)) = (&session.tracer, path) else {
        return;
    };
    tracer.print_summary();
    if let Some(path_str) = path.to_str() {
        if let Err(e) = tracer.save_to_json(path_str) {
            eprintln!("failed to write trace to {path_str}: {e}");
        }
    }
}
