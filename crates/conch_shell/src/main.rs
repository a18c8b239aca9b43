//! conch: a small interactive shell with a typed command language.
//!
//! Each line read from the prompt is one submission: it is lexed, parsed,
//! bound and interpreted to completion before the next prompt is shown.
//! Any diagnostic suppresses interpretation of that submission; the binder
//! and interpreter live for the whole session, so declarations accumulate
//! across submissions.

mod builtins;
mod error;
mod platform;

use builtins::Builtins;
use clap::Parser as ClapParser;
use conch_binder::Binder;
use conch_core::text::LineMap;
use conch_diagnostics::{Diagnostic, DiagnosticCollection};
use conch_interp::Interpreter;
use error::ShellError;
use platform::Platform;
use std::io::{self, BufRead, Write};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "conch", about = "conch - an interactive shell with a typed command language", disable_version_flag = true)]
struct Cli {
    /// Run a single command line and exit.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Disable ANSI colors in prompts and diagnostics.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Print the shell version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("conch {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("conch: {}", error);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32, ShellError> {
    let platform = Platform::detect()?;
    let use_color = !cli.no_color && stdout_is_terminal();
    let mut shell = Shell::new(platform, use_color);

    if let Some(ref command) = cli.command {
        let clean = shell.submit(command);
        return Ok(if clean { 0 } else { 1 });
    }

    shell.repl()?;
    Ok(0)
}

/// One interactive session.
struct Shell {
    platform: Platform,
    binder: Binder,
    interpreter: Interpreter,
    builtins: Builtins,
    use_color: bool,
}

impl Shell {
    fn new(platform: Platform, use_color: bool) -> Self {
        Self {
            platform,
            binder: Binder::new(),
            interpreter: Interpreter::new(),
            builtins: Builtins,
            use_color,
        }
    }

    /// The blocking read loop. Ends at end of input.
    fn repl(&mut self) -> Result<(), ShellError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            self.print_prompt()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            self.submit(&line);
        }
        Ok(())
    }

    /// Run one submission through the pipeline. Returns whether it was
    /// completely clean.
    fn submit(&mut self, line: &str) -> bool {
        let (program, diagnostics) = self.binder.bind_source("<stdin>", line);
        if !diagnostics.is_empty() {
            self.print_diagnostics(line, &diagnostics);
            return false;
        }

        let program = match program {
            Some(program) => program,
            None => return false,
        };

        let runtime_diagnostics =
            self.interpreter
                .interpret("<stdin>", &program, &mut self.builtins);
        if !runtime_diagnostics.is_empty() {
            self.print_diagnostics(line, &runtime_diagnostics);
            return false;
        }
        true
    }

    fn print_prompt(&self) -> Result<(), ShellError> {
        let mut stdout = io::stdout().lock();

        let cwd = std::env::current_dir().unwrap_or_else(|_| "?".into());
        let location = self.platform.translate_path(&cwd);
        let mark = if self.platform.is_admin { "# " } else { "$ " };

        if self.use_color {
            write!(
                stdout,
                "{}{}@{}{}:{}{}{}{}",
                GREEN, self.platform.username, self.platform.hostname, RESET, BLUE, location, RESET, mark
            )?;
        } else {
            write!(
                stdout,
                "{}@{}:{}{}",
                self.platform.username, self.platform.hostname, location, mark
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn print_diagnostics(&self, line: &str, diagnostics: &DiagnosticCollection) {
        let line_map = LineMap::new(line);
        for diagnostic in diagnostics {
            self.print_diagnostic(&line_map, diagnostic);
        }
    }

    fn print_diagnostic(&self, line_map: &LineMap, diagnostic: &Diagnostic) {
        let position = line_map.line_and_column_of(diagnostic.span.start);
        let text = format!(
            "{}:({}:{}) {}: {}",
            diagnostic.file,
            position.line + 1,
            position.column + 1,
            diagnostic.kind,
            diagnostic.message
        );

        if self.use_color {
            eprintln!("{}{}{}", RED, text, RESET);
        } else {
            eprintln!("{}", text);
        }
    }
}

fn stdout_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(1) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
