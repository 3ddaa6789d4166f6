//! Console rendering for status lines and the candidate message.
//!
//! In print-only mode every line written here goes to stderr, leaving stdout
//! for the final message alone so an editor integration can capture it.

use std::io::{self, Write};

use colored::Colorize;

/// Width of the rule drawn above and below a candidate message.
const RULE_WIDTH: usize = 40;

/// Standard stream a rendered line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Kind of output, which decides styling and stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Success,
    Warn,
    Error,
    Plain,
    /// A candidate message framed by rules.
    Message,
    /// The final message in print-only mode.
    Result,
}

/// One rendered line and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub stream: Stream,
    pub text: String,
}

/// Where human-facing output goes for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Console {
    print_only: bool,
}

impl Console {
    pub fn new(print_only: bool) -> Self {
        Self { print_only }
    }

    pub fn interactive() -> Self {
        Self::new(false)
    }

    pub fn print_only() -> Self {
        Self::new(true)
    }

    pub fn is_print_only(&self) -> bool {
        self.print_only
    }

    /// Stream for status lines, prompts' context and the framed message.
    pub fn status_stream(&self) -> Stream {
        if self.print_only {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }

    pub fn info(&self, message: &str) {
        self.show(Kind::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.show(Kind::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.show(Kind::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.show(Kind::Error, message);
    }

    /// Plain text, no styling.
    pub fn plain(&self, message: &str) {
        self.show(Kind::Plain, message);
    }

    /// Show a candidate commit message between two rules.
    pub fn message(&self, message: &str) {
        self.show(Kind::Message, message);
    }

    /// Write the accepted message to stdout, unstyled.
    ///
    /// Unlike status output, a failed write is returned to the caller.
    pub fn emit_result(&self, message: &str) -> io::Result<()> {
        self.write(&self.render(Kind::Result, message))
    }

    /// Lines produced for `message` rendered as `kind`.
    pub fn render(&self, kind: Kind, message: &str) -> Vec<Line> {
        let status = |text: String| Line {
            stream: self.status_stream(),
            text,
        };

        match kind {
            Kind::Info => vec![status(message.cyan().dimmed().to_string())],
            Kind::Success => vec![status(message.green().bold().to_string())],
            Kind::Warn => vec![status(message.yellow().to_string())],
            Kind::Error => vec![status(format!("{} {}", "Error:".red().bold(), message))],
            Kind::Plain => vec![status(message.to_string())],
            Kind::Message => {
                let rule = "-".repeat(RULE_WIDTH).dimmed().to_string();
                vec![
                    status(String::new()),
                    status("Generated Commit Message:".bold().to_string()),
                    status(rule.clone()),
                    status(message.to_string()),
                    status(rule),
                    status(String::new()),
                ]
            }
            Kind::Result => vec![Line {
                stream: Stream::Stdout,
                text: message.to_string(),
            }],
        }
    }

    fn show(&self, kind: Kind, message: &str) {
        // Status output is best effort
        let _ = self.write(&self.render(kind, message));
    }

    fn write(&self, lines: &[Line]) -> io::Result<()> {
        write_lines(lines, &mut io::stdout().lock(), &mut io::stderr().lock())
    }
}

/// Write each line to `out` or `err` according to its stream.
pub fn write_lines<O: Write, E: Write>(lines: &[Line], out: &mut O, err: &mut E) -> io::Result<()> {
    for line in lines {
        match line.stream {
            Stream::Stdout => writeln!(out, "{}", line.text)?,
            Stream::Stderr => writeln!(err, "{}", line.text)?,
        }
    }
    out.flush()?;
    err.flush()
}
