//! Formatting of rendered Python source.
//!
//! Every generated module passes through a [`Formatter`] before it is
//! returned. Two implementations exist:
//!
//! - [`LayoutFormatter`] - In-process. Checks that strings terminate and
//!   brackets balance, then normalizes blank lines and trailing whitespace
//!   the way black lays out module-level code.
//! - [`CommandFormatter`] - Pipes the source through an external program
//!   such as `black` or `ruff`.
//!
//! Errors propagate unchanged; no partial output is ever returned.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::FormatterKind;
use crate::errors::FormatError;

/// A source-to-source formatting pass.
pub trait Formatter: Send + Sync {
    /// Formats `source`, or fails without producing output.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Builds the formatter selected in the options.
pub fn formatter_for(kind: &FormatterKind) -> Box<dyn Formatter> {
    match kind {
        FormatterKind::Builtin => Box::new(LayoutFormatter),
        FormatterKind::Black => Box::new(CommandFormatter::black()),
        FormatterKind::Ruff => Box::new(CommandFormatter::ruff()),
        FormatterKind::Command(argv) => {
            let (program, args) = argv.split_first().map_or(("", &[][..]), |(p, a)| (p.as_str(), a));
            Box::new(CommandFormatter::new(program, args.iter().cloned()))
        }
    }
}

/// In-process layout normalizer.
///
/// ## Examples
///
/// ```
/// use pydantic_gen::format::{Formatter, LayoutFormatter};
///
/// let messy = "import x   \n\n\n\n\nclass A(Base):\n\n    id: int\n";
/// let tidy = LayoutFormatter.format(messy).unwrap();
/// assert_eq!(tidy, "import x\n\n\nclass A(Base):\n    id: int\n");
///
/// assert!(LayoutFormatter.format("x: List[int = [1, 2]\n").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutFormatter;

impl Formatter for LayoutFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        check_structure(source)?;
        Ok(normalize_layout(source))
    }
}

/// Checks that string literals terminate and brackets balance.
fn check_structure(source: &str) -> Result<(), FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\n' => line += 1,
            '#' => {
                while i + 1 < chars.len() && chars[i + 1] != '\n' {
                    i += 1;
                }
            }
            '"' | '\'' => i = skip_string(&chars, i, &mut line)?,
            c @ ('(' | '[' | '{') => open.push((c, line)),
            c @ (')' | ']' | '}') => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match open.pop() {
                    Some((opener, _)) if opener == expected => {}
                    Some((opener, opened_at)) => {
                        return Err(FormatError::InvalidSource {
                            line,
                            message: format!(
                                "closing '{c}' does not match '{opener}' opened on line {opened_at}"
                            ),
                        });
                    }
                    None => {
                        return Err(FormatError::InvalidSource {
                            line,
                            message: format!("unmatched closing '{c}'"),
                        });
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    match open.pop() {
        Some((opener, opened_at)) => Err(FormatError::InvalidSource {
            line: opened_at,
            message: format!("'{opener}' is never closed"),
        }),
        None => Ok(()),
    }
}

/// Returns the index of the last character of the string literal starting
/// at `start`.
fn skip_string(chars: &[char], start: usize, line: &mut usize) -> Result<usize, FormatError> {
    let quote = chars[start];
    let started_on = *line;
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);
    let mut i = if triple { start + 3 } else { start + 1 };

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                if chars.get(i + 1) == Some(&'\n') {
                    *line += 1;
                }
                i += 2;
                continue;
            }
            '\n' if !triple => break,
            '\n' => *line += 1,
            c if c == quote => {
                if !triple {
                    return Ok(i);
                }
                if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                    return Ok(i + 2);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(FormatError::InvalidSource {
        line: started_on,
        message: "unterminated string literal".to_string(),
    })
}

fn normalize_layout(source: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut pending_blanks = 0usize;
    let mut after_opener = false;
    let mut after_decorator = false;
    let mut in_top_level_def = false;

    for raw in source.lines() {
        let line = raw.trim_end();
        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }

        let stripped = line.trim_start();
        let top_level = stripped.len() == line.len();
        let is_def = is_definition(stripped);

        let blanks = if out.is_empty() || after_opener || after_decorator {
            0
        } else if top_level && (is_def || in_top_level_def) {
            2
        } else if is_def {
            1
        } else if top_level {
            pending_blanks.min(2)
        } else {
            pending_blanks.min(1)
        };

        out.extend(std::iter::repeat_n("", blanks));
        out.push(line);

        pending_blanks = 0;
        after_opener = line.ends_with(':') && !stripped.starts_with('#');
        after_decorator = stripped.starts_with('@');
        if top_level {
            in_top_level_def = is_def;
        }
    }

    if out.is_empty() {
        return String::new();
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn is_definition(stripped: &str) -> bool {
    stripped.starts_with("class ")
        || stripped.starts_with("def ")
        || stripped.starts_with("async def ")
        || stripped.starts_with('@')
}

/// Formats by piping source through an external program.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// `black -q -`
    pub fn black() -> Self {
        Self::new("black", ["-q".to_string(), "-".to_string()])
    }

    /// `ruff format -`
    pub fn ruff() -> Self {
        Self::new("ruff", ["format".to_string(), "-".to_string()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let program = which::which(&self.program)
            .map_err(|_| FormatError::ProgramNotFound(self.program.clone()))?;
        debug!(program = %program.display(), args = ?self.args, "Running external formatter");

        let io_error = |source| FormatError::Io {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A formatter that exits early closes the pipe; its exit status
            // is what gets reported.
            match stdin.write_all(source.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(io_error(e)),
                _ => {}
            }
        }

        let output = child.wait_with_output().map_err(io_error)?;
        if !output.status.success() {
            return Err(FormatError::Command {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| FormatError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}
