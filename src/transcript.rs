// Transcript sink shared by every demo. A demo only ever emits
// `<tag>: <payload>` lines; the harness adds the banner and trailing blank.

use std::fmt::Display;
use std::io::{self, Write};

pub struct Transcript<'a> {
    out: &'a mut dyn Write,
    lines: usize,
}

impl<'a> Transcript<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, lines: 0 }
    }

    /// Writes one `tag: payload` line.
    pub fn line(&mut self, tag: &str, payload: impl Display) -> io::Result<()> {
        debug_assert!(!tag.is_empty() && !tag.contains(':'), "bad tag {tag:?}");
        writeln!(self.out, "{tag}: {payload}")?;
        self.lines += 1;
        Ok(())
    }

    /// Shorthand for boolean checks, rendered as `true`/`false`.
    pub fn check(&mut self, tag: &str, value: bool) -> io::Result<()> {
        self.line(tag, value)
    }

    pub fn lines(&self) -> usize {
        self.lines
    }
}

/// Signature every demo entry point implements.
pub type DemoFn = fn(&mut Transcript<'_>) -> io::Result<()>;

/// Runs a demo against an in-memory buffer and returns its lines as text.
pub fn capture(demo: DemoFn) -> io::Result<String> {
    let mut buffer = Vec::new();
    {
        let mut transcript = Transcript::new(&mut buffer);
        demo(&mut transcript)?;
    }
    String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
