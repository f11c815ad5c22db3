// Harness: runs one demo or the whole catalog in canonical order, each
// transcript framed by `=== <id> ===` and a trailing blank line.

use std::io::Write;

use tracing::{debug, warn};

use crate::error::{HarnessError, Result};
use crate::registry::{PatternEntry, Registry};
use crate::transcript::Transcript;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    All,
    List,
    One(String),
}

impl Mode {
    /// Parses the arguments after the program name.
    pub fn from_args<I>(args: I) -> Result<Mode>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(Mode::All),
            [arg] if arg == "list" => Ok(Mode::List),
            [arg] => Ok(Mode::One(arg.clone())),
            _ => Err(HarnessError::Usage { args }),
        }
    }
}

pub struct Harness {
    registry: Registry,
}

impl Harness {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Harness over the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Registry::builtin()?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn execute(&self, mode: &Mode, out: &mut dyn Write) -> Result<()> {
        match mode {
            Mode::All => self.run_all(out),
            Mode::List => self.list(out),
            Mode::One(id) => self.run_one(id, out),
        }
    }

    /// Looks `id` up before writing anything, so a miss leaves `out` empty.
    pub fn run_one(&self, id: &str, out: &mut dyn Write) -> Result<()> {
        let entry = self
            .registry
            .get(id)
            .ok_or_else(|| HarnessError::unknown_pattern(id))?;
        run_entry(entry, out)
    }

    pub fn run_all(&self, out: &mut dyn Write) -> Result<()> {
        for entry in self.registry.entries() {
            run_entry(entry, out)?;
        }
        Ok(())
    }

    /// Prints the canonical order, one id per line.
    pub fn list(&self, out: &mut dyn Write) -> Result<()> {
        for id in self.registry.ids() {
            writeln!(out, "{id}")?;
        }
        Ok(())
    }

    /// Framed transcript of one demo as a string.
    pub fn render_one(&self, id: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.run_one(id, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn run_entry(entry: &PatternEntry, out: &mut dyn Write) -> Result<()> {
    debug!(id = %entry.id, family = %entry.family, "running demo");
    writeln!(out, "=== {} ===", entry.id)?;

    let lines = {
        let mut transcript = Transcript::new(out);
        (entry.demo)(&mut transcript)?;
        transcript.lines()
    };
    if lines == 0 {
        warn!(id = %entry.id, "demo produced an empty transcript");
    }

    writeln!(out)?;
    debug!(id = %entry.id, lines, "demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn harness() -> Harness {
        Harness::builtin().expect("builtin catalog is valid")
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Sink that rejects every write, like a full disk.
    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(Mode::from_args(args(&[])).unwrap(), Mode::All);
        assert_eq!(Mode::from_args(args(&["list"])).unwrap(), Mode::List);
        assert_eq!(
            Mode::from_args(args(&["observer"])).unwrap(),
            Mode::One("observer".to_string())
        );
        let err = Mode::from_args(args(&["observer", "state"])).unwrap_err();
        assert!(matches!(err, HarnessError::Usage { .. }));
    }

    #[test]
    fn test_every_demo_is_framed_and_non_empty() {
        let harness = harness();
        for id in harness.registry().ids() {
            let text = harness.render_one(id).unwrap();
            let banner = format!("=== {id} ===\n");
            assert!(text.starts_with(&banner), "{id} lacks its banner");
            assert!(text.ends_with("\n\n"), "{id} lacks the trailing blank line");
            assert!(text.len() > banner.len() + 1, "{id} is empty");
        }
    }

    #[test]
    fn test_demo_lines_are_tagged() {
        let harness = harness();
        for id in harness.registry().ids() {
            let text = harness.render_one(id).unwrap();
            let body = text.lines().skip(1).filter(|line| !line.is_empty());
            for line in body {
                let (tag, _) = line
                    .split_once(": ")
                    .unwrap_or_else(|| panic!("{id}: untagged line {line:?}"));
                assert!(!tag.is_empty() && !tag.contains(' '), "{id}: bad tag in {line:?}");
            }
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let harness = harness();
        for id in harness.registry().ids() {
            let first = harness.render_one(id).unwrap();
            let second = harness.render_one(id).unwrap();
            assert_eq!(first, second, "{id} is not deterministic");
        }
    }

    #[test]
    fn test_run_all_is_concatenation() {
        let harness = harness();
        let mut all = Vec::new();
        harness.run_all(&mut all).unwrap();

        let expected: String = harness
            .registry()
            .ids()
            .map(|id| harness.render_one(id).unwrap())
            .collect();
        assert_eq!(String::from_utf8(all).unwrap(), expected);
    }

    #[test]
    fn test_unknown_pattern_writes_nothing() {
        let harness = harness();
        let mut out = Vec::new();
        let err = harness.run_one("unknown-id", &mut out).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownPattern { ref id } if id == "unknown-id"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let harness = harness();
        for mode in [Mode::All, Mode::List, Mode::One("observer".to_string())] {
            let err = harness.execute(&mode, &mut FullWriter).unwrap_err();
            assert!(matches!(err, HarnessError::Io(_)), "{mode:?} gave {err:?}");
            assert_eq!(err.exit_code(), 2);
            assert!(err.to_string().starts_with("failed to write output"));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let harness = harness();
        assert!(harness.render_one("Singleton").is_err());
    }

    #[test]
    fn test_list_mode() {
        let harness = harness();
        let mut out = Vec::new();
        harness.execute(&Mode::List, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let listed: Vec<&str> = text.lines().collect();
        let ids: Vec<&str> = harness.registry().ids().collect();
        assert_eq!(listed, ids);
        assert_eq!(listed.len(), 23);
    }
}
