// Command: edits to a document are objects. The editor keeps them on undo
// and redo stacks and can replay the recorded sequence onto a fresh copy.

use std::io;

use crate::transcript::Transcript;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Largest char boundary in `text` at or before `at`.
fn floor_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

pub trait Command {
    fn execute(&mut self, doc: &mut Document) -> String;
    /// `None` if the command cannot be reversed.
    fn undo(&mut self, doc: &mut Document) -> Option<String>;
    fn clone_box(&self) -> Box<dyn Command>;
}

#[derive(Clone)]
pub struct Insert {
    at: usize,
    text: String,
}

impl Insert {
    pub fn new(at: usize, text: &str) -> Self {
        Self {
            at,
            text: text.to_string(),
        }
    }
}

impl Command for Insert {
    fn execute(&mut self, doc: &mut Document) -> String {
        let at = floor_boundary(&doc.text, self.at);
        self.at = at;
        doc.text.insert_str(at, &self.text);
        format!("insert {:?} at {at}", self.text)
    }

    fn undo(&mut self, doc: &mut Document) -> Option<String> {
        let at = floor_boundary(&doc.text, self.at);
        let end = floor_boundary(&doc.text, at.saturating_add(self.text.len()));
        doc.text.replace_range(at..end, "");
        Some(format!("remove {:?} from {at}", self.text))
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
pub struct Delete {
    at: usize,
    len: usize,
    removed: String,
}

impl Delete {
    pub fn new(at: usize, len: usize) -> Self {
        Self {
            at,
            len,
            removed: String::new(),
        }
    }
}

impl Command for Delete {
    fn execute(&mut self, doc: &mut Document) -> String {
        let at = floor_boundary(&doc.text, self.at);
        let end = floor_boundary(&doc.text, at.saturating_add(self.len));
        self.at = at;
        self.removed = doc.text[at..end].to_string();
        doc.text.replace_range(at..end, "");
        format!("delete {:?} at {at}", self.removed)
    }

    fn undo(&mut self, doc: &mut Document) -> Option<String> {
        let at = floor_boundary(&doc.text, self.at);
        doc.text.insert_str(at, &self.removed);
        Some(format!("restore {:?} at {at}", self.removed))
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(Delete::new(self.at, self.len))
    }
}

/// Side effect only; nothing to reverse.
#[derive(Clone)]
pub struct Print;

impl Command for Print {
    fn execute(&mut self, doc: &mut Document) -> String {
        format!("print {:?}", doc.text)
    }

    fn undo(&mut self, _doc: &mut Document) -> Option<String> {
        None
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(Print)
    }
}

/// Invoker.
#[derive(Default)]
pub struct Editor {
    document: Document,
    done: Vec<Box<dyn Command>>,
    undone: Vec<Box<dyn Command>>,
    recorded: Vec<Box<dyn Command>>,
}

impl Editor {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn execute(&mut self, mut command: Box<dyn Command>) -> String {
        self.recorded.push(command.clone_box());
        let report = command.execute(&mut self.document);
        self.done.push(command);
        self.undone.clear();
        report
    }

    /// Pops the most recent command. Irreversible ones are dropped from the
    /// stack and reported as skipped.
    pub fn undo(&mut self) -> Option<String> {
        let mut command = self.done.pop()?;
        match command.undo(&mut self.document) {
            Some(report) => {
                self.undone.push(command);
                Some(report)
            }
            None => Some("skip irreversible command".to_string()),
        }
    }

    pub fn redo(&mut self) -> Option<String> {
        let mut command = self.undone.pop()?;
        let report = command.execute(&mut self.document);
        self.done.push(command);
        Some(report)
    }

    /// Runs every command executed so far, in order, against `target`.
    pub fn replay(&self, target: &mut Document) -> Vec<String> {
        self.recorded
            .iter()
            .map(|command| command.clone_box().execute(target))
            .collect()
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut editor = Editor::default();
    let script: Vec<Box<dyn Command>> = vec![
        Box::new(Insert::new(0, "Hello")),
        Box::new(Insert::new(5, " World")),
        Box::new(Print),
        Box::new(Delete::new(5, 6)),
        Box::new(Insert::new(5, ", Rust")),
    ];
    for command in script {
        out.line("do", editor.execute(command))?;
    }
    out.line("document", editor.document().text())?;

    let before_undo = editor.document().clone();
    while let Some(report) = editor.undo() {
        out.line("undo", report)?;
    }
    out.line("document", format!("{:?}", editor.document().text()))?;

    for _ in 0..2 {
        if let Some(report) = editor.redo() {
            out.line("redo", report)?;
        }
    }
    out.line("document", editor.document().text())?;

    let mut fresh = Document::default();
    for report in editor.replay(&mut fresh) {
        out.line("replay", report)?;
    }
    out.check("replay-matches", fresh == before_undo)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_do_undo_is_identity() {
        let mut doc = Document::default();
        doc.text.push_str("abcdef");
        let original = doc.clone();
        let mut insert = Insert::new(3, "XYZ");
        insert.execute(&mut doc);
        insert.undo(&mut doc);
        assert_eq!(doc, original);

        let mut delete = Delete::new(1, 2);
        delete.execute(&mut doc);
        assert_eq!(doc.text(), "adef");
        delete.undo(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_offsets_inside_a_character() {
        let mut doc = Document::default();
        doc.text.push_str("héllo wörld");
        let original = doc.clone();

        // Byte 2 sits inside 'é'; the insert lands before it.
        let mut insert = Insert::new(2, "-");
        assert_eq!(insert.execute(&mut doc), "insert \"-\" at 1");
        assert_eq!(doc.text(), "h-éllo wörld");
        insert.undo(&mut doc);
        assert_eq!(doc, original);

        // Both ends fall inside a character.
        let mut delete = Delete::new(2, 8);
        assert_eq!(delete.execute(&mut doc), "delete \"éllo w\" at 1");
        assert_eq!(doc.text(), "hörld");
        delete.undo(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_insert_past_end_undoes_cleanly() {
        let mut doc = Document::default();
        doc.text.push_str("ab");
        let mut insert = Insert::new(10, "cd");
        insert.execute(&mut doc);
        assert_eq!(doc.text(), "abcd");
        insert.undo(&mut doc);
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_undo_runs_in_reverse() {
        let mut editor = Editor::default();
        editor.execute(Box::new(Insert::new(0, "a")));
        editor.execute(Box::new(Insert::new(1, "b")));
        assert_eq!(editor.undo().as_deref(), Some("remove \"b\" from 1"));
        assert_eq!(editor.undo().as_deref(), Some("remove \"a\" from 0"));
        assert_eq!(editor.undo(), None);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut editor = Editor::default();
        editor.execute(Box::new(Insert::new(0, "a")));
        editor.undo();
        editor.execute(Box::new(Insert::new(0, "b")));
        assert_eq!(editor.redo(), None);
        assert_eq!(editor.document().text(), "b");
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("document: Hello, Rust\n"));
        assert!(text.contains("undo: skip irreversible command\n"));
        assert!(text.contains("document: \"\"\n"));
        assert!(text.contains("document: Hello World\n"));
        assert!(text.ends_with("replay-matches: true\n"));
    }
}
