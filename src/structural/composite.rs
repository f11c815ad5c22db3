// Composite: files and folders share one interface, so sizing or listing a
// whole tree is a single call on its root.

use std::io;

use crate::transcript::Transcript;

pub trait FileSystemItem {
    fn name(&self) -> &str;
    fn size_kb(&self) -> u32;
    /// Pre-order walk: the item itself, then its children in insertion order.
    fn walk(&self, parent: &str, visited: &mut Vec<String>);
}

pub struct File {
    name: String,
    size_kb: u32,
}

impl File {
    pub fn new(name: &str, size_kb: u32) -> Self {
        Self {
            name: name.to_string(),
            size_kb,
        }
    }
}

impl FileSystemItem for File {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_kb(&self) -> u32 {
        self.size_kb
    }

    fn walk(&self, parent: &str, visited: &mut Vec<String>) {
        visited.push(format!("{parent}{} ({}KB)", self.name, self.size_kb));
    }
}

pub struct Folder {
    name: String,
    children: Vec<Box<dyn FileSystemItem>>,
}

impl Folder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with(mut self, child: impl FileSystemItem + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FileSystemItem for Folder {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_kb(&self) -> u32 {
        self.children.iter().map(|child| child.size_kb()).sum()
    }

    fn walk(&self, parent: &str, visited: &mut Vec<String>) {
        let path = format!("{parent}{}/", self.name);
        visited.push(format!("{path} ({}KB total)", self.size_kb()));
        for child in &self.children {
            child.walk(&path, visited);
        }
    }
}

fn sample_tree() -> Folder {
    let src = Folder::new("src")
        .with(File::new("main.rs", 15))
        .with(File::new("utils.rs", 8))
        .with(File::new("utils_test.rs", 3));
    let docs = Folder::new("docs")
        .with(File::new("README.md", 5))
        .with(File::new("API.md", 12));
    Folder::new("root")
        .with(src)
        .with(docs)
        .with(Folder::new("empty"))
        .with(File::new("Cargo.toml", 2))
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let root = sample_tree();
    let mut visited = Vec::new();
    root.walk("", &mut visited);
    for entry in &visited {
        out.line("visit", entry)?;
    }

    // Same call on a leaf.
    let leaf = File::new("notes.txt", 1);
    let mut single = Vec::new();
    leaf.walk("", &mut single);
    out.line("leaf", single.join(""))?;

    out.line("total-kb", root.size_kb())?;
    out.line("visited", visited.len())?;
    Ok(())
}
