// Iterator: external traversal of a playlist, a stepped range and a binary
// search tree without exposing how each stores its elements.

use std::io;

use itertools::Itertools;

use crate::transcript::Transcript;

// ============================================================================
// Example: Snapshot iterator over a playlist
// ============================================================================

#[derive(Debug, Default)]
pub struct Playlist {
    songs: Vec<String>,
}

impl Playlist {
    pub fn add(&mut self, title: &str) {
        self.songs.push(title.to_string());
    }

    /// The iterator owns a copy of the titles taken now; later edits to the
    /// playlist are not seen by it.
    pub fn iter(&self) -> PlaylistIter {
        PlaylistIter {
            snapshot: self.songs.clone(),
            next: 0,
        }
    }
}

pub struct PlaylistIter {
    snapshot: Vec<String>,
    next: usize,
}

impl Iterator for PlaylistIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let song = self.snapshot.get(self.next)?.clone();
        self.next += 1;
        Some(song)
    }
}

// ============================================================================
// Example: Stepped range
// ============================================================================

/// Half-open `[start, end)` walked in `step` increments.
pub struct NumberRange {
    current: i32,
    end: i32,
    step: i32,
}

impl NumberRange {
    pub fn new(start: i32, end: i32, step: i32) -> Self {
        Self {
            current: start,
            end,
            step: step.max(1),
        }
    }
}

impl Iterator for NumberRange {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.current >= self.end {
            return None;
        }
        let value = self.current;
        self.current = self.current.saturating_add(self.step);
        Some(value)
    }
}

// ============================================================================
// Example: In-order traversal of a binary search tree
// ============================================================================

#[derive(Debug)]
struct Node {
    value: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

#[derive(Debug, Default)]
pub struct SearchTree {
    root: Option<Box<Node>>,
}

impl SearchTree {
    pub fn insert(&mut self, value: i32) {
        fn insert_into(slot: &mut Option<Box<Node>>, value: i32) {
            match slot {
                Some(node) if value < node.value => insert_into(&mut node.left, value),
                Some(node) => insert_into(&mut node.right, value),
                None => {
                    *slot = Some(Box::new(Node {
                        value,
                        left: None,
                        right: None,
                    }))
                }
            }
        }
        insert_into(&mut self.root, value);
    }

    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }
}

/// Explicit stack instead of recursion, so traversal can pause between items.
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(node.value)
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut playlist = Playlist::default();
    for title in ["Intro", "Verse", "Chorus", "Outro"] {
        playlist.add(title);
    }

    let mut first = playlist.iter();
    let mut second = playlist.iter();
    let a1 = first.next().unwrap_or_default();
    let a2 = first.next().unwrap_or_default();
    let b1 = second.next().unwrap_or_default();
    out.line("first", format!("{a1}, {a2}"))?;
    out.line("second", b1)?;
    out.line("first.rest", first.join(", "))?;
    out.line("second.rest", second.by_ref().join(", "))?;
    out.check("second.exhausted", second.next().is_none())?;

    let snapshot = playlist.iter();
    playlist.add("Encore");
    out.line("snapshot", snapshot.count())?;
    out.line("playlist", playlist.iter().count())?;

    out.line("range", NumberRange::new(1, 10, 2).join(" "))?;

    let mut tree = SearchTree::default();
    for value in [4, 2, 6, 1, 3, 5, 7] {
        tree.insert(value);
    }
    out.line("in-order", tree.in_order().join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_visits_each_once() {
        let mut playlist = Playlist::default();
        playlist.add("a");
        playlist.add("b");
        let items: Vec<_> = playlist.iter().collect();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_iterators_are_independent() {
        let mut playlist = Playlist::default();
        playlist.add("a");
        playlist.add("b");
        let mut x = playlist.iter();
        let mut y = playlist.iter();
        x.next();
        assert_eq!(y.next().as_deref(), Some("a"));
        assert_eq!(x.next().as_deref(), Some("b"));
    }

    #[test]
    fn test_range_is_half_open() {
        assert_eq!(NumberRange::new(1, 10, 2).collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
        assert_eq!(NumberRange::new(5, 5, 1).count(), 0);
    }

    #[test]
    fn test_in_order_is_sorted() {
        let mut tree = SearchTree::default();
        for value in [8, 3, 10, 1, 6, 14, 4] {
            tree.insert(value);
        }
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![1, 3, 4, 6, 8, 10, 14]);
        assert_eq!(SearchTree::default().in_order().count(), 0);
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("first: Intro, Verse\nsecond: Intro\n"));
        assert!(text.contains("first.rest: Chorus, Outro\n"));
        assert!(text.contains("snapshot: 4\nplaylist: 5\n"));
        assert!(text.contains("range: 1 3 5 7 9\n"));
        assert!(text.ends_with("in-order: 1 2 3 4 5 6 7\n"));
    }
}
