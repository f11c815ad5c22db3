// Memento: a game character hands out opaque snapshots of itself; a save
// manager stores them in named slots and hands them back for restoring.

use std::io;

use indexmap::IndexMap;

use crate::transcript::Transcript;

/// Originator.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    name: String,
    level: u32,
    health: u32,
    location: String,
}

/// Snapshot of a character. Fields are private to this module, so callers
/// can hold and pass mementos but never read or edit them.
#[derive(Debug, Clone)]
pub struct Memento {
    state: Character,
}

impl Character {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            health: 100,
            location: "village".to_string(),
        }
    }

    pub fn travel(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub fn fight(&mut self, damage: u32, xp_levels: u32) {
        self.health = self.health.saturating_sub(damage);
        self.level += xp_levels;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn save(&self) -> Memento {
        Memento {
            state: self.clone(),
        }
    }

    pub fn restore(&mut self, memento: &Memento) {
        *self = memento.state.clone();
    }

    pub fn status(&self) -> String {
        format!(
            "{} lv{} hp{} at {}",
            self.name, self.level, self.health, self.location
        )
    }
}

/// Caretaker.
#[derive(Debug, Default)]
pub struct SaveManager {
    slots: IndexMap<String, Memento>,
}

impl SaveManager {
    pub fn store(&mut self, slot: &str, memento: Memento) {
        self.slots.insert(slot.to_string(), memento);
    }

    pub fn load(&self, slot: &str) -> Option<&Memento> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.keys().map(String::as_str)
    }
}

// ============================================================================
// Example: Minimal text originator
// ============================================================================

#[derive(Debug, Default)]
pub struct Editor {
    state: String,
}

#[derive(Debug, Clone)]
pub struct EditorSnapshot(String);

impl Editor {
    pub fn set(&mut self, state: &str) {
        self.state = state.to_string();
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot(self.state.clone())
    }

    pub fn restore(&mut self, snapshot: &EditorSnapshot) {
        self.state = snapshot.0.clone();
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut hero = Character::new("Aria");
    let mut saves = SaveManager::default();
    out.line("hero", hero.status())?;
    saves.store("village", hero.save());

    hero.travel("forest");
    hero.fight(40, 2);
    out.line("hero", hero.status())?;
    saves.store("forest", hero.save());

    hero.travel("dragon lair");
    hero.fight(150, 0);
    out.line("hero", hero.status())?;
    out.check("alive", hero.is_alive())?;

    out.line("slots", saves.slots().collect::<Vec<_>>().join(", "))?;
    for slot in ["forest", "village", "castle"] {
        match saves.load(slot) {
            Some(memento) => {
                hero.restore(memento);
                out.line(&format!("load.{slot}"), hero.status())?;
            }
            None => out.line(&format!("load.{slot}"), "no such save")?,
        }
    }

    let mut editor = Editor::default();
    editor.set("A");
    out.line("state", editor.state())?;
    let snapshot = editor.snapshot();
    out.line("snapshot", "taken")?;
    editor.set("B");
    out.line("state", editor.state())?;
    editor.restore(&snapshot);
    out.line("restore", "applied")?;
    out.line("state", editor.state())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_restore_equals_snapshot() {
        let mut hero = Character::new("x");
        hero.fight(10, 1);
        let saved = hero.clone();
        let memento = hero.save();
        hero.travel("elsewhere");
        hero.fight(100, 0);
        hero.restore(&memento);
        assert_eq!(hero, saved);
    }

    #[test]
    fn test_memento_is_independent_of_later_changes() {
        let mut editor = Editor::default();
        editor.set("one");
        let snapshot = editor.snapshot();
        editor.set("two");
        editor.set("three");
        editor.restore(&snapshot);
        assert_eq!(editor.state(), "one");
    }

    #[test]
    fn test_slots_keep_insertion_order() {
        let mut saves = SaveManager::default();
        saves.store("b", Character::new("b").save());
        saves.store("a", Character::new("a").save());
        assert_eq!(saves.slots().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(saves.load("c").is_none());
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("alive: false\n"));
        assert!(text.contains("load.forest: Aria lv3 hp60 at forest\n"));
        assert!(text.contains("load.castle: no such save\n"));
        assert!(text.ends_with("state: A\nsnapshot: taken\nstate: B\nrestore: applied\nstate: A\n"));
    }
}
