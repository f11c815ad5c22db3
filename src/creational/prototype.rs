// Prototype: monsters are spawned by cloning registered templates, without
// the spawner knowing their concrete types.

use std::io;

use indexmap::IndexMap;

use crate::transcript::Transcript;

pub trait Monster {
    /// Clone behind a trait object.
    fn clone_box(&self) -> Box<dyn Monster>;
    fn describe(&self) -> String;
    fn move_to(&mut self, x: i32, y: i32);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goblin {
    name: String,
    health: u32,
    attack: u32,
    position: (i32, i32),
}

impl Goblin {
    pub fn new(name: &str, health: u32, attack: u32) -> Self {
        Self {
            name: name.to_string(),
            health,
            attack,
            position: (0, 0),
        }
    }
}

impl Monster for Goblin {
    fn clone_box(&self) -> Box<dyn Monster> {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "goblin[{}] hp={} atk={} at ({},{})",
            self.name, self.health, self.attack, self.position.0, self.position.1
        )
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dragon {
    name: String,
    health: u32,
    attack: u32,
    element: String,
    position: (i32, i32),
}

impl Dragon {
    pub fn new(name: &str, health: u32, attack: u32, element: &str) -> Self {
        Self {
            name: name.to_string(),
            health,
            attack,
            element: element.to_string(),
            position: (0, 0),
        }
    }
}

impl Monster for Dragon {
    fn clone_box(&self) -> Box<dyn Monster> {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "dragon[{}] hp={} atk={} element={} at ({},{})",
            self.name, self.health, self.attack, self.element, self.position.0, self.position.1
        )
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }
}

/// Prototype manager: templates by key, in registration order.
#[derive(Default)]
pub struct MonsterRegistry {
    prototypes: IndexMap<String, Box<dyn Monster>>,
}

impl MonsterRegistry {
    pub fn register(&mut self, key: &str, prototype: Box<dyn Monster>) {
        self.prototypes.insert(key.to_string(), prototype);
    }

    pub fn spawn(&self, key: &str) -> Option<Box<dyn Monster>> {
        self.prototypes.get(key).map(|p| p.clone_box())
    }

    pub fn prototype(&self, key: &str) -> Option<&dyn Monster> {
        self.prototypes.get(key).map(|p| &**p)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.prototypes.keys().map(String::as_str)
    }
}

fn same_object(a: &dyn Monster, b: &dyn Monster) -> bool {
    std::ptr::eq(a as *const dyn Monster as *const (), b as *const dyn Monster as *const ())
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut registry = MonsterRegistry::default();
    registry.register("goblin-warrior", Box::new(Goblin::new("Goblin Warrior", 100, 15)));
    registry.register("fire-dragon", Box::new(Dragon::new("Fire Dragon", 5000, 200, "fire")));
    for key in registry.keys() {
        out.line("registered", key)?;
    }

    let spawns = [
        ("goblin-warrior", (10, 20)),
        ("goblin-warrior", (30, 40)),
        ("fire-dragon", (100, 200)),
        ("frost-giant", (0, 0)),
    ];
    for (key, (x, y)) in spawns {
        match registry.spawn(key) {
            Some(mut monster) => {
                monster.move_to(x, y);
                out.line("spawn", monster.describe())?;
            }
            None => out.line("spawn", format!("no prototype named {key}"))?,
        }
    }

    // Fresh clone vs. its template: same state, different object.
    let (Some(template), Some(mut copy)) =
        (registry.prototype("goblin-warrior"), registry.spawn("goblin-warrior"))
    else {
        return out.line("clone", "goblin-warrior missing");
    };
    out.check("clone.state-eq", copy.describe() == template.describe())?;
    out.check("clone.identity-eq", same_object(&*copy, template))?;

    copy.move_to(99, 99);
    out.line("clone.moved", copy.describe())?;
    out.line("original", template.describe())?;
    out.check("original.unchanged", !template.describe().contains("99"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_clone_equal_but_distinct() {
        let original = Goblin::new("g", 10, 1);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.move_to(5, 5);
        assert_ne!(copy, original);
        assert_eq!(original.position, (0, 0));
    }

    #[test]
    fn test_registry_spawns_independent_copies() {
        let mut registry = MonsterRegistry::default();
        registry.register("d", Box::new(Dragon::new("d", 1, 1, "ice")));
        let mut a = registry.spawn("d").unwrap();
        let b = registry.spawn("d").unwrap();
        a.move_to(1, 1);
        assert!(a.describe().ends_with("at (1,1)"));
        assert!(b.describe().ends_with("at (0,0)"));
        assert!(!same_object(&*a, &*b));
    }

    #[test]
    fn test_unknown_prototype() {
        let registry = MonsterRegistry::default();
        assert!(registry.spawn("nothing").is_none());
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("clone.state-eq: true\n"));
        assert!(text.contains("clone.identity-eq: false\n"));
        assert!(text.contains("original.unchanged: true\n"));
        assert!(text.contains("spawn: no prototype named frost-giant\n"));
    }
}
