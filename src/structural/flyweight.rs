// Flyweight: a forest of many trees shares a handful of tree types. Name,
// color and texture live in the shared type; only position is per tree.

use std::io;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::transcript::Transcript;

/// Intrinsic state, shared.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeType {
    name: String,
    color: String,
    texture: String,
}

impl TreeType {
    pub fn draw(&self, x: i32, y: i32) -> String {
        format!("{} ({}, {}) at ({x},{y})", self.name, self.color, self.texture)
    }
}

/// Pool of shared types, keyed by all intrinsic fields.
#[derive(Default)]
pub struct TreeFactory {
    pool: IndexMap<(String, String, String), Rc<TreeType>>,
}

impl TreeFactory {
    pub fn tree_type(&mut self, name: &str, color: &str, texture: &str) -> Rc<TreeType> {
        let key = (name.to_string(), color.to_string(), texture.to_string());
        let shared = self.pool.entry(key).or_insert_with(|| {
            Rc::new(TreeType {
                name: name.to_string(),
                color: color.to_string(),
                texture: texture.to_string(),
            })
        });
        Rc::clone(shared)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// Extrinsic state plus a handle to the shared type.
pub struct Tree {
    x: i32,
    y: i32,
    kind: Rc<TreeType>,
}

impl Tree {
    pub fn draw(&self) -> String {
        self.kind.draw(self.x, self.y)
    }
}

#[derive(Default)]
pub struct Forest {
    factory: TreeFactory,
    trees: Vec<Tree>,
}

impl Forest {
    pub fn plant(&mut self, x: i32, y: i32, name: &str, color: &str, texture: &str) {
        let kind = self.factory.tree_type(name, color, texture);
        self.trees.push(Tree { x, y, kind });
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn type_count(&self) -> usize {
        self.factory.len()
    }
}

const SPECIES: [(&str, &str, &str); 3] = [
    ("pine", "dark-green", "needles"),
    ("oak", "green", "broad-leaf"),
    ("birch", "light-green", "white-bark"),
];

fn sample_forest() -> Forest {
    let mut forest = Forest::default();
    for i in 0..15 {
        let (name, color, texture) = SPECIES[i % SPECIES.len()];
        let i = i as i32;
        forest.plant(i * 10, i * 7 % 50, name, color, texture);
    }
    forest
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let forest = sample_forest();
    for tree in forest.trees().iter().take(SPECIES.len()) {
        out.line("draw", tree.draw())?;
    }
    out.line("trees", forest.trees().len())?;
    out.line("shared-types", forest.type_count())?;

    // Equal intrinsic state yields the very same object.
    let mut factory = TreeFactory::default();
    let first = factory.tree_type("pine", "dark-green", "needles");
    let second = factory.tree_type("pine", "dark-green", "needles");
    out.check("identity-eq", Rc::ptr_eq(&first, &second))?;
    let other = factory.tree_type("pine", "blue-green", "needles");
    out.check("different-state.identity-eq", Rc::ptr_eq(&first, &other))?;
    out.line("pool-size", factory.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_pool_shares_equal_types() {
        let mut factory = TreeFactory::default();
        let a = factory.tree_type("oak", "green", "broad-leaf");
        let b = factory.tree_type("oak", "green", "broad-leaf");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_forest_reuses_types() {
        let forest = sample_forest();
        assert_eq!(forest.trees().len(), 15);
        assert_eq!(forest.type_count(), 3);
        // Pool, first and fourth tree all hold the pine type.
        let pine = &forest.trees()[0].kind;
        assert!(Rc::ptr_eq(pine, &forest.trees()[3].kind));
        assert_eq!(Rc::strong_count(pine), 6);
    }

    #[test]
    fn test_extrinsic_state_stays_per_tree() {
        let forest = sample_forest();
        assert_eq!(forest.trees()[1].draw(), "oak (green, broad-leaf) at (10,7)");
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("trees: 15\nshared-types: 3\n"));
        assert!(text.contains("identity-eq: true\n"));
        assert!(text.contains("different-state.identity-eq: false\n"));
        assert!(text.ends_with("pool-size: 2\n"));
    }
}
