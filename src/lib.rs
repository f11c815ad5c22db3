// Design Patterns Catalog
// The 23 GoF patterns as small runnable demos behind one deterministic harness.

//! # Design Patterns Catalog
//!
//! Every pattern lives in its own module and exposes a single entry point
//! `run(&mut Transcript) -> io::Result<()>` that writes `<tag>: <payload>`
//! lines. The [`harness::Harness`] looks demos up by id in the
//! [`registry::Registry`] and frames each transcript:
//!
//! ```text
//! === interpreter ===
//! expression: (5 + 3) * 2
//! result: 16
//!
//! ```
//!
//! ## Families
//! - Creational: singleton, factory-method, abstract-factory, builder, prototype
//! - Structural: adapter, bridge, composite, decorator, facade, flyweight, proxy
//! - Behavioral: chain-of-responsibility, command, interpreter, iterator,
//!   mediator, memento, observer, state, strategy, template-method, visitor
//!
//! Run them with:
//! ```bash
//! cargo run --bin demo              # whole catalog
//! cargo run --bin demo -- list      # canonical order
//! cargo run --bin demo -- observer  # one pattern
//! ```

pub mod behavioral;
pub mod catalog;
pub mod creational;
pub mod error;
pub mod harness;
pub mod logging;
pub mod registry;
pub mod structural;
pub mod transcript;

pub use error::{CatalogError, HarnessError};
pub use harness::{Harness, Mode};
pub use registry::{PatternEntry, Registry};
pub use transcript::{DemoFn, Transcript};
