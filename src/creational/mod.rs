//! Creational patterns: object creation without hard-wiring concrete types.

pub mod abstract_factory;
pub mod builder;
pub mod factory_method;
pub mod prototype;
pub mod singleton;
