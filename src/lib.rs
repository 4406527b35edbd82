//! A hash-consed, reference-counted decision diagram engine.
//!
//! [`bdd::BddManager`] builds binary decision diagrams; [`mdd::MddManager`] builds multi-valued
//! decision diagrams over variables of arbitrary finite domain. Both share the same node table
//! (`node_table`) and operation cache infrastructure (`cache`), reusing the same hash-consing,
//! reference-counting and garbage-collection machinery at different node arities.
//!
//! ```
//! use decision_diagrams::bdd::BddManager;
//! use decision_diagrams::config::Config;
//!
//! let mut manager = BddManager::new(Config::default());
//! let va = manager.create_variable();
//! let vb = manager.create_variable();
//! let a = manager.variable_node(va).unwrap();
//! let b = manager.variable_node(vb).unwrap();
//! let and_ab = manager.and(a, b);
//! assert!(manager.evaluate(and_ab, &[true, true]));
//! assert!(!manager.evaluate(and_ab, &[true, false]));
//! ```

pub mod bdd;
pub mod config;
pub mod error;
pub mod gc_ref;
pub mod guard;
pub mod ids;
pub mod mdd;

pub mod primitives;

pub(crate) mod cache;
pub(crate) mod enumerate;
pub(crate) mod node_table;

pub use error::{Error, Result};
