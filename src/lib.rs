//! Logger Tree
//!
//! Groups log events into a navigable tree mirroring their dotted logger
//! namespaces (`com.acme.service.worker`), with each node annotated by how
//! many events were logged under it.
//!
//! This crate provides the aggregation engine and the implementation for
//! the `logger-tree` CLI tool.
//!
//! ## Getting Started
//!
//! ```
//! use logger_tree::aggregator::build_tree;
//!
//! let tree = build_tree(&["a.b", "a.b", "a.c", "a"]);
//! let a = tree.find("a").unwrap();
//! assert_eq!(tree.frequency(a), 4);
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
