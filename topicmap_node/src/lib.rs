//! topicmap-node - Host a topic namespace and query it.
//!
//! This crate builds a [Namespace](topicmap_core::Namespace) either from
//! a YAML configuration file or from the built-in demo tree, and
//! executes listing and resolution commands against it.
//!
//! # Configuration
//!
//! The configuration file declares the root object:
//! - `root.type` is the namespace prefix
//! - `root.members` maps member names to scalars (data) or to nested
//!   objects with their own `type` and `members`
//! - `report.strip_root` controls whether reports show the root prefix
//!
//! See the `config/example.yaml` file for a complete example.
//!
//! Services cannot be declared in YAML. They are registered in code, as
//! [demo_root] does.

pub mod config;
pub mod node;

pub use config::Config;
pub use node::{Command, TopicmapNode, demo_root};
