//! The root of a topic namespace.
//!
//! A [Namespace] owns the root [Object] and exposes the listings,
//! resolvers and text reports under the names the root type reserves
//! for itself.

use crate::{
    bridge,
    object::{Args, Object},
    path::{self, TopicPath},
    resolve::{self, Lookup},
    value::Value,
    walk::Listing,
};
use eyre::Result;
use itertools::Itertools;
use tracing::warn;

/// Service names the root reserves for its own helpers. Root-level
/// services with these names are left out of the service listing.
pub const RESERVED_SERVICES: [&str; 5] = [
    "sub_topic",
    "call_service",
    "all_list",
    "service_list",
    "topic_list",
];

/// The separator line that bounds a report.
pub const REPORT_SEPARATOR: &str = "----------------------------------------";

/// Returns true if `name` is one of [RESERVED_SERVICES].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_SERVICES.contains(&name)
}

#[derive(Debug, Clone)]
pub struct Namespace {
    root: Object,
    strip_root: bool,
}

impl Namespace {
    pub fn new(root: Object) -> Self {
        for (name, _) in root.slots().filter(|(name, _)| is_reserved(name)) {
            warn!(
                type_name = root.type_name(),
                name, "root member shadows a reserved helper name"
            );
        }

        Self {
            root,
            strip_root: true,
        }
    }

    /// Choose whether reports strip the `<root>/` prefix. Enabled by
    /// default.
    pub fn with_strip_root(mut self, strip_root: bool) -> Self {
        self.strip_root = strip_root;
        self
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Object {
        &mut self.root
    }

    pub fn into_root(self) -> Object {
        self.root
    }

    /// List the tree, excluding reserved root-level services.
    pub fn listing(&self) -> Listing {
        let mut listing = Listing::of(&self.root);
        listing
            .services
            .retain(|path| !is_self_referential(path));
        listing
    }

    pub fn publish_topics(&self) -> Vec<String> {
        to_strings(&self.listing().publish)
    }

    pub fn subscribe_topics(&self) -> Vec<String> {
        to_strings(&self.listing().subscribe)
    }

    pub fn service_topics(&self) -> Vec<String> {
        to_strings(&self.listing().services)
    }

    /// Read a data topic. See [resolve_data](resolve::resolve_data).
    pub fn sub_topic(&self, path: &str) -> Result<Lookup<'_>> {
        resolve::resolve_data(&self.root, path)
    }

    /// Call a service. See [invoke_service](resolve::invoke_service).
    pub fn call_service(&self, path: &str, args: &Args) -> Result<Option<Value>> {
        resolve::invoke_service(&self.root, path, args)
    }

    /// Push a value to a subscribe topic. See [deliver](resolve::deliver).
    pub fn deliver(&mut self, path: &str, value: Value) -> Result<()> {
        resolve::deliver(&mut self.root, path, value)
    }

    /// Export the public data in bridge format.
    pub fn export(&self) -> serde_json::Value {
        bridge::to_bridge(&self.root)
    }

    /// Update data members from bridge format.
    pub fn import(&mut self, json: &serde_json::Value) -> Result<()> {
        bridge::apply_bridge(&mut self.root, json)
    }

    /// A report with publish, subscribe and service sections.
    pub fn all_list(&self) -> String {
        let listing = self.listing();
        self.report(&[
            ("pub topics:", listing.publish.as_slice()),
            ("sub topics:", listing.subscribe.as_slice()),
            ("srv topics:", listing.services.as_slice()),
        ])
    }

    /// A report with publish and subscribe sections.
    pub fn topic_list(&self) -> String {
        let listing = self.listing();
        self.report(&[
            ("pub topics:", listing.publish.as_slice()),
            ("sub topics:", listing.subscribe.as_slice()),
        ])
    }

    /// A report with the service section only.
    pub fn service_list(&self) -> String {
        let listing = self.listing();
        self.report(&[("srv topics:", listing.services.as_slice())])
    }

    fn report(&self, sections: &[(&str, &[TopicPath])]) -> String {
        let root = self.root.type_name();
        let mut text = format!("\n{REPORT_SEPARATOR}");

        for (title, paths) in sections {
            let lines = paths
                .iter()
                .map(|path| {
                    let path = path.to_string();
                    if self.strip_root {
                        path::strip_root(&path, root).to_string()
                    } else {
                        path
                    }
                })
                .join("\n");
            text.push_str(&format!("\n{title}\n{lines}\n"));
        }

        text.push_str(REPORT_SEPARATOR);
        text.push('\n');
        text
    }
}

fn is_self_referential(path: &TopicPath) -> bool {
    path.segments().len() == 1 && is_reserved(path.name())
}

fn to_strings(paths: &[TopicPath]) -> Vec<String> {
    paths.iter().map(TopicPath::to_string).collect()
}
