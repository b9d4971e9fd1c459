//! The classifier and tree flattener.
//!
//! [flatten] walks an [Object] depth-first in declaration order and
//! records every reachable leaf. Data and service slots terminate the
//! recursion; nested objects are descended into. Private slots are
//! skipped together with their whole subtree. A subscribe slot marks
//! every leaf below it as subscribe.

use crate::{
    object::{Member, Object, Service},
    path::TopicPath,
    value::Value,
    visibility::Visibility,
};
use tracing::trace;

/// Whether a node is data or callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Data,
    Callable,
}

/// The payload of a visited node.
#[derive(Debug, Clone, Copy)]
pub enum Leaf<'a> {
    Data(&'a Value),
    Callable(&'a Service),
}

/// A visited leaf of the tree.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub path: TopicPath,
    /// Either [Visibility::Public] or [Visibility::Subscribe]. Private
    /// nodes are never produced.
    pub visibility: Visibility,
    pub leaf: Leaf<'a>,
}

impl Node<'_> {
    pub fn kind(&self) -> Kind {
        match self.leaf {
            Leaf::Data(_) => Kind::Data,
            Leaf::Callable(_) => Kind::Callable,
        }
    }
}

/// Walk the tree rooted at `root` and collect its leaves.
pub fn flatten(root: &Object) -> Vec<Node<'_>> {
    let mut nodes = vec![];
    let mut segments = vec![];
    visit(
        root,
        root.type_name(),
        Visibility::Public,
        &mut segments,
        &mut nodes,
    );
    nodes
}

fn visit<'a>(
    object: &'a Object,
    root: &str,
    inherited: Visibility,
    segments: &mut Vec<String>,
    nodes: &mut Vec<Node<'a>>,
) {
    for (name, slot) in object.slots() {
        if slot.is_hidden(name) {
            trace!(type_name = object.type_name(), name, "skip private member");
            continue;
        }

        let visibility = inherited.inherit(slot.visibility);
        segments.push(name.to_string());

        let leaf = match &slot.member {
            Member::Data(value) => Some(Leaf::Data(value)),
            Member::Service(service) => Some(Leaf::Callable(service)),
            Member::Object(child) => {
                visit(child, root, visibility, segments, nodes);
                None
            }
        };

        if let Some(leaf) = leaf {
            let path = TopicPath::new(root, segments.iter().cloned());
            trace!(path = %path, ?visibility, "visit leaf");
            nodes.push(Node {
                path,
                visibility,
                leaf,
            });
        }

        segments.pop();
    }
}

/// The three topic categories of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub publish: Vec<TopicPath>,
    pub subscribe: Vec<TopicPath>,
    pub services: Vec<TopicPath>,
}

impl Listing {
    /// Walk the tree once and partition its leaves.
    pub fn of(root: &Object) -> Self {
        Self::from_nodes(flatten(root))
    }

    /// Partition visited nodes. Callables are services regardless of
    /// their visibility; data is split into publish and subscribe.
    pub fn from_nodes<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Node<'a>>,
    {
        let mut listing = Self::default();

        for node in nodes {
            let bucket = match (node.kind(), node.visibility) {
                (Kind::Callable, _) => &mut listing.services,
                (Kind::Data, Visibility::Subscribe) => &mut listing.subscribe,
                (Kind::Data, _) => &mut listing.publish,
            };
            bucket.push(node.path);
        }

        listing
    }
}

/// Paths of the publish topics of `root`.
pub fn list_publish(root: &Object) -> Vec<String> {
    to_strings(Listing::of(root).publish)
}

/// Paths of the subscribe topics of `root`.
pub fn list_subscribe(root: &Object) -> Vec<String> {
    to_strings(Listing::of(root).subscribe)
}

/// Paths of the services of `root`.
pub fn list_services(root: &Object) -> Vec<String> {
    to_strings(Listing::of(root).services)
}

fn to_strings(paths: Vec<TopicPath>) -> Vec<String> {
    paths.iter().map(TopicPath::to_string).collect()
}
