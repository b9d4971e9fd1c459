//! TopicmapNode implementation.

use crate::config::Config;
use eyre::{Result, WrapErr};
use topicmap_core::{Args, Namespace, Object, Value};
use tracing::info;

/// A request executed against the hosted namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Report publish, subscribe and service topics.
    List,
    /// Report publish and subscribe topics.
    Topics,
    /// Report service topics.
    Services,
    /// Read a data topic.
    Get { path: String },
    /// Call a service.
    Call { path: String, args: Args },
    /// Push a value to a subscribe topic.
    Set { path: String, value: Value },
    /// Dump the public data in bridge format.
    Export,
}

/// Hosts a [Namespace] and executes [Command]s against it.
pub struct TopicmapNode {
    namespace: Namespace,
}

impl TopicmapNode {
    /// Create a node from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let root = config
            .root
            .to_object()
            .wrap_err("Failed to build the root object")?;

        info!(
            root = root.type_name(),
            num_members = root.len(),
            strip_root = config.report.strip_root,
            "Creating TopicmapNode"
        );

        let namespace = Namespace::new(root).with_strip_root(config.report.strip_root);
        Ok(Self { namespace })
    }

    /// Create a node hosting [demo_root].
    pub fn demo() -> Result<Self> {
        let root = demo_root()?;
        info!(root = root.type_name(), "Creating TopicmapNode with the demo tree");

        Ok(Self {
            namespace: Namespace::new(root),
        })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Execute a command and render its output.
    pub fn execute(&mut self, command: &Command) -> Result<String> {
        let output = match command {
            Command::List => self.namespace.all_list(),
            Command::Topics => self.namespace.topic_list(),
            Command::Services => self.namespace.service_list(),
            Command::Get { path } => self.namespace.sub_topic(path)?.to_string(),
            Command::Call { path, args } => match self.namespace.call_service(path, args)? {
                Some(reply) => reply.to_string(),
                None => "None".to_string(),
            },
            Command::Set { path, value } => {
                self.namespace.deliver(path, value.clone())?;
                format!("{path} <- {value}")
            }
            Command::Export => serde_json::to_string_pretty(&self.namespace.export())
                .wrap_err("Failed to serialize the bridge format")?,
        };

        Ok(output)
    }
}

/// The built-in demo tree: a `RosRoot` holding a
/// `TestRosAbastractBase` under `test`.
pub fn demo_root() -> Result<Object> {
    let test = Object::builder("TestRosAbastractBase")
        .declare("name", Value::from("It is a test."))
        .declare("time", Value::from(154541352))
        .declare("_weather", Value::Null)
        .service("who_I_am", |this, _args| {
            Ok(format!("{} {}", this.data("name")?, this.data("time")?).into())
        })
        .build()?;

    Object::builder("RosRoot").child("test", test).build()
}
