//! This library maps a declared object tree onto a topic namespace.
//!
//! The type name of the root object becomes the namespace prefix.
//! Public data members become publish topics. Members declared with a
//! single leading underscore become subscribe topics, and services
//! become service endpoints. Members containing `__` are private and
//! never exposed.
//!
//! # Usage
//!
//! ```rust
//! use topicmap_core::{Args, Lookup, Namespace, Object, Value};
//!
//! # fn main() -> eyre::Result<()> {
//! // Declare the members of a nested object.
//! let test = Object::builder("TestRosAbastractBase")
//!     .declare("name", Value::from("It is a test."))
//!     .declare("time", Value::from(154541352))
//!     .declare("_weather", Value::Null)
//!     .service("who_I_am", |this, _args| {
//!         Ok(format!("{} {}", this.data("name")?, this.data("time")?).into())
//!     })
//!     .build()?;
//!
//! let root = Object::builder("RosRoot").child("test", test).build()?;
//! let namespace = Namespace::new(root);
//!
//! assert_eq!(namespace.publish_topics(), ["RosRoot/test/name", "RosRoot/test/time"]);
//! assert_eq!(namespace.subscribe_topics(), ["RosRoot/test/weather"]);
//! assert_eq!(namespace.service_topics(), ["RosRoot/test/who_I_am"]);
//!
//! // Resolve paths back to the live tree.
//! let reply = namespace.call_service("/test/who_I_am", &Args::new())?;
//! assert_eq!(reply, Some(Value::from("It is a test. 154541352")));
//!
//! let name = namespace.sub_topic("/test/name")?;
//! assert_eq!(name, Lookup::Found(&Value::from("It is a test.")));
//!
//! assert!(namespace.sub_topic("/test/weather")?.is_subscribe_only());
//! # Ok(())
//! # }
//! ```

pub mod bridge;
mod namespace;
mod object;
pub mod path;
pub mod resolve;
mod value;
pub mod visibility;
pub mod walk;

pub use namespace::{Namespace, REPORT_SEPARATOR, RESERVED_SERVICES, is_reserved};
pub use object::{Args, Member, Object, ObjectBuilder, Service, ServiceFn, Slot};
pub use path::TopicPath;
pub use resolve::{Lookup, SUBSCRIBE_ONLY_MESSAGE, deliver, invoke_service, resolve_data};
pub use value::Value;
pub use visibility::Visibility;
pub use walk::{Kind, Leaf, Listing, Node, flatten, list_publish, list_services, list_subscribe};
