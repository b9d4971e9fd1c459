//! The declared schema of an object tree.
//!
//! An [Object] is a type name plus an ordered map from segment name to
//! [Slot]. Each slot carries an explicit [Visibility] tag and a
//! [Member], which is either primitive data, a nested object, or a
//! [Service]. Slots are enumerated in declaration order.

use crate::{
    path::SEPARATOR,
    value::Value,
    visibility::{self, Visibility},
};
use eyre::{Result, bail, ensure};
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// The closure type behind a [Service]. It receives the object owning
/// the service and the call arguments.
pub type ServiceFn = dyn Fn(&Object, &Args) -> Result<Value> + Send + Sync;

/// A callable endpoint.
#[derive(Clone)]
pub struct Service {
    func: Arc<ServiceFn>,
}

impl Service {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Object, &Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invoke the service on its owning object.
    pub fn call(&self, owner: &Object, args: &Args) -> Result<Value> {
        (self.func)(owner, args)
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Service(..)")
    }
}

/// Positional and keyword arguments passed to a [Service].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub keyword: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: IndexMap::new(),
        }
    }

    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }
}

/// The content of a slot.
#[derive(Debug, Clone)]
pub enum Member {
    Data(Value),
    Object(Object),
    Service(Service),
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<Object> for Member {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Service> for Member {
    fn from(service: Service) -> Self {
        Self::Service(service)
    }
}

/// A named member of an object together with its visibility tag.
#[derive(Debug, Clone)]
pub struct Slot {
    pub visibility: Visibility,
    pub member: Member,
}

impl Slot {
    /// Returns true if the slot must be skipped by listings and
    /// traversal, either by its tag or by the private marker in its name.
    pub fn is_hidden(&self, name: &str) -> bool {
        self.visibility == Visibility::Private || visibility::is_private(name)
    }
}

/// A composite node of the tree.
#[derive(Debug, Clone)]
pub struct Object {
    type_name: String,
    slots: IndexMap<String, Slot>,
}

impl Object {
    pub fn builder(type_name: impl Into<String>) -> ObjectBuilder {
        ObjectBuilder {
            type_name: type_name.into(),
            slots: vec![],
        }
    }

    /// The type name, used as the namespace prefix when this object is
    /// the root of a walk.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.slots.get_mut(name)
    }

    /// Iterate over the slots in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Look up a data member by name, regardless of its visibility.
    /// Services use this to read their sibling members.
    pub fn data(&self, name: &str) -> Result<&Value> {
        match self.slots.get(name).map(|slot| &slot.member) {
            Some(Member::Data(value)) => Ok(value),
            Some(_) => bail!("member `{name}` of `{}` is not data", self.type_name),
            None => bail!("`{}` has no member `{name}`", self.type_name),
        }
    }

    /// Look up a nested object by name.
    pub fn child(&self, name: &str) -> Result<&Object> {
        match self.slots.get(name).map(|slot| &slot.member) {
            Some(Member::Object(object)) => Ok(object),
            Some(_) => bail!("member `{name}` of `{}` is not an object", self.type_name),
            None => bail!("`{}` has no member `{name}`", self.type_name),
        }
    }
}

/// Declares the slots of an [Object].
///
/// The explicit methods ([publish](Self::publish),
/// [subscribe](Self::subscribe), [private](Self::private)) tag a slot
/// directly. [declare](Self::declare) derives the tag from the name by
/// convention, so `_weather` becomes a subscribe slot named `weather`.
/// [build](Self::build) applies the same convention to data and object
/// slots declared with the explicit methods, unless they are tagged
/// private.
#[derive(Debug)]
pub struct ObjectBuilder {
    type_name: String,
    slots: Vec<(String, Slot)>,
}

impl ObjectBuilder {
    pub fn slot(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        member: impl Into<Member>,
    ) -> Self {
        self.slots.push((
            name.into(),
            Slot {
                visibility,
                member: member.into(),
            },
        ));
        self
    }

    /// Declare a slot whose visibility follows the naming convention.
    pub fn declare(self, name: &str, member: impl Into<Member>) -> Self {
        let (visibility, name) = Visibility::classify(name);
        let name = name.to_string();
        self.slot(name, visibility, member)
    }

    pub fn publish(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slot(name, Visibility::Public, value.into())
    }

    pub fn subscribe(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slot(name, Visibility::Subscribe, value.into())
    }

    pub fn private(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slot(name, Visibility::Private, value.into())
    }

    pub fn child(self, name: impl Into<String>, object: Object) -> Self {
        self.slot(name, Visibility::Public, object)
    }

    pub fn service<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Object, &Args) -> Result<Value> + Send + Sync + 'static,
    {
        self.slot(name, Visibility::Public, Service::new(func))
    }

    /// Validate the declared names and build the object.
    pub fn build(self) -> Result<Object> {
        let Self { type_name, slots } = self;

        ensure!(!type_name.is_empty(), "type name cannot be empty");

        let mut map = IndexMap::with_capacity(slots.len());
        for (name, slot) in slots {
            let (name, slot) = normalize(name, slot);
            ensure!(
                !name.is_empty(),
                "member name of `{type_name}` cannot be empty"
            );
            ensure!(
                !name.contains(SEPARATOR),
                "member name `{name}` of `{type_name}` cannot contain `{SEPARATOR}`"
            );

            if map.insert(name.clone(), slot).is_some() {
                bail!("duplicated member `{name}` in `{type_name}`");
            }
        }

        Ok(Object {
            type_name,
            slots: map,
        })
    }
}

/// Apply the naming convention to a data or object slot declared with
/// an explicit tag. A `_x` name becomes the subscribe slot `x`, so the
/// listing agrees with the path rules of the resolvers. Services keep
/// their declared names.
fn normalize(name: String, mut slot: Slot) -> (String, Slot) {
    if matches!(slot.member, Member::Service(_)) || slot.visibility == Visibility::Private {
        return (name, slot);
    }

    match Visibility::classify(&name) {
        (Visibility::Subscribe, stripped) => {
            let stripped = stripped.to_string();
            slot.visibility = Visibility::Subscribe;
            (stripped, slot)
        }
        _ => (name, slot),
    }
}
