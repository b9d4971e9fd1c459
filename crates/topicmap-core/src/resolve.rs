//! Resolve a path string against a live tree.
//!
//! All resolvers split the path on `/`, ignore empty segments and look
//! each segment up in the current object. A segment that does not exist
//! or is private is a hard error.

use crate::{
    object::{Args, Member, Object, Slot},
    path,
    value::Value,
    visibility::{self, Visibility},
};
use eyre::{Result, WrapErr, bail, ensure};
use std::fmt;
use tracing::debug;

/// The text shown for [Lookup::SubscribeOnly].
pub const SUBSCRIBE_ONLY_MESSAGE: &str = r#"Cannot sub a "try Sub" topic"#;

/// The outcome of [resolve_data].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The first data value reached along the path.
    Found(&'a Value),
    /// The path addresses a subscribe topic, which cannot be read.
    SubscribeOnly,
    /// The path ended without reaching a data value.
    Nothing,
}

impl<'a> Lookup<'a> {
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_subscribe_only(&self) -> bool {
        matches!(self, Self::SubscribeOnly)
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(value) => write!(f, "{value}"),
            Self::SubscribeOnly => f.write_str(SUBSCRIBE_ONLY_MESSAGE),
            Self::Nothing => f.write_str("None"),
        }
    }
}

/// Read the data value at `path`.
///
/// Returns the first data value reached; any remaining segments are
/// ignored. Subscribe topics yield [Lookup::SubscribeOnly], whether the
/// path spells them with the `_` prefix or reaches a subscribe slot.
pub fn resolve_data<'a>(root: &'a Object, path: &str) -> Result<Lookup<'a>> {
    if visibility::is_subscribe_path(path) {
        debug!(path, "refuse to read a subscribe path");
        return Ok(Lookup::SubscribeOnly);
    }

    let mut current = root;
    let mut segments = path::segments(path);

    while let Some(seg) = segments.next() {
        let slot = step(current, seg)?;

        if slot.visibility == Visibility::Subscribe {
            debug!(path, seg, "refuse to read a subscribe topic");
            return Ok(Lookup::SubscribeOnly);
        }

        match &slot.member {
            Member::Data(value) => {
                debug!(path, %value, "resolved data");
                return Ok(Lookup::Found(value));
            }
            Member::Object(child) => current = child,
            Member::Service(_) => {
                if let Some(next) = segments.next() {
                    bail!("service `{seg}` has no member `{next}`");
                }
                break;
            }
        }
    }

    debug!(path, "no data found");
    Ok(Lookup::Nothing)
}

/// Invoke the service at `path` with `args`.
///
/// The first service reached along the path is called on its owning
/// object and its result returned; any remaining segments are ignored.
/// Returns `None` if the path reaches no service.
pub fn invoke_service(root: &Object, path: &str, args: &Args) -> Result<Option<Value>> {
    let mut current = root;
    let mut segments = path::segments(path);

    while let Some(seg) = segments.next() {
        let slot = step(current, seg)?;

        match &slot.member {
            Member::Service(service) => {
                debug!(path, seg, "invoke service");
                let reply = service
                    .call(current, args)
                    .wrap_err_with(|| format!("service `{path}` failed"))?;
                return Ok(Some(reply));
            }
            Member::Object(child) => current = child,
            Member::Data(_) => {
                if let Some(next) = segments.next() {
                    bail!("data member `{seg}` has no member `{next}`");
                }
                break;
            }
        }
    }

    debug!(path, "no service found");
    Ok(None)
}

/// Push a value into the subscribe topic at `path`.
///
/// The path must end on a data slot that is subscribe, either by its own
/// tag or through a subscribe ancestor.
pub fn deliver(root: &mut Object, path: &str, value: Value) -> Result<()> {
    let segments: Vec<&str> = path::segments(path).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("cannot deliver to an empty path");
    };

    let mut current = root;
    let mut inherited = Visibility::Public;

    for &seg in parents {
        let slot = step_mut(current, seg)?;
        inherited = inherited.inherit(slot.visibility);

        match &mut slot.member {
            Member::Object(child) => current = child,
            _ => bail!("member `{seg}` in `{path}` is not an object"),
        }
    }

    let slot = step_mut(current, last)?;
    ensure!(
        inherited.inherit(slot.visibility) == Visibility::Subscribe,
        "`{path}` is not a subscribe topic"
    );

    match &mut slot.member {
        Member::Data(slot_value) => {
            *slot_value = value;
            debug!(path, value = %slot_value, "deliver");
            Ok(())
        }
        _ => bail!("`{path}` is not a data topic"),
    }
}

fn step<'a>(object: &'a Object, seg: &str) -> Result<&'a Slot> {
    let Some(slot) = object.slot(seg) else {
        bail!("`{}` has no member `{seg}`", object.type_name());
    };
    ensure!(
        !slot.is_hidden(seg),
        "member `{seg}` of `{}` is private",
        object.type_name()
    );
    Ok(slot)
}

fn step_mut<'a>(object: &'a mut Object, seg: &str) -> Result<&'a mut Slot> {
    let type_name = object.type_name().to_string();
    let Some(slot) = object.slot_mut(seg) else {
        bail!("`{type_name}` has no member `{seg}`");
    };
    ensure!(
        !slot.is_hidden(seg),
        "member `{seg}` of `{type_name}` is private"
    );
    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Object {
        let sensor = Object::builder("Sensor")
            .publish("reading", 3.5)
            .subscribe("target", 0)
            .private("calibration", 1.0)
            .service("scale", |this, args| {
                let factor = args.get(0).and_then(Value::as_f64).unwrap_or(1.0);
                let reading = this.data("reading")?.as_f64().unwrap_or_default();
                Ok((reading * factor).into())
            })
            .build()
            .unwrap();

        Object::builder("Root").child("sensor", sensor).build().unwrap()
    }

    #[test]
    fn test_trailing_segments_after_data_are_ignored() {
        let tree = tree();
        let lookup = resolve_data(&tree, "sensor/reading/extra/more").unwrap();
        assert_eq!(lookup.value(), Some(&Value::Float(3.5)));
    }

    #[test]
    fn test_object_path_is_nothing() {
        let tree = tree();
        assert_eq!(resolve_data(&tree, "/sensor/").unwrap(), Lookup::Nothing);
        assert_eq!(resolve_data(&tree, "").unwrap(), Lookup::Nothing);
        assert_eq!(resolve_data(&tree, "sensor/scale").unwrap(), Lookup::Nothing);
    }

    #[test]
    fn test_missing_segment_is_error() {
        let tree = tree();
        assert!(resolve_data(&tree, "sensor/missing").is_err());
        assert!(resolve_data(&tree, "nope/reading").is_err());
        assert!(invoke_service(&tree, "nope", &Args::new()).is_err());
    }

    #[test]
    fn test_private_segment_is_error() {
        let tree = tree();
        assert!(resolve_data(&tree, "sensor/calibration").is_err());
    }

    #[test]
    fn test_subscribe_is_refused() {
        let tree = tree();
        assert!(resolve_data(&tree, "sensor/target").unwrap().is_subscribe_only());
        assert!(resolve_data(&tree, "sensor/_target").unwrap().is_subscribe_only());
        assert_eq!(
            resolve_data(&tree, "sensor/target").unwrap().to_string(),
            SUBSCRIBE_ONLY_MESSAGE
        );
    }

    #[test]
    fn test_invoke_with_args() {
        let tree = tree();
        let reply = invoke_service(&tree, "/sensor/scale", &Args::positional([2.0])).unwrap();
        assert_eq!(reply, Some(Value::Float(7.0)));
    }

    #[test]
    fn test_invoke_without_service() {
        let tree = tree();
        assert_eq!(invoke_service(&tree, "sensor", &Args::new()).unwrap(), None);
        assert_eq!(
            invoke_service(&tree, "sensor/reading", &Args::new()).unwrap(),
            None
        );
        assert!(invoke_service(&tree, "sensor/reading/x", &Args::new()).is_err());
    }

    #[test]
    fn test_failing_service_propagates() {
        let root = Object::builder("Root")
            .service("fail", |_, _| bail!("boom"))
            .build()
            .unwrap();
        assert!(invoke_service(&root, "fail", &Args::new()).is_err());
    }

    #[test]
    fn test_deliver() {
        let mut tree = tree();
        deliver(&mut tree, "/sensor/target", Value::from(9)).unwrap();

        let target = tree.child("sensor").unwrap().data("target").unwrap();
        assert_eq!(target, &Value::Int(9));

        assert!(deliver(&mut tree, "sensor/reading", Value::from(1)).is_err());
        assert!(deliver(&mut tree, "sensor/calibration", Value::from(1)).is_err());
        assert!(deliver(&mut tree, "sensor/scale", Value::from(1)).is_err());
        assert!(deliver(&mut tree, "", Value::from(1)).is_err());
    }
}
