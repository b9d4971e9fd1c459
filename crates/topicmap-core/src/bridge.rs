//! JSON bridge format of the data held by a tree.
//!
//! Data members are written under their declared names, so subscribe
//! members keep their `_` prefix. Nested objects become nested JSON
//! objects. Private members and services are left out.

use crate::{
    object::{Member, Object},
    value::Value,
    visibility::{PRIVATE_MARKER, Visibility},
};
use eyre::{Result, WrapErr, bail, ensure};
use serde_json::Map;

/// Export the non-private data of `object`.
pub fn to_bridge(object: &Object) -> serde_json::Value {
    let mut map = Map::new();

    for (name, slot) in object.slots() {
        if slot.is_hidden(name) {
            continue;
        }

        let json: serde_json::Value = match &slot.member {
            Member::Data(value) => value.into(),
            Member::Object(child) => to_bridge(child),
            Member::Service(_) => continue,
        };
        map.insert(slot.visibility.declared_name(name), json);
    }

    serde_json::Value::Object(map)
}

/// Update the data of `object` from a bridge-format JSON object.
///
/// Only existing members can be updated. Keys are classified by the
/// naming convention and must agree with the visibility of the member
/// they address. The update is all or nothing: on error `object` is
/// left unchanged.
pub fn apply_bridge(object: &mut Object, json: &serde_json::Value) -> Result<()> {
    let mut updated = object.clone();
    update(&mut updated, json)?;
    *object = updated;
    Ok(())
}

fn update(object: &mut Object, json: &serde_json::Value) -> Result<()> {
    let Some(entries) = json.as_object() else {
        bail!(
            "expect a JSON object for `{}`, but get {json}",
            object.type_name()
        );
    };

    for (key, json) in entries {
        let (visibility, name) = Visibility::classify(key);
        ensure!(
            visibility != Visibility::Private,
            "cannot update private member `{key}`"
        );

        let type_name = object.type_name().to_string();
        let Some(slot) = object.slot_mut(name) else {
            bail!("`{type_name}` has no member `{name}`");
        };
        ensure!(
            slot.visibility == visibility,
            "key `{key}` does not match the visibility of `{type_name}/{name}`"
        );

        match &mut slot.member {
            Member::Data(value) => {
                *value = Value::try_from(json)
                    .wrap_err_with(|| format!("invalid value for `{type_name}/{name}`"))?;
            }
            Member::Object(child) => {
                update(child, json)
                    .wrap_err_with(|| format!("failed to update `{type_name}/{name}`"))?;
            }
            Member::Service(_) => bail!("`{type_name}/{name}` is a service"),
        }
    }

    Ok(())
}

/// Convert a flattened type name into a topic type,
/// e.g. `std_msgs__msg__String` into `std_msgs/msg/String`.
pub fn topic_type(type_name: &str) -> String {
    type_name.replace(PRIVATE_MARKER, "/")
}
