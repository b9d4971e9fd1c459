use rand::{Rng, SeedableRng, rngs::StdRng};
use topicmap_core::{Object, Value};

/// The `TestRosAbastractBase` object with two publish members, one
/// subscribe member and one service.
#[allow(dead_code)]
pub fn test_object() -> Object {
    Object::builder("TestRosAbastractBase")
        .declare("name", Value::from("It is a test."))
        .declare("time", Value::from(154541352))
        .declare("_weather", Value::Null)
        .service("who_I_am", |this, _args| {
            Ok(format!("{} {}", this.data("name")?, this.data("time")?).into())
        })
        .build()
        .unwrap()
}

/// The `RosRoot` tree holding [test_object] under `test`.
#[allow(dead_code)]
pub fn ros_root() -> Object {
    Object::builder("RosRoot")
        .child("test", test_object())
        .build()
        .unwrap()
}

/// Summary of what a randomly generated tree is expected to expose.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct Expected {
    pub publish: Vec<String>,
    pub subscribe: Vec<String>,
    pub services: Vec<String>,
    pub hidden: Vec<String>,
}

/// Generate a random tree. Members are named `m<n>` with a convention
/// prefix chosen at random, so the expected classification of every leaf
/// is known up front.
#[allow(dead_code)]
pub fn random_tree(seed: u64, depth: usize) -> (Object, Expected) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut expected = Expected::default();
    let mut counter = 0;
    let object = random_object(
        &mut rng,
        &mut counter,
        "Root",
        "Root",
        Kind::Public,
        depth,
        &mut expected,
    );
    (object, expected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Public,
    Subscribe,
    Hidden,
}

fn random_object(
    rng: &mut StdRng,
    counter: &mut usize,
    type_name: &str,
    prefix: &str,
    inherited: Kind,
    depth: usize,
    expected: &mut Expected,
) -> Object {
    let mut builder = Object::builder(type_name);
    let width = rng.random_range(1..=4_usize);

    for _ in 0..width {
        *counter += 1;
        let (declared, name, kind) = match rng.random_range(0..4) {
            0 => (format!("_m{counter}"), format!("m{counter}"), Kind::Subscribe),
            1 => (format!("__m{counter}"), format!("__m{counter}"), Kind::Hidden),
            _ => (format!("m{counter}"), format!("m{counter}"), Kind::Public),
        };
        let kind = match (inherited, kind) {
            (Kind::Hidden, _) | (_, Kind::Hidden) => Kind::Hidden,
            (Kind::Subscribe, _) | (_, Kind::Subscribe) => Kind::Subscribe,
            _ => Kind::Public,
        };
        let path = format!("{prefix}/{name}");

        match rng.random_range(0..3) {
            0 if depth > 0 => {
                let child = random_object(
                    rng,
                    counter,
                    &format!("T{counter}"),
                    &path,
                    kind,
                    depth - 1,
                    expected,
                );
                builder = builder.declare(&declared, child);
            }
            1 => {
                builder = builder.service(declared.clone(), |_, args| {
                    Ok(args.get(0).cloned().unwrap_or_default())
                });
                // A service keeps its declared name; the convention
                // only applies to data and objects.
                let path = format!("{prefix}/{declared}");
                match kind {
                    Kind::Hidden => expected.hidden.push(path),
                    _ => expected.services.push(path),
                }
            }
            _ => {
                let value = Value::from(rng.random_range(0..1000_i64));
                builder = builder.declare(&declared, value);
                match kind {
                    Kind::Public => expected.publish.push(path),
                    Kind::Subscribe => expected.subscribe.push(path),
                    Kind::Hidden => expected.hidden.push(path),
                }
            }
        }
    }

    builder.build().unwrap()
}
