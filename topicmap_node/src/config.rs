//! Configuration parsing and validation for the topicmap node.

use eyre::{Result, WrapErr, bail, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};
use topicmap_core::{Object, Value, Visibility, is_reserved, path::SEPARATOR};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The root object of the namespace.
    pub root: ObjectConfig,

    /// Report formatting.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        for name in self.root.members.keys() {
            if is_reserved(name) {
                bail!("Root member `{name}` uses a reserved name");
            }
        }

        self.root.validate(&self.root.type_name)?;

        Ok(())
    }
}

/// Configuration for an object.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    /// The type name of the object.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Members in declaration order. Visibility follows the naming
    /// convention.
    #[serde(default)]
    pub members: IndexMap<String, MemberConfig>,
}

impl ObjectConfig {
    fn validate(&self, path: &str) -> Result<()> {
        ensure!(
            !self.type_name.is_empty(),
            "Type name at `{path}` cannot be empty"
        );

        let mut seen = HashSet::with_capacity(self.members.len());
        for (name, member) in &self.members {
            ensure!(!name.is_empty(), "Member name at `{path}` cannot be empty");
            ensure!(
                !name.contains(SEPARATOR),
                "Member name `{name}` at `{path}` cannot contain `{SEPARATOR}`"
            );

            // `weather` and `_weather` address the same slot.
            let (_, addressed) = Visibility::classify(name);
            ensure!(
                seen.insert(addressed),
                "Member `{name}` at `{path}` collides with another member named `{addressed}`"
            );

            if let MemberConfig::Object(child) = member {
                child.validate(&format!("{path}{SEPARATOR}{name}"))?;
            }
        }

        Ok(())
    }

    /// Build the declared object tree.
    pub fn to_object(&self) -> Result<Object> {
        let mut builder = Object::builder(&self.type_name);

        for (name, member) in &self.members {
            builder = match member {
                MemberConfig::Data(value) => builder.declare(name, value.clone()),
                MemberConfig::Object(child) => {
                    let child = child
                        .to_object()
                        .wrap_err_with(|| format!("Invalid member `{name}`"))?;
                    builder.declare(name, child)
                }
            };
        }

        builder
            .build()
            .wrap_err_with(|| format!("Invalid object `{}`", self.type_name))
    }
}

/// A member is either a nested object or a primitive value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberConfig {
    Object(ObjectConfig),
    Data(Value),
}

/// Report formatting options.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Strip the root type name from listed paths.
    #[serde(default = "default_strip_root")]
    pub strip_root: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            strip_root: default_strip_root(),
        }
    }
}

fn default_strip_root() -> bool {
    true
}
