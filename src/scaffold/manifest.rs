//! `package.json` editing.
//!
//! Key order is preserved (`serde_json` with `preserve_order`) so a rewrite
//! only changes the fields it touches.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "devDependencies"];

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Invalid JSON")?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => bail!("Top-level value is not an object"),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Pretty JSON, two-space indent, trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.fields)?;
        text.push('\n');
        Ok(text)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn license(&self) -> Option<&str> {
        self.fields.get("license").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields.insert("name".to_string(), Value::String(name.to_string()));
    }

    pub fn set_license(&mut self, spdx: &str) {
        self.fields.insert("license".to_string(), Value::String(spdx.to_string()));
    }

    /// Whether `package` is declared as a runtime or dev dependency.
    pub fn has_dependency(&self, package: &str) -> bool {
        DEPENDENCY_SECTIONS.iter().any(|section| {
            self.fields
                .get(*section)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(package))
        })
    }

    /// Drop `package` from every dependency section. Returns whether anything was removed.
    pub fn remove_dependency(&mut self, package: &str) -> bool {
        let mut removed = false;
        for section in DEPENDENCY_SECTIONS {
            if let Some(deps) = self.fields.get_mut(section).and_then(Value::as_object_mut) {
                // shift_remove keeps the remaining entries in order
                removed |= deps.shift_remove(package).is_some();
            }
        }
        removed
    }
}
