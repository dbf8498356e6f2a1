//! Test registry.
//!
//! Accumulates descriptors in registration order. Each incoming partial is
//! layered as `defaults ← extends[0] ← extends[1] ← … ← own fields` before it
//! is deserialized into a [`TestDescriptor`].

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use sequent_domain::{DomainError, TestDescriptor};

use crate::error::ApplicationResult;
use crate::merge::{merge_layers, merge_maps};

/// Ordered list of registered descriptors plus the partials they inherit from.
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    defaults: Map<String, Value>,
    fragments: IndexMap<String, Map<String, Value>>,
    descriptors: Vec<TestDescriptor>,
}

impl TestRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial into the run-wide default payload.
    ///
    /// Defaults apply to descriptors registered afterwards.
    ///
    /// # Errors
    /// Returns a configuration error if `partial` is not an object.
    pub fn set_defaults(&mut self, partial: Value) -> ApplicationResult<()> {
        let partial = expect_object(partial, "defaults")?;
        merge_maps(&mut self.defaults, &partial);
        Ok(())
    }

    /// Defines (or replaces) a named extension fragment.
    ///
    /// # Errors
    /// Returns a configuration error if `partial` is not an object.
    pub fn define_fragment(&mut self, name: impl Into<String>, partial: Value) -> ApplicationResult<()> {
        let name = name.into();
        let partial = expect_object(partial, &format!("fragment '{name}'"))?;
        self.fragments.insert(name, partial);
        Ok(())
    }

    /// Registers descriptors in order.
    ///
    /// Descriptors before a rejected one stay registered.
    ///
    /// # Errors
    /// Returns a configuration error for the first malformed descriptor.
    pub fn register(&mut self, descriptors: impl IntoIterator<Item = Value>) -> ApplicationResult<()> {
        for descriptor in descriptors {
            self.load(descriptor)?;
        }
        Ok(())
    }

    /// Registers a single descriptor.
    ///
    /// # Errors
    /// Returns a configuration error if the partial is not an object, names
    /// an unknown fragment or does not describe a valid descriptor.
    pub fn load(&mut self, partial: Value) -> ApplicationResult<&TestDescriptor> {
        let index = self.descriptors.len();
        let own = expect_object(partial, &format!("descriptor #{index}"))?;

        let mut layers = vec![&self.defaults];
        for name in extends_of(&own)? {
            let fragment = self
                .fragments
                .get(&name)
                .ok_or(DomainError::UnknownFragment(name))?;
            layers.push(fragment);
        }
        layers.push(&own);

        let merged = Value::Object(merge_layers(layers));
        let descriptor: TestDescriptor = serde_json::from_value(merged).map_err(|e| {
            DomainError::InvalidDescriptor(format!("descriptor #{index}: {e}"))
        })?;

        debug!(index, title = %descriptor.title, "descriptor registered");
        self.descriptors.push(descriptor);
        Ok(&self.descriptors[index])
    }

    /// Registers an already-typed descriptor.
    ///
    /// Its `title`, `method`, `url` and `expect` are always serialized, so they
    /// override whatever the defaults or fragments say.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn push(&mut self, descriptor: &TestDescriptor) -> ApplicationResult<&TestDescriptor> {
        let partial = serde_json::to_value(descriptor)
            .map_err(|e| DomainError::InvalidDescriptor(e.to_string()))?;
        self.load(partial)
    }

    /// Registered descriptors in execution order.
    #[must_use]
    pub fn descriptors(&self) -> &[TestDescriptor] {
        &self.descriptors
    }

    /// Consumes the registry and returns its descriptors.
    #[must_use]
    pub fn into_descriptors(self) -> Vec<TestDescriptor> {
        self.descriptors
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn expect_object(value: Value, what: &str) -> Result<Map<String, Value>, DomainError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::InvalidDescriptor(format!(
            "{what} must be an object, got {}",
            sequent_domain::ValueType::of(&other)
        ))),
    }
}

fn extends_of(partial: &Map<String, Value>) -> Result<Vec<String>, DomainError> {
    match partial.get("extends") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(name)) => Ok(vec![name.clone()]),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str().map(str::to_string).ok_or_else(|| {
                    DomainError::InvalidDescriptor(format!("extends entry {name} is not a string"))
                })
            })
            .collect(),
        Some(other) => Err(DomainError::InvalidDescriptor(format!(
            "extends must be a list of fragment names, got {other}"
        ))),
    }
}
