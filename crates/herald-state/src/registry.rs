//! Type registry - tag to sample value
//!
//! Deserialization needs a correctly-typed seed whose `from_text` can be
//! called. The registry supplies that seed by tag, so the decoding site
//! never switches on concrete types.

use std::collections::HashMap;
use std::sync::OnceLock;

use herald_core::{HeraldError, HeraldResult, Streamable, ValueBox};
use parking_lot::RwLock;

static GLOBAL_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Map from type tag to a sample value of that type
#[derive(Debug, Default)]
pub struct TypeRegistry {
    samples: RwLock<HashMap<String, ValueBox>>,
}

impl TypeRegistry {
    /// Create an isolated registry
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Process-wide registry, created on first use
    pub fn global() -> &'static TypeRegistry {
        GLOBAL_REGISTRY.get_or_init(TypeRegistry::new)
    }

    /// Store a copy of `sample` under `tag`, replacing any earlier sample
    pub fn register(&self, tag: &str, sample: &ValueBox) -> HeraldResult<()> {
        if tag.is_empty() {
            return Err(HeraldError::format("empty type tag"));
        }
        if sample.is_empty() {
            return Err(HeraldError::EmptyValue);
        }

        let sample = sample.clone();
        // Released before the old sample is dropped
        let previous = self.samples.write().insert(tag.to_string(), sample);
        match previous {
            Some(old) => {
                tracing::debug!(tag, "type registry sample overwritten");
                drop(old);
            }
            None => tracing::trace!(tag, "type registered"),
        }
        Ok(())
    }

    /// Register `sample` under its own type's tag
    pub fn register_type<T: Streamable>(&self, sample: T) -> HeraldResult<()> {
        self.register(T::TAG, &ValueBox::new(sample))
    }

    /// Copy of the sample stored under `tag`
    pub fn lookup(&self, tag: &str) -> HeraldResult<ValueBox> {
        self.samples
            .read()
            .get(tag)
            .cloned()
            .ok_or_else(|| HeraldError::UnknownType(tag.to_string()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.samples.read().contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.samples.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.read().is_empty()
    }

    /// All registered tags, sorted
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.samples.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}
