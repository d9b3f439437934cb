//! Parameter lists - ordered, type-heterogeneous values

use std::slice;

use herald_core::{HeraldError, HeraldResult, Streamable, ValueBox};
use herald_wire::{Format, SimpleFormat};

use crate::TypeRegistry;

/// Ordered sequence of boxed values passed from a trigger to its handlers
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterList {
    items: Vec<ValueBox>,
}

impl ParameterList {
    pub fn new() -> Self {
        ParameterList::default()
    }

    /// Append `value` and make its type resolvable through the global registry
    pub fn add<T: Streamable>(&mut self, value: T) {
        self.add_in(TypeRegistry::global(), value);
    }

    /// Append `value` and register its type in `registry`
    pub fn add_in<T: Streamable>(&mut self, registry: &TypeRegistry, value: T) {
        let item = ValueBox::new(value);
        if let Err(e) = registry.register(T::TAG, &item) {
            // Fails only for an empty TAG
            tracing::warn!(tag = T::TAG, error = %e, "type not registered");
        }
        self.items.push(item);
    }

    /// Builder form of [`ParameterList::add`]
    pub fn with<T: Streamable>(mut self, value: T) -> Self {
        self.add(value);
        self
    }

    /// Append a box as-is, without touching any registry
    pub fn push(&mut self, item: ValueBox) {
        self.items.push(item);
    }

    /// Typed positional access
    pub fn at<T: Streamable>(&self, index: usize) -> HeraldResult<T> {
        self.items
            .get(index)
            .ok_or(HeraldError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?
            .get::<T>()
    }

    /// Slot at `index`, if any
    pub fn get(&self, index: usize) -> Option<&ValueBox> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ValueBox> {
        self.items.iter()
    }

    /// Tags of every element, in order
    pub fn tags(&self) -> HeraldResult<Vec<String>> {
        self.items
            .iter()
            .map(|item| item.tag().map(str::to_string))
            .collect()
    }

    /// Serialize with the default [`SimpleFormat`]
    pub fn serialize(&self) -> HeraldResult<String> {
        self.serialize_with(&SimpleFormat::default())
    }

    pub fn serialize_with(&self, format: &dyn Format) -> HeraldResult<String> {
        let tags = self.tags()?;
        let values = self
            .items
            .iter()
            .map(ValueBox::to_text)
            .collect::<HeraldResult<Vec<_>>>()?;
        format.encode(&tags, &values)
    }

    /// Replace the contents from text in the default [`SimpleFormat`],
    /// resolving tags through the global registry
    pub fn deserialize(&mut self, text: &str) -> HeraldResult<()> {
        self.deserialize_with(text, &SimpleFormat::default(), TypeRegistry::global())
    }

    /// Replace the contents from `text`
    ///
    /// Either every element decodes and the list is replaced, or the
    /// list is left as it was.
    pub fn deserialize_with(
        &mut self,
        text: &str,
        format: &dyn Format,
        registry: &TypeRegistry,
    ) -> HeraldResult<()> {
        let (tags, values) = format.decode(text)?;
        let mut items = Vec::with_capacity(tags.len());
        for (tag, value) in tags.iter().zip(&values) {
            let mut seed = registry.lookup(tag)?;
            seed.from_text(value)?;
            items.push(seed);
        }

        tracing::trace!(format = format.name(), count = items.len(), "parameters decoded");
        self.items = items;
        Ok(())
    }

    /// Build a list from text in the default [`SimpleFormat`]
    pub fn parse(text: &str) -> HeraldResult<Self> {
        let mut list = ParameterList::new();
        list.deserialize(text)?;
        Ok(list)
    }

    /// Make every type in this list resolvable through `registry`
    pub fn register_types_in(&self, registry: &TypeRegistry) -> HeraldResult<()> {
        for item in &self.items {
            registry.register(item.tag()?, item)?;
        }
        Ok(())
    }
}

impl FromIterator<ValueBox> for ParameterList {
    fn from_iter<I: IntoIterator<Item = ValueBox>>(iter: I) -> Self {
        ParameterList {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a ValueBox;
    type IntoIter = slice::Iter<'a, ValueBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
