//! Storage of normalized frequency specs.
//!
//! The store is the single source of truth for every frequency parameter that
//! has ever been active. It never validates or sorts; those passes live in
//! [`validation`](super::validation) and [`sort`](super::sort).

use std::collections::BTreeMap;

use crate::error::{FreqSpecError, Result};
use super::name::FreqSpecName;

/// Ordered list of the parameter names relevant to the current filter design.
///
/// The position of a name is its slot. Slots decide display order and which
/// name receives which value after sorting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSpecSet {
    names: Vec<FreqSpecName>,
}

impl ActiveSpecSet {
    /// Creates an active set from validated names.
    pub fn new(names: Vec<FreqSpecName>) -> Self {
        Self { names }
    }

    /// Parses every name, failing on the first invalid one.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let names = names
            .iter()
            .map(|n| FreqSpecName::new(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { names })
    }

    /// Names in slot order.
    pub fn names(&self) -> &[FreqSpecName] {
        &self.names
    }

    /// Iterates over names in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &FreqSpecName> {
        self.names.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no parameters are active.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot index of `name`, if active.
    pub fn position(&self, name: &FreqSpecName) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns true if `name` occupies a slot.
    pub fn contains(&self, name: &FreqSpecName) -> bool {
        self.position(name).is_some()
    }
}

/// Normalized values of all frequency parameters, keyed by name.
///
/// Parameters are created on first write and kept for the lifetime of the
/// store, so a parameter that drops out of the active set keeps its value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecStore {
    values: BTreeMap<FreqSpecName, f64>,
}

impl SpecStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the normalized value of `name`.
    pub fn get(&self, name: &FreqSpecName) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| FreqSpecError::NotFound(name.to_string()))
    }

    /// Stores a normalized value, creating the parameter if needed.
    pub fn set(&mut self, name: FreqSpecName, normalized: f64) {
        self.values.insert(name, normalized);
    }

    /// Returns the stored value, inserting `default` first if `name` is new.
    pub fn get_or_insert(&mut self, name: &FreqSpecName, default: f64) -> f64 {
        *self.values.entry(name.clone()).or_insert(default)
    }

    /// Values of the active parameters in slot order.
    pub fn get_active(&self, active: &ActiveSpecSet) -> Result<Vec<f64>> {
        active.iter().map(|name| self.get(name)).collect()
    }

    /// Writes `values[i]` to the parameter in slot `i`.
    ///
    /// `values` must have one entry per slot.
    pub fn set_active(&mut self, active: &ActiveSpecSet, values: &[f64]) {
        debug_assert_eq!(active.len(), values.len(), "one value per active slot");
        for (name, &value) in active.iter().zip(values) {
            self.values.insert(name.clone(), value);
        }
    }

    /// Iterates over all stored parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&FreqSpecName, f64)> {
        self.values.iter().map(|(name, &value)| (name, value))
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FreqSpecName, f64)> for SpecStore {
    fn from_iter<I: IntoIterator<Item = (FreqSpecName, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
