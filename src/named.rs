//! Decoded tuple records
//!
//! A [`NamedTuple`] is what a tuple coder produces on decode: an ordered,
//! fixed-length sequence of field values that can also be addressed by the
//! field names the tuple was declared with. The field list is shared
//! between every tuple decoded by the same coder.
//!
//! Once built, a `NamedTuple` is read-only. The explicit [`NamedTuple::set`]
//! and [`NamedTuple::remove`] entry points exist so that callers porting
//! record-mutation code get a dedicated [`FrozenError`] rather than a
//! silent copy-and-modify.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Index;
use std::sync::Arc;

use crate::value::Value;

/// Ordered field names of a tuple type, with a name to position table.
///
/// Positions without a declared name are named by their zero-based index.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldNames {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl FieldNames {
    pub fn new(names: Vec<String>) -> Self {
        let mut lookup = HashMap::with_capacity(names.len());
        for (ix, name) in names.iter().enumerate() {
            // first declaration of a duplicated name wins
            lookup.entry(name.clone()).or_insert(ix);
        }
        Self { names, lookup }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Error returned on any attempt to modify a [`NamedTuple`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrozenError {
    Change(String),
    Delete(String),
}

impl Display for FrozenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FrozenError::Change(name) => {
                write!(f, "can not change element to a NamedTuple (field `{name}`)")
            }
            FrozenError::Delete(name) => {
                write!(f, "can not delete element to a NamedTuple (field `{name}`)")
            }
        }
    }
}

impl Error for FrozenError {}

/// Immutable record produced by decoding a tuple.
///
/// Equality compares field values in order; field names do not take part.
#[derive(Clone, Debug)]
pub struct NamedTuple {
    fields: Arc<FieldNames>,
    values: Vec<Value>,
}

impl NamedTuple {
    pub(crate) fn new(fields: Arc<FieldNames>, values: Vec<Value>) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        Self { fields, values }
    }

    /// Returns the number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the field names, in declaration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.fields.as_slice()
    }

    /// Returns the field values, in declaration order
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the value of the field called `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.position(name).map(|ix| &self.values[ix])
    }

    /// Returns the value at position `ix`
    #[must_use]
    pub fn get_index(&self, ix: usize) -> Option<&Value> {
        self.values.get(ix)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Returns the record's type label, e.g. `NamedTuple(age,adult)`
    #[must_use]
    pub fn type_name(&self) -> String {
        format!("NamedTuple({})", self.fields.as_slice().join(","))
    }

    /// Projects the record into a name to value mapping.
    ///
    /// Nested records are left as they are.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.fields
            .as_slice()
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Always fails: fields of a decoded record cannot be reassigned.
    pub fn set(&self, name: &str, _value: Value) -> Result<(), FrozenError> {
        Err(FrozenError::Change(name.to_owned()))
    }

    /// Always fails: fields of a decoded record cannot be removed.
    pub fn remove(&self, name: &str) -> Result<Value, FrozenError> {
        Err(FrozenError::Delete(name.to_owned()))
    }
}

impl PartialEq for NamedTuple {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Index<usize> for NamedTuple {
    type Output = Value;

    fn index(&self, ix: usize) -> &Value {
        &self.values[ix]
    }
}

impl Index<&str> for NamedTuple {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(v) => v,
            None => panic!("{} has no field `{name}`", self.type_name()),
        }
    }
}

impl<'a> IntoIterator for &'a NamedTuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
