//! # Persistent Tag Format
//!
//! Structured, NBT-style tags for durable cluster state.
//!
//! A [`Compound`] is an ordered string-keyed map of [`TagValue`]s. Elements
//! write their own opaque content into the compound the cluster hands them;
//! the cluster only fixes the record envelope (type id, metadata, content).
//!
//! Compounds serialize to bytes with `bincode`. This is not a general object
//! graph serializer: the value enum is deliberately small and closed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// A single persistent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Byte(u8),
    Int(i32),
    Long(i64),
    Str(String),
    ByteArray(Vec<u8>),
    List(Vec<TagValue>),
    Compound(Compound),
}

/// String-keyed collection of tag values. Iteration order is the key order,
/// which keeps serialized output deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Compound {
    entries: BTreeMap<String, TagValue>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: TagValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_byte(&mut self, key: impl Into<String>, value: u8) {
        self.set(key, TagValue::Byte(value));
    }

    /// Reads a byte value; missing or mistyped keys are decode failures.
    pub fn byte(&self, key: &str) -> Result<u8> {
        match self.require(key)? {
            TagValue::Byte(value) => Ok(*value),
            _ => Err(wrong_type(key, "byte")),
        }
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i32) {
        self.set(key, TagValue::Int(value));
    }

    pub fn int(&self, key: &str) -> Result<i32> {
        match self.require(key)? {
            TagValue::Int(value) => Ok(*value),
            _ => Err(wrong_type(key, "int")),
        }
    }

    pub fn set_long(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, TagValue::Long(value));
    }

    pub fn long(&self, key: &str) -> Result<i64> {
        match self.require(key)? {
            TagValue::Long(value) => Ok(*value),
            _ => Err(wrong_type(key, "long")),
        }
    }

    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, TagValue::Str(value.into()));
    }

    pub fn str(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            TagValue::Str(value) => Ok(value),
            _ => Err(wrong_type(key, "string")),
        }
    }

    pub fn set_byte_array(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.set(key, TagValue::ByteArray(value));
    }

    pub fn byte_array(&self, key: &str) -> Result<&[u8]> {
        match self.require(key)? {
            TagValue::ByteArray(value) => Ok(value),
            _ => Err(wrong_type(key, "byte array")),
        }
    }

    pub fn set_list(&mut self, key: impl Into<String>, value: Vec<TagValue>) {
        self.set(key, TagValue::List(value));
    }

    pub fn list(&self, key: &str) -> Result<&[TagValue]> {
        match self.require(key)? {
            TagValue::List(value) => Ok(value),
            _ => Err(wrong_type(key, "list")),
        }
    }

    pub fn set_compound(&mut self, key: impl Into<String>, value: Compound) {
        self.set(key, TagValue::Compound(value));
    }

    pub fn compound(&self, key: &str) -> Result<&Compound> {
        match self.require(key)? {
            TagValue::Compound(value) => Ok(value),
            _ => Err(wrong_type(key, "compound")),
        }
    }

    /// Serializes the compound for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ClusterError::Serialization(e.to_string()))
    }

    /// Restores a compound previously written by [`Compound::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ClusterError::Serialization(e.to_string()))
    }

    fn require(&self, key: &str) -> Result<&TagValue> {
        self.entries
            .get(key)
            .ok_or_else(|| ClusterError::MissingTag(key.to_string()))
    }
}

fn wrong_type(key: &str, expected: &'static str) -> ClusterError {
    ClusterError::WrongTagType {
        key: key.to_string(),
        expected,
    }
}
