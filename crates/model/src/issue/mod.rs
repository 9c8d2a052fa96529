//! Structural view over issues returned by the tracker's search API.
//!
//! The payload is owned by the upstream service and its shape drifts with
//! project configuration (custom fields, optional objects), so an issue is
//! kept as a JSON tree and every accessor is a chain of option-returning
//! lookups. A missing link anywhere yields `None`, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

pub mod path;

pub use path::lookup;

/// One page of search results. A body without `issues` is an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

impl SearchPage {
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawIssue(Json);

impl RawIssue {
    pub fn new(json: Json) -> Self {
        Self(json)
    }

    /// Issue key, e.g. `OI-1234`.
    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Json::as_str)
    }

    /// Looks up a value under `fields` by dotted path segments.
    pub fn field(&self, path: &[&str]) -> Option<&Json> {
        lookup(self.0.get("fields")?, path)
    }

    /// String leaf under `fields`. Non-string leaves yield `None`.
    pub fn field_str(&self, path: &[&str]) -> Option<&str> {
        self.field(path).and_then(Json::as_str)
    }

    /// Array under `fields`, empty when absent or not an array.
    pub fn field_array(&self, path: &[&str]) -> &[Json] {
        self.field(path)
            .and_then(Json::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Change history in the order the upstream returned it.
    pub fn histories(&self) -> impl Iterator<Item = HistoryEntry<'_>> {
        lookup(&self.0, &["changelog", "histories"])
            .and_then(Json::as_array)
            .into_iter()
            .flatten()
            .map(HistoryEntry)
    }
}

/// A single changelog entry: a timestamp plus the field changes it made.
#[derive(Debug, Clone, Copy)]
pub struct HistoryEntry<'a>(&'a Json);

impl<'a> HistoryEntry<'a> {
    pub fn created(&self) -> Option<&'a str> {
        self.0.get("created").and_then(Json::as_str)
    }

    pub fn items(self) -> impl Iterator<Item = ChangeItem<'a>> {
        self.0
            .get("items")
            .and_then(Json::as_array)
            .into_iter()
            .flatten()
            .map(ChangeItem)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChangeItem<'a>(&'a Json);

impl<'a> ChangeItem<'a> {
    /// Name of the changed field, e.g. `status`.
    pub fn field(&self) -> Option<&'a str> {
        self.0.get("field").and_then(Json::as_str)
    }

    /// Display form of the new value.
    pub fn to_string_value(&self) -> Option<&'a str> {
        self.0.get("toString").and_then(Json::as_str)
    }
}
