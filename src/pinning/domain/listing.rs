//! Merged pin listings and backend info maps.

use super::{ContentId, Designator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from pinned CID to the designators of backends holding it.
///
/// Designators appear at most once per CID and keep insertion order, so
/// merging listings in backend order yields a deterministic view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CidList(BTreeMap<ContentId, Vec<Designator>>);

impl CidList {
    /// Creates an empty listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a listing in which one designator holds every given CID.
    #[must_use]
    pub fn held_by(designator: &Designator, cids: impl IntoIterator<Item = ContentId>) -> Self {
        let mut list = Self::new();
        for cid in cids {
            list.insert(cid, designator.clone());
        }
        list
    }

    /// Records that `designator` holds a pin for `cid`.
    pub fn insert(&mut self, cid: ContentId, designator: Designator) {
        let holders = self.0.entry(cid).or_default();
        if !holders.contains(&designator) {
            holders.push(designator);
        }
    }

    /// Folds another listing into this one.
    pub fn merge(&mut self, other: Self) {
        for (cid, designators) in other.0 {
            for designator in designators {
                self.insert(cid.clone(), designator);
            }
        }
    }

    /// Returns the designators holding `cid`, if any.
    #[must_use]
    pub fn holders(&self, cid: &ContentId) -> Option<&[Designator]> {
        self.0.get(cid).map(Vec::as_slice)
    }

    /// Returns the number of distinct CIDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no CID is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over CIDs and their holders in CID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContentId, &[Designator])> {
        self.0
            .iter()
            .map(|(cid, designators)| (cid, designators.as_slice()))
    }
}

/// Backend-reported metadata keyed by backend identity.
///
/// Values are opaque to the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinningInfo(BTreeMap<String, Value>);

impl PinningInfo {
    /// Creates an empty info map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an info map with a single backend entry.
    #[must_use]
    pub fn single(backend_id: impl Into<String>, value: Value) -> Self {
        let mut info = Self::new();
        info.insert(backend_id, value);
        info
    }

    /// Sets the metadata reported by one backend.
    pub fn insert(&mut self, backend_id: impl Into<String>, value: Value) {
        self.0.insert(backend_id.into(), value);
    }

    /// Folds another info map into this one. Later entries win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the metadata reported by a backend.
    #[must_use]
    pub fn get(&self, backend_id: &str) -> Option<&Value> {
        self.0.get(backend_id)
    }

    /// Returns the number of backends with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no backend has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over backend identities in sorted order.
    pub fn backend_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
