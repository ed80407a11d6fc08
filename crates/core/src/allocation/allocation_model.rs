//! Allocation models: target percentages, lock sets and validation status.

use std::collections::hash_map;
use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::Asset;
use crate::constants::FULL_ALLOCATION;

/// Target percentage (0-100) per asset id.
///
/// A committed allocation sums to 100 within a small tolerance. While the user
/// is editing, the sum may sit anywhere at or below 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationMap(HashMap<String, Decimal>);

impl AllocationMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builds a map with exactly one entry per asset, copying values from
    /// `source` and defaulting missing ids to zero. Ids in `source` that are
    /// not in `assets` are dropped.
    pub fn for_assets(assets: &[Asset], source: &AllocationMap) -> Self {
        assets
            .iter()
            .map(|asset| (asset.id.clone(), source.get(&asset.id)))
            .collect()
    }

    /// Allocation for an id, zero when absent.
    pub fn get(&self, asset_id: &str) -> Decimal {
        self.0.get(asset_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, asset_id: impl Into<String>, percentage: Decimal) {
        self.0.insert(asset_id.into(), percentage);
    }

    pub fn remove(&mut self, asset_id: &str) -> Option<Decimal> {
        self.0.remove(asset_id)
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.0.contains_key(asset_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Decimal> {
        self.0.iter()
    }

    /// Sum of every allocation in the map.
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Whether the allocation sums to 100 within `tolerance`.
    pub fn is_valid(&self, tolerance: Decimal) -> bool {
        (self.total() - FULL_ALLOCATION).abs() <= tolerance
    }

    pub fn status(&self, tolerance: Decimal) -> AllocationStatus {
        AllocationStatus::from_total(self.total(), tolerance)
    }

    pub fn into_inner(self) -> HashMap<String, Decimal> {
        self.0
    }
}

impl From<HashMap<String, Decimal>> for AllocationMap {
    fn from(map: HashMap<String, Decimal>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Decimal)> for AllocationMap {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AllocationMap {
    type Item = (&'a String, &'a Decimal);
    type IntoIter = hash_map::Iter<'a, String, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Asset ids whose allocation must not move during an edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockSet(HashSet<String>);

impl LockSet {
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.0.contains(asset_id)
    }

    pub fn lock(&mut self, asset_id: impl Into<String>) {
        self.0.insert(asset_id.into());
    }

    pub fn unlock(&mut self, asset_id: &str) {
        self.0.remove(asset_id);
    }

    /// Flips the lock state of an asset and returns whether it is now locked.
    pub fn toggle(&mut self, asset_id: &str) -> bool {
        if self.0.remove(asset_id) {
            false
        } else {
            self.0.insert(asset_id.to_string());
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for LockSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Validation summary shown next to the allocation editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStatus {
    /// Sum of all allocations
    pub total: Decimal,
    /// Percentage still to distribute (negative when over-allocated)
    pub remaining: Decimal,
    /// Total is 100 within tolerance
    pub is_valid: bool,
    /// Total exceeds 100 by more than the tolerance
    pub is_over_allocated: bool,
}

impl AllocationStatus {
    pub fn from_total(total: Decimal, tolerance: Decimal) -> Self {
        let remaining = FULL_ALLOCATION - total;
        Self {
            total,
            remaining,
            is_valid: remaining.abs() <= tolerance,
            is_over_allocated: remaining < -tolerance,
        }
    }
}
