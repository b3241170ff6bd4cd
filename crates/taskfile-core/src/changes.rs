//! Per-device change tracking used for synchronization reconciliation.

use crate::id::{Guid, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Changed field names per object, as seen by one device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceChanges {
    /// Device identifier.
    pub guid: Guid,
    /// Field names changed per object. An empty set records an object that is
    /// known to the device but unchanged.
    pub objects: BTreeMap<ObjectId, BTreeSet<String>>,
}

impl DeviceChanges {
    /// Empty change set for a device.
    #[must_use]
    pub fn new(guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            objects: BTreeMap::new(),
        }
    }

    /// Record that `field` of object `id` changed.
    pub fn record_change(&mut self, id: impl Into<ObjectId>, field: impl Into<String>) {
        self.objects.entry(id.into()).or_default().insert(field.into());
    }

    /// Record that object `id` is known but unchanged, clearing earlier changes.
    pub fn mark_unchanged(&mut self, id: impl Into<ObjectId>) {
        self.objects.insert(id.into(), BTreeSet::new());
    }

    /// Changed fields of one object.
    #[must_use]
    pub fn changes_of(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.objects.get(id)
    }

    /// Whether no object is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Change sets of every known device, keyed by device guid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeSets {
    devices: BTreeMap<Guid, DeviceChanges>,
}

impl ChangeSets {
    /// No devices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change set of the given device, created when missing.
    pub fn device_mut(&mut self, guid: impl Into<Guid>) -> &mut DeviceChanges {
        let guid = guid.into();
        self.devices
            .entry(guid.clone())
            .or_insert_with(|| DeviceChanges::new(guid))
    }

    /// Insert or replace a device's change set.
    pub fn insert(&mut self, changes: DeviceChanges) {
        self.devices.insert(changes.guid.clone(), changes);
    }

    /// Remove a device's change set, typically the local device before writing.
    pub fn remove(&mut self, guid: &Guid) -> Option<DeviceChanges> {
        self.devices.remove(guid)
    }

    /// Devices in ascending guid order.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceChanges> {
        self.devices.values()
    }

    /// Number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn record_and_clear_changes() {
        let mut changes = DeviceChanges::new("devA");
        changes.record_change("obj1", "subject");
        changes.record_change("obj1", "description");
        changes.record_change("obj1", "subject");
        let fields: Vec<&str> = changes
            .changes_of("obj1")
            .expect("obj1 recorded")
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(fields, ["description", "subject"]);

        changes.mark_unchanged("obj1");
        assert!(changes.changes_of("obj1").is_some_and(BTreeSet::is_empty));
    }

    #[test]
    fn devices_iterate_in_guid_order() {
        let mut sets = ChangeSets::new();
        sets.device_mut("b").record_change("x", "subject");
        sets.device_mut("a").mark_unchanged("y");
        let guids: Vec<&str> = sets.devices().map(|d| d.guid.as_str()).collect();
        assert_eq!(guids, ["a", "b"]);
        assert!(sets.remove(&Guid::new("a")).is_some());
        assert_eq!(sets.len(), 1);
    }
}
