//! The identity-keyed store of live instances.

use std::collections::HashMap;

use log::debug;

use crate::error::PresentationError;
use crate::instance::{Cadence, PresentationInstance};
use crate::key::InstanceKey;
use crate::sink::PresentationSink;

/// At most one live instance per key; re-registration merges into the
/// existing instance instead of duplicating it. Constructed once at
/// startup and passed by reference into every builder; there is no
/// global registry.
#[derive(Debug, Default)]
pub struct Registry {
    instances: HashMap<InstanceKey, PresentationInstance>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create-or-merge registration. When `key` is vacant, `create` builds
    /// the instance; when occupied, `merge` folds the new configuration
    /// into the existing one. Either way the returned reference is the
    /// live, current instance, never a pre-insert value.
    pub fn register_with(
        &mut self,
        key: InstanceKey,
        create: impl FnOnce() -> PresentationInstance,
        merge: impl FnOnce(&mut PresentationInstance),
    ) -> &mut PresentationInstance {
        match self.instances.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                debug!("merging configuration into {}", entry.key());
                let instance = entry.into_mut();
                merge(instance);
                instance
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                debug!("registering {}", entry.key());
                entry.insert(create())
            }
        }
    }

    pub fn lookup(&self, key: &InstanceKey) -> Option<&PresentationInstance> {
        self.instances.get(key)
    }

    pub fn lookup_mut(&mut self, key: &InstanceKey) -> Option<&mut PresentationInstance> {
        self.instances.get_mut(key)
    }

    pub fn contains(&self, key: &InstanceKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &InstanceKey> {
        self.instances.keys()
    }

    /// Direct map removal. Lifecycle code goes through `stop`; this exists
    /// for hosts discarding instances of a disconnected viewer wholesale.
    pub fn remove(&mut self, key: &InstanceKey) -> Option<PresentationInstance> {
        self.instances.remove(key)
    }

    /// Instances of one cadence, iteration order unspecified.
    pub(crate) fn iter_cadence_mut(
        &mut self,
        cadence: Cadence,
    ) -> impl Iterator<Item = &mut PresentationInstance> {
        self.instances
            .values_mut()
            .filter(move |instance| instance.cadence() == cadence)
    }

    /// Stop an instance: fire its stop event, restore and clear all
    /// viewers, then remove it from the registry. Returns false when a
    /// vetoable stop was cancelled (the instance stays live).
    pub fn stop(
        &mut self,
        key: &InstanceKey,
        sink: &mut dyn PresentationSink,
    ) -> Result<bool, PresentationError> {
        let instance =
            self.instances
                .get_mut(key)
                .ok_or_else(|| PresentationError::InstanceNotFound {
                    key: key.to_string(),
                })?;
        if !instance.stop_internal(sink) {
            return Ok(false);
        }
        debug!("removing stopped {key}");
        self.instances.remove(key);
        Ok(true)
    }
}
