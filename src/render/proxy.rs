use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::Vec3;

/// Values the render surface reads to draw the proxy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProxyProps {
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
}

impl Default for ProxyProps {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: false,
        }
    }
}

/// Identity of the underlying render object. Stable for the lifetime of a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ProxyObjectId(pub u64);

#[derive(Clone, Debug, Default)]
pub struct RegisterOpts {
    /// Registry key. Defaults to the registration id.
    pub key: Option<String>,
    /// Persistent registrations are never removed when their handles drop.
    pub persistent: bool,
}

impl RegisterOpts {
    pub fn persistent(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            persistent: true,
        }
    }
}

/// Read-only view of one registration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProxySnapshot {
    pub key: String,
    pub id: String,
    pub object: ProxyObjectId,
    pub props: ProxyProps,
    pub persistent: bool,
    pub updates: u64,
}

#[derive(Debug)]
struct ProxyEntry {
    id: String,
    object: ProxyObjectId,
    props: ProxyProps,
    persistent: bool,
    holders: usize,
    updates: u64,
}

#[derive(Debug, Default)]
struct RegistryInner {
    entries: BTreeMap<String, ProxyEntry>,
    next_object: u64,
    created: u64,
}

/// Keyed registry of render objects shared by the writers (interpolation loops) and the render
/// surface (reader).
///
/// Registering a key that already exists reuses its object, so a view that unmounts and mounts
/// again keeps feeding the same object instead of creating a new one.
#[derive(Clone, Debug, Default)]
pub struct ProxyRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ProxyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        id: impl Into<String>,
        initial: ProxyProps,
        opts: RegisterOpts,
    ) -> ProxyHandle {
        let id = id.into();
        let key = opts.key.unwrap_or_else(|| id.clone());
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let object = match inner.entries.get_mut(&key) {
            Some(entry) => {
                // Identity depends on the key only; props and flags are refreshed.
                entry.id = id;
                entry.props = initial;
                entry.persistent |= opts.persistent;
                entry.holders += 1;
                tracing::debug!(key = %key, object = entry.object.0, "proxy registration reused");
                entry.object
            }
            None => {
                let object = ProxyObjectId(inner.next_object);
                inner.next_object += 1;
                inner.created += 1;
                inner.entries.insert(
                    key.clone(),
                    ProxyEntry {
                        id,
                        object,
                        props: initial,
                        persistent: opts.persistent,
                        holders: 1,
                        updates: 0,
                    },
                );
                tracing::debug!(key = %key, object = object.0, "proxy registration created");
                object
            }
        };
        drop(guard);

        ProxyHandle {
            registry: self.clone(),
            key,
            object,
        }
    }

    pub fn get(&self, key: &str) -> Option<ProxySnapshot> {
        let inner = self.inner.borrow();
        inner.entries.get(key).map(|e| snapshot_of(key, e))
    }

    /// All registrations in key order.
    pub fn snapshot(&self) -> Vec<ProxySnapshot> {
        let inner = self.inner.borrow();
        inner
            .entries
            .iter()
            .map(|(k, e)| snapshot_of(k, e))
            .collect()
    }

    /// Registrations the surface should draw this frame.
    pub fn visible(&self) -> Vec<ProxySnapshot> {
        self.snapshot()
            .into_iter()
            .filter(|s| s.props.visible)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of render objects ever created by this registry.
    pub fn objects_created(&self) -> u64 {
        self.inner.borrow().created
    }

    fn update(&self, key: &str, object: ProxyObjectId, props: ProxyProps) {
        let mut inner = self.inner.borrow_mut();
        if let Some(entry) = inner.entries.get_mut(key)
            && entry.object == object
        {
            entry.props = props;
            entry.updates += 1;
        }
    }

    fn release(&self, key: &str, object: ProxyObjectId) {
        let mut inner = self.inner.borrow_mut();
        let Some(entry) = inner.entries.get_mut(key) else {
            return;
        };
        if entry.object != object {
            return;
        }
        entry.holders = entry.holders.saturating_sub(1);
        if entry.holders == 0 && !entry.persistent {
            inner.entries.remove(key);
            tracing::debug!(key = %key, object = object.0, "proxy registration disposed");
        }
    }
}

fn snapshot_of(key: &str, e: &ProxyEntry) -> ProxySnapshot {
    ProxySnapshot {
        key: key.to_owned(),
        id: e.id.clone(),
        object: e.object,
        props: e.props,
        persistent: e.persistent,
        updates: e.updates,
    }
}

/// Writer side of a registration. Dropping it releases the registration; persistent registrations
/// stay in the registry.
#[derive(Debug)]
pub struct ProxyHandle {
    registry: ProxyRegistry,
    key: String,
    object: ProxyObjectId,
}

impl ProxyHandle {
    pub fn update(&self, props: ProxyProps) {
        self.registry.update(&self.key, self.object, props);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn object(&self) -> ProxyObjectId {
        self.object
    }
}

impl Drop for ProxyHandle {
    fn drop(&mut self) {
        self.registry.release(&self.key, self.object);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/proxy.rs"]
mod tests;
