use std::{collections::HashMap, fmt};

/// Opaque identifier of a native-side object.
///
/// Shims hold on to a handle and pass it back on every call into the native
/// side. The native side owns whatever the handle refers to; a shim never
/// creates or frees that object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates handles for native-side objects.
///
/// Handles are never reused within a registry, so a stale handle simply fails
/// to resolve instead of aliasing a newer object.
pub struct HandleRegistry<T> {
    entries: HashMap<Handle, T>,
    next: u64,
}

impl<T> HandleRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next: 1,
        }
    }

    pub fn insert(&mut self, value: T) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        self.entries.insert(handle, value);
        handle
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.entries.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_not_reused() {
        let mut registry = HandleRegistry::new();

        let first = registry.insert("first");
        assert_eq!(registry.remove(first), Some("first"));

        let second = registry.insert("second");
        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
        assert_eq!(registry.get(second), Some(&"second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn raw_round_trip() {
        let handle = Handle::from_raw(42);
        assert_eq!(handle.as_raw(), 42);
        assert_eq!(handle.to_string(), "#42");
    }
}
