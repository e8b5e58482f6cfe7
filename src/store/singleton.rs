//! Single-slot record.

/// A record that exists at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Singleton<T> {
    slot: Option<T>,
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Singleton<T> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the slot holds a value.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the stored value.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Returns the stored value mutably.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }

    /// Stores `value`, returning the value it replaced.
    pub fn set(&mut self, value: T) -> Option<T> {
        self.slot.replace(value)
    }

    /// Empties the slot, returning its value.
    pub fn remove(&mut self) -> Option<T> {
        self.slot.take()
    }
}
