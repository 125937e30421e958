use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed key into a [`Blackboard`].
///
/// Keys are plain `u64` ids; the type parameter only guards accesses. Two keys with the same id
/// but different types address the same slot, which is a programming error.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlackboardError {
    #[error("blackboard type mismatch for key id={id}: requested {requested}")]
    TypeMismatch { id: u64, requested: &'static str },
}

/// Per-agent scratch memory shared by the goals of one selector.
///
/// Values must be `Send` so a selector (and its blackboard) can be ticked on any worker thread.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any + Send>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: Send + 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    /// Non-panicking read: a stored value of another type is reported as an error.
    pub fn try_get<T: 'static>(&self, key: BbKey<T>) -> Result<Option<&T>, BlackboardError> {
        match self.values.get(&key.id) {
            None => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| mismatch::<T>(key.id)),
        }
    }

    /// # Panics
    ///
    /// Panics when the slot holds a value of a different type.
    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Panics
    ///
    /// Panics when the slot holds a value of a different type.
    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        match value.downcast_mut::<T>() {
            Some(value) => Some(value),
            None => panic!("{}", mismatch::<T>(key.id)),
        }
    }

    /// Returns the stored value, inserting `make()` first when the slot is empty.
    ///
    /// # Panics
    ///
    /// Panics when the slot holds a value of a different type.
    pub fn get_or_insert_with<T: Send + 'static>(
        &mut self,
        key: BbKey<T>,
        make: impl FnOnce() -> T,
    ) -> &mut T {
        let value = self
            .values
            .entry(key.id)
            .or_insert_with(|| Box::new(make()));
        match value.downcast_mut::<T>() {
            Some(value) => value,
            None => panic!("{}", mismatch::<T>(key.id)),
        }
    }

    /// # Panics
    ///
    /// Panics when the slot holds a value of a different type.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        match value.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => panic!("{}", mismatch::<T>(key.id)),
        }
    }
}

fn mismatch<T: 'static>(id: u64) -> BlackboardError {
    BlackboardError::TypeMismatch {
        id,
        requested: type_name::<T>(),
    }
}
