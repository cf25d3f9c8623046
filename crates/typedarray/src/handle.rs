use std::{
    fmt, mem,
    sync::{Arc, Weak},
};

use log::debug;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{ArrayOptions, ArrayValue, Describe, Indent, Result, TypedArray, describe};

/// Shared, reference-counted handle to one [`TypedArray`].
///
/// Cloning (or [`ArrayHandle::retain`]) adds a holder, dropping (or
/// [`ArrayHandle::release`]) removes one. The count is atomic, so handles
/// may be retained and released from any thread. The array and its buffer
/// are dropped exactly once, with the last holder.
///
/// The array itself has no internal locking. The handle serializes access
/// through a reader/writer lock: take [`ArrayHandle::read`] for queries and
/// [`ArrayHandle::write`] for mutation.
#[derive(Debug)]
#[must_use = "Handle should be stored to keep the array alive"]
pub struct ArrayHandle<T: ArrayValue>(Arc<ArrayHandleInner<T>>);

#[derive(Debug)]
struct ArrayHandleInner<T: ArrayValue> {
    array: RwLock<TypedArray<T>>,
}

impl<T: ArrayValue> ArrayHandleInner<T> {
    /// What the final drop frees, or `None` if the storage was taken out.
    fn release_message(&mut self) -> Option<String> {
        let array = self.array.get_mut();
        (array.capacity() > 0).then(|| {
            format!(
                "{}: last handle released, freeing {} values",
                array.name().unwrap_or(T::ARRAY_NAME),
                array.capacity()
            )
        })
    }
}

impl<T: ArrayValue> Drop for ArrayHandleInner<T> {
    fn drop(&mut self) {
        if let Some(message) = self.release_message() {
            debug!("{message}");
        }
    }
}

impl<T: ArrayValue> ArrayHandle<T> {
    /// Creates a handle to an empty scalar array with no storage.
    pub fn create() -> Self {
        Self::from_array(TypedArray::new())
    }

    /// Creates a handle to an empty array configured by `options`.
    pub fn create_with<'a>(options: impl Into<ArrayOptions<'a>>) -> Result<Self> {
        Ok(Self::from_array(TypedArray::with_options(options)?))
    }

    /// Wraps an existing array.
    pub fn from_array(array: TypedArray<T>) -> Self {
        Self(Arc::new(ArrayHandleInner {
            array: RwLock::new(array),
        }))
    }

    /// Adds a holder and returns its handle.
    #[inline]
    pub fn retain(&self) -> Self {
        Self(Arc::clone(&self.0))
    }

    /// Removes this holder. Frees the array if it was the last one.
    #[inline]
    pub fn release(self) {
        drop(self);
    }

    /// Number of live holders.
    #[inline]
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Non-owning handle that does not keep the array alive.
    pub fn downgrade(&self) -> WeakArrayHandle<T> {
        WeakArrayHandle(Arc::downgrade(&self.0))
    }

    /// True if both handles share the same array.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Shared access to the array. Blocks while a writer holds it.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, TypedArray<T>> {
        self.0.array.read()
    }

    /// Exclusive access to the array. Blocks while any other guard is held.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, TypedArray<T>> {
        self.0.array.write()
    }

    /// Unwraps the array if this is the only holder, else returns the handle.
    pub fn try_unwrap(self) -> Result<TypedArray<T>, Self> {
        match Arc::try_unwrap(self.0) {
            // The inner value implements Drop, so the array is taken, not moved.
            Ok(mut inner) => Ok(mem::take(inner.array.get_mut())),
            Err(arc) => Err(Self(arc)),
        }
    }
}

impl<T: ArrayValue> Clone for ArrayHandle<T> {
    fn clone(&self) -> Self {
        self.retain()
    }
}

impl<T: ArrayValue> Default for ArrayHandle<T> {
    fn default() -> Self {
        Self::create()
    }
}

impl<T: ArrayValue> From<TypedArray<T>> for ArrayHandle<T> {
    fn from(array: TypedArray<T>) -> Self {
        Self::from_array(array)
    }
}

impl<T: ArrayValue> Describe for ArrayHandle<T> {
    /// Describes the array, including the number of live holders.
    ///
    /// Never blocks: while a writer holds the array, only the object layer
    /// is written, followed by a `(locked)` line.
    fn describe(&self, out: &mut dyn fmt::Write, indent: Indent) -> fmt::Result {
        let reference_count = Some(self.reference_count());
        match self.0.array.try_read() {
            Some(array) => describe::describe_layers::<T>(&array, reference_count, out, indent),
            None => describe::describe_locked::<T>(reference_count, out, indent),
        }
    }
}

/// Non-owning counterpart of [`ArrayHandle`].
#[derive(Debug, Clone)]
pub struct WeakArrayHandle<T: ArrayValue>(Weak<ArrayHandleInner<T>>);

impl<T: ArrayValue> WeakArrayHandle<T> {
    /// Returns a retained handle, or `None` once the array has been freed.
    pub fn upgrade(&self) -> Option<ArrayHandle<T>> {
        self.0.upgrade().map(ArrayHandle)
    }
}
