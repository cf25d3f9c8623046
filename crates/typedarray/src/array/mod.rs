use std::{fmt, mem};

use log::{debug, trace};

use crate::{
    ArrayOptions, ArrayValue, BoundsCheck, Describe, Error, GrowthPolicy, Indent, Result, ONE_KIB,
    describe,
};

mod range;
mod tuples;
mod values;

/// Resizable, tuple-oriented array of a single numeric type.
///
/// Values live in one contiguous buffer. `len()` values are valid out of
/// `capacity()` allocated ones, and every `number_of_components()`
/// consecutive values form one tuple.
///
/// The buffer is exclusively owned: [`Clone`] and [`TypedArray::deep_copy`]
/// always copy values, never share them.
pub struct TypedArray<T> {
    /// Logical values. `data.len()` is the size, `data.capacity() >= capacity`.
    data: Vec<T>,
    capacity: usize,
    number_of_components: usize,
    name: Option<String>,
    component_names: Vec<Option<String>>,
    growth: GrowthPolicy,
    bounds_check: BoundsCheck,
    reallocations: usize,
}

impl<T> TypedArray<T>
where
    T: ArrayValue,
{
    /// Creates an empty scalar array with no allocated storage.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            number_of_components: 1,
            name: None,
            component_names: Vec::new(),
            growth: GrowthPolicy::default(),
            bounds_check: BoundsCheck::default(),
            reallocations: 0,
        }
    }

    /// Creates an empty array configured by `options`.
    pub fn with_options<'a>(options: impl Into<ArrayOptions<'a>>) -> Result<Self> {
        let options = options.into();
        if options.number_of_components == 0 {
            return Err(Error::ZeroComponents);
        }
        Ok(Self {
            number_of_components: options.number_of_components,
            name: options.name.map(str::to_string),
            growth: GrowthPolicy::new(options.growth_factor)?,
            bounds_check: options.bounds_check,
            ..Self::new()
        })
    }

    /// Takes ownership of `values`, which must hold whole tuples.
    pub fn from_values(number_of_components: usize, values: Vec<T>) -> Result<Self> {
        if number_of_components == 0 {
            return Err(Error::ZeroComponents);
        }
        if !values.len().is_multiple_of(number_of_components) {
            return Err(Error::PartialTuple {
                len: values.len(),
                components: number_of_components,
            });
        }
        Ok(Self {
            capacity: values.capacity(),
            data: values,
            number_of_components,
            ..Self::new()
        })
    }

    /// Number of valid values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of allocated values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn number_of_components(&self) -> usize {
        self.number_of_components
    }

    /// Number of whole tuples stored.
    #[inline]
    pub fn number_of_tuples(&self) -> usize {
        self.data.len() / self.number_of_components
    }

    /// Number of buffer reallocations performed since creation.
    #[inline]
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    #[inline]
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn set_growth_policy(&mut self, growth: GrowthPolicy) {
        self.growth = growth;
    }

    #[inline]
    pub fn bounds_check(&self) -> BoundsCheck {
        self.bounds_check
    }

    pub fn set_bounds_check(&mut self, bounds_check: BoundsCheck) {
        self.bounds_check = bounds_check;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn clear_name(&mut self) {
        self.name = None;
    }

    pub fn component_name(&self, component: usize) -> Option<&str> {
        self.component_names.get(component)?.as_deref()
    }

    /// Labels one component. Names survive resizes and deep copies.
    pub fn set_component_name(&mut self, component: usize, name: impl Into<String>) -> Result<()> {
        if component >= self.number_of_components {
            return Err(Error::ComponentOutOfRange {
                component,
                components: self.number_of_components,
            });
        }
        if self.component_names.len() <= component {
            self.component_names.resize(component + 1, None);
        }
        self.component_names[component] = Some(name.into());
        Ok(())
    }

    pub fn has_component_names(&self) -> bool {
        self.component_names.iter().any(Option::is_some)
    }

    /// Element type name, e.g. `"unsigned long long"`.
    #[inline]
    pub fn data_type_name(&self) -> &'static str {
        T::DATA_TYPE
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn data_type_size(&self) -> usize {
        size_of::<T>()
    }

    /// Allocated storage in KiB, rounded up.
    pub fn actual_memory_size(&self) -> usize {
        (self.capacity * size_of::<T>()).div_ceil(ONE_KIB)
    }

    /// Changes the tuple width. Only legal while the array is empty.
    pub fn set_number_of_components(&mut self, number_of_components: usize) -> Result<()> {
        if number_of_components == 0 {
            return Err(Error::ZeroComponents);
        }
        if !self.data.is_empty() {
            return Err(Error::InvalidState {
                operation: "set number of components",
                size: self.data.len(),
            });
        }
        self.number_of_components = number_of_components;
        self.component_names.truncate(number_of_components);
        Ok(())
    }

    /// Discards the contents and ensures room for `n + extra` values.
    ///
    /// The size becomes 0. Existing storage is reused when large enough.
    /// On failure the array is left exactly as it was.
    pub fn allocate(&mut self, n: usize, extra: usize) -> Result<()> {
        let required = n.checked_add(extra).ok_or(Error::Allocation {
            requested: usize::MAX,
            capacity: self.capacity,
        })?;
        trace!(
            "{}: allocate {required} values (capacity {})",
            self.label(),
            self.capacity
        );
        if required <= self.capacity {
            self.data.clear();
            return Ok(());
        }
        self.data = self.try_alloc(required)?;
        self.capacity = required;
        self.reallocations += 1;
        Ok(())
    }

    /// Sets the size to `n`, zero-filling new values.
    ///
    /// Growing past the capacity reallocates per the growth policy.
    /// Shrinking keeps the capacity.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        if n > self.data.len() {
            self.grow_to(n)?;
            self.data.resize(n, T::default());
        } else {
            self.data.truncate(n);
        }
        Ok(())
    }

    /// Sets the size to `n` values. Same as [`TypedArray::resize`].
    #[inline]
    pub fn set_number_of_values(&mut self, n: usize) -> Result<()> {
        self.resize(n)
    }

    /// Sets the size to `n` whole tuples.
    pub fn set_number_of_tuples(&mut self, n: usize) -> Result<()> {
        let values = n
            .checked_mul(self.number_of_components)
            .ok_or(Error::Allocation {
                requested: usize::MAX,
                capacity: self.capacity,
            })?;
        self.resize(values)
    }

    /// Ensures room for `additional` more values without changing the size.
    ///
    /// Reserves exactly, bypassing the growth factor.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(Error::Allocation {
                requested: usize::MAX,
                capacity: self.capacity,
            })?;
        if required > self.capacity {
            self.reallocate(required)?;
        }
        Ok(())
    }

    /// Releases unused capacity so that `capacity() == len()`.
    pub fn squeeze(&mut self) -> Result<()> {
        if self.capacity > self.data.len() {
            debug!(
                "{}: squeeze {} -> {}",
                self.label(),
                self.capacity,
                self.data.len()
            );
            self.reallocate(self.data.len())?;
        }
        Ok(())
    }

    /// Empties the array, keeping its storage.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Empties the array and releases its storage.
    pub fn initialize(&mut self) {
        if self.capacity > 0 {
            debug!("{}: releasing {} values", self.label(), self.capacity);
        }
        self.data = Vec::new();
        self.capacity = 0;
    }

    /// Replaces this array's contents with an independent copy of `other`.
    ///
    /// Copies values, tuple width, name and component names. Growth and
    /// bounds-check settings are kept. On failure `self` is unchanged.
    pub fn deep_copy(&mut self, other: &Self) -> Result<()> {
        if other.len() > self.capacity {
            let mut data = self.try_alloc(other.len())?;
            data.extend_from_slice(&other.data);
            self.data = data;
            self.capacity = other.len();
            self.reallocations += 1;
        } else {
            self.data.clear();
            self.data.extend_from_slice(&other.data);
        }
        self.number_of_components = other.number_of_components;
        self.name.clone_from(&other.name);
        self.component_names.clone_from(&other.component_names);
        Ok(())
    }

    /// The valid values, `[0, len())`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Takes the values out, leaving an empty array with no storage.
    pub fn take_values(&mut self) -> Vec<T> {
        self.capacity = 0;
        mem::take(&mut self.data)
    }

    /// Grows the buffer per the growth policy so that `required` values fit.
    fn grow_to(&mut self, required: usize) -> Result<()> {
        if required > self.capacity {
            let new_capacity = self.growth.next_capacity(self.capacity, required);
            self.reallocate(new_capacity)?;
        }
        Ok(())
    }

    /// Moves the values into a fresh buffer of exactly `new_capacity`.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        let mut data = self.try_alloc(new_capacity)?;
        data.extend_from_slice(&self.data);
        debug!(
            "{}: reallocate {} -> {} values",
            self.label(),
            self.capacity,
            new_capacity
        );
        self.data = data;
        self.capacity = new_capacity;
        self.reallocations += 1;
        Ok(())
    }

    fn try_alloc(&self, capacity: usize) -> Result<Vec<T>> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation {
                requested: capacity,
                capacity: self.capacity,
            })?;
        Ok(data)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(T::ARRAY_NAME)
    }
}

impl<T> Default for TypedArray<T>
where
    T: ArrayValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedArray<T>
where
    T: ArrayValue,
{
    fn clone(&self) -> Self {
        let data = self.data.clone();
        Self {
            capacity: data.len(),
            data,
            number_of_components: self.number_of_components,
            name: self.name.clone(),
            component_names: self.component_names.clone(),
            growth: self.growth,
            bounds_check: self.bounds_check,
            reallocations: 0,
        }
    }
}

/// Arrays are equal when their tuple width and values are equal.
impl<T> PartialEq for TypedArray<T>
where
    T: ArrayValue,
{
    fn eq(&self, other: &Self) -> bool {
        self.number_of_components == other.number_of_components && self.data == other.data
    }
}

impl<T> fmt::Debug for TypedArray<T>
where
    T: ArrayValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(T::ARRAY_NAME)
            .field("name", &self.name)
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .field("number_of_components", &self.number_of_components)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for TypedArray<T>
where
    T: ArrayValue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f, Indent::default())
    }
}

impl<T> Describe for TypedArray<T>
where
    T: ArrayValue,
{
    fn describe(&self, out: &mut dyn fmt::Write, indent: Indent) -> fmt::Result {
        describe::describe_layers(self, None, out, indent)
    }
}

impl<T> From<TypedArray<T>> for Vec<T> {
    fn from(array: TypedArray<T>) -> Self {
        array.data
    }
}
