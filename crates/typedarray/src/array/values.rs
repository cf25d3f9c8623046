use crate::{ArrayIter, ArrayValue, Error, Result};

use super::TypedArray;

impl<T> TypedArray<T>
where
    T: ArrayValue,
{
    #[inline(always)]
    fn check_index(&self, index: usize) -> Result<()> {
        if self.bounds_check.is_checked() && index >= self.data.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    /// Value at flat `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.data[index])
    }

    /// Value at flat `index`, or `None` past the size. Never panics.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Overwrites the value at flat `index`.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        self.data[index] = value;
        Ok(())
    }

    /// Sets the value at `index`, growing the size to `index + 1` if needed.
    pub fn insert_value(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.data.len() {
            let len = index.checked_add(1).ok_or(Error::Allocation {
                requested: usize::MAX,
                capacity: self.capacity,
            })?;
            self.resize(len)?;
        }
        self.data[index] = value;
        Ok(())
    }

    /// Appends one value and returns its flat index.
    pub fn insert_next_value(&mut self, value: T) -> Result<usize> {
        let index = self.data.len();
        self.grow_to(index + 1)?;
        self.data.push(value);
        Ok(index)
    }

    /// Sets every value to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterator over all values.
    #[inline]
    pub fn iter(&self) -> ArrayIter<'_, T> {
        ArrayIter::new(&self.data, 0)
    }

    /// Iterator over the values in `[from, to)`.
    pub fn iter_range(&self, from: usize, to: usize) -> Result<ArrayIter<'_, T>> {
        let len = self.data.len();
        if to > len {
            return Err(Error::IndexOutOfRange { index: to, len });
        }
        if from > to {
            return Err(Error::IndexOutOfRange { index: from, len });
        }
        Ok(ArrayIter::new(&self.data[from..to], from))
    }
}

impl<'a, T> IntoIterator for &'a TypedArray<T>
where
    T: ArrayValue,
{
    type Item = &'a T;
    type IntoIter = ArrayIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for TypedArray<T>
where
    T: ArrayValue,
{
    /// Appends every value.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot grow. Use
    /// [`TypedArray::insert_next_value`] to handle allocation failure.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(error) = self.grow_to(self.data.len().saturating_add(lower)) {
            panic!("{error}");
        }
        for value in iter {
            if let Err(error) = self.insert_next_value(value) {
                panic!("{error}");
            }
        }
    }
}
