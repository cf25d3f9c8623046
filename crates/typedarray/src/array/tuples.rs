use std::ops::Range;

use crate::{ArrayValue, Error, Result, TupleIter};

use super::TypedArray;

impl<T> TypedArray<T>
where
    T: ArrayValue,
{
    #[inline(always)]
    fn check_tuple(&self, tuple: usize) -> Result<()> {
        if self.bounds_check.is_checked() && tuple >= self.number_of_tuples() {
            return Err(Error::TupleOutOfRange {
                tuple,
                tuples: self.number_of_tuples(),
            });
        }
        Ok(())
    }

    #[inline(always)]
    fn check_component(&self, component: usize) -> Result<()> {
        if self.bounds_check.is_checked() && component >= self.number_of_components {
            return Err(Error::ComponentOutOfRange {
                component,
                components: self.number_of_components,
            });
        }
        Ok(())
    }

    #[inline(always)]
    fn check_tuple_len(&self, len: usize) -> Result<()> {
        if len != self.number_of_components {
            return Err(Error::WrongTupleLength {
                expected: self.number_of_components,
                got: len,
            });
        }
        Ok(())
    }

    /// Flat span of `tuple`. Saturates, so an overflowing index lands past the
    /// buffer instead of wrapping onto a stored tuple.
    #[inline(always)]
    fn tuple_span(&self, tuple: usize) -> Range<usize> {
        let start = tuple.saturating_mul(self.number_of_components);
        start..start.saturating_add(self.number_of_components)
    }

    #[inline(always)]
    fn value_index(&self, tuple: usize, component: usize) -> usize {
        tuple
            .saturating_mul(self.number_of_components)
            .saturating_add(component)
    }

    /// Grows the size so that `tuple` is addressable, zero-filling new values.
    fn ensure_tuple(&mut self, tuple: usize) -> Result<()> {
        let end = tuple
            .checked_add(1)
            .and_then(|tuples| tuples.checked_mul(self.number_of_components))
            .ok_or(Error::Allocation {
                requested: usize::MAX,
                capacity: self.capacity,
            })?;
        if end > self.data.len() {
            self.resize(end)?;
        }
        Ok(())
    }

    /// The values of `tuple`.
    #[inline]
    pub fn tuple(&self, tuple: usize) -> Result<&[T]> {
        self.check_tuple(tuple)?;
        Ok(&self.data[self.tuple_span(tuple)])
    }

    /// Copies the values of `tuple` into `out`, which must hold exactly one tuple.
    pub fn tuple_into(&self, tuple: usize, out: &mut [T]) -> Result<()> {
        self.check_tuple_len(out.len())?;
        out.copy_from_slice(self.tuple(tuple)?);
        Ok(())
    }

    /// Overwrites `tuple` with `values`, which must hold exactly one tuple.
    pub fn set_tuple(&mut self, tuple: usize, values: &[T]) -> Result<()> {
        self.check_tuple_len(values.len())?;
        self.check_tuple(tuple)?;
        let span = self.tuple_span(tuple);
        self.data[span].copy_from_slice(values);
        Ok(())
    }

    /// Sets `tuple`, growing the array to hold it if needed.
    pub fn insert_tuple(&mut self, tuple: usize, values: &[T]) -> Result<()> {
        self.check_tuple_len(values.len())?;
        self.ensure_tuple(tuple)?;
        let span = self.tuple_span(tuple);
        self.data[span].copy_from_slice(values);
        Ok(())
    }

    /// Appends a tuple and returns its index.
    ///
    /// A trailing partial tuple left by value-level inserts is overwritten,
    /// so the size is a whole number of tuples afterwards.
    pub fn insert_next_tuple(&mut self, values: &[T]) -> Result<usize> {
        let tuple = self.number_of_tuples();
        self.insert_tuple(tuple, values)?;
        Ok(tuple)
    }

    /// Value of `component` within `tuple`.
    #[inline]
    pub fn component(&self, tuple: usize, component: usize) -> Result<T> {
        self.check_tuple(tuple)?;
        self.check_component(component)?;
        Ok(self.data[self.value_index(tuple, component)])
    }

    /// Overwrites `component` within `tuple`.
    #[inline]
    pub fn set_component(&mut self, tuple: usize, component: usize, value: T) -> Result<()> {
        self.check_tuple(tuple)?;
        self.check_component(component)?;
        let index = self.value_index(tuple, component);
        self.data[index] = value;
        Ok(())
    }

    /// Sets `component` within `tuple`, growing the array to hold the tuple.
    pub fn insert_component(&mut self, tuple: usize, component: usize, value: T) -> Result<()> {
        if component >= self.number_of_components {
            return Err(Error::ComponentOutOfRange {
                component,
                components: self.number_of_components,
            });
        }
        self.ensure_tuple(tuple)?;
        let index = self.value_index(tuple, component);
        self.data[index] = value;
        Ok(())
    }

    /// Sets `component` of every tuple to `value`.
    pub fn fill_component(&mut self, component: usize, value: T) -> Result<()> {
        if component >= self.number_of_components {
            return Err(Error::ComponentOutOfRange {
                component,
                components: self.number_of_components,
            });
        }
        for tuple in self.data.chunks_exact_mut(self.number_of_components) {
            tuple[component] = value;
        }
        Ok(())
    }

    /// Drops the last whole tuple, along with any trailing partial tuple.
    pub fn remove_last_tuple(&mut self) -> Result<()> {
        let tuples = self.number_of_tuples();
        if tuples == 0 {
            return Err(Error::TupleOutOfRange { tuple: 0, tuples });
        }
        self.data.truncate((tuples - 1) * self.number_of_components);
        Ok(())
    }

    /// Removes `tuple`, shifting the following tuples down. Capacity is kept.
    pub fn remove_tuple(&mut self, tuple: usize) -> Result<()> {
        let tuples = self.number_of_tuples();
        if tuple >= tuples {
            return Err(Error::TupleOutOfRange { tuple, tuples });
        }
        let span = self.tuple_span(tuple);
        self.data.drain(span);
        Ok(())
    }

    /// Copies `count` tuples of `source`, starting at `source_start`, into
    /// this array starting at `start`, growing it as needed.
    ///
    /// Both arrays must have the same number of components.
    pub fn copy_tuples_from(
        &mut self,
        start: usize,
        source: &TypedArray<T>,
        source_start: usize,
        count: usize,
    ) -> Result<()> {
        if source.number_of_components != self.number_of_components {
            return Err(Error::MismatchedComponents {
                expected: self.number_of_components,
                got: source.number_of_components,
            });
        }
        let source_tuples = source.number_of_tuples();
        let source_end = source_start
            .checked_add(count)
            .filter(|&end| end <= source_tuples)
            .ok_or(Error::TupleOutOfRange {
                tuple: source_start.saturating_add(count),
                tuples: source_tuples,
            })?;
        if count == 0 {
            return Ok(());
        }

        let last = start.checked_add(count - 1).ok_or(Error::Allocation {
            requested: usize::MAX,
            capacity: self.capacity,
        })?;
        self.ensure_tuple(last)?;

        let components = self.number_of_components;
        let from = &source.data[source_start * components..source_end * components];
        self.data[start * components..(start + count) * components].copy_from_slice(from);
        Ok(())
    }

    /// Iterator over whole tuples.
    #[inline]
    pub fn tuples(&self) -> TupleIter<'_, T> {
        TupleIter::new(&self.data, self.number_of_components)
    }
}
