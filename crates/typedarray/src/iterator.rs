use std::iter::FusedIterator;

/// Cursor over the values of a [`TypedArray`](crate::TypedArray).
///
/// Borrows the array, so any mutating call on it ends the iterator's life;
/// re-acquire with [`TypedArray::iter`](crate::TypedArray::iter) afterwards.
/// The cursor can be rewound with [`ArrayIter::reset`] and moved
/// with [`ArrayIter::seek`] without touching the array.
///
/// # Example
/// ```
/// # use typedarray::UnsignedLongLongArray;
/// # fn main() -> typedarray::Result<()> {
/// let array = UnsignedLongLongArray::from_values(1, vec![10, 20, 30])?;
/// let mut it = array.iter();
/// assert_eq!(it.next(), Some(&10));
/// assert_eq!(it.get(2), Some(&30));
/// it.seek(2);
/// assert_eq!(it.next(), Some(&30));
/// assert!(it.is_done());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArrayIter<'a, T> {
    values: &'a [T],
    /// Flat index of `values[0]` in the source array.
    offset: usize,
    front: usize,
    back: usize,
}

impl<'a, T> ArrayIter<'a, T> {
    pub(crate) fn new(values: &'a [T], offset: usize) -> Self {
        Self {
            values,
            offset,
            front: 0,
            back: values.len(),
        }
    }

    /// Flat index in the source array of the next value.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset + self.front
    }

    /// Number of values not yet yielded.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    /// True once every value has been yielded.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.front == self.back
    }

    /// Value at `offset` from the start of the traversed range, regardless
    /// of the cursor position.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<&'a T> {
        self.values.get(offset)
    }

    /// Moves the cursor to `offset` from the start of the traversed range.
    /// Clamped to the end.
    #[inline]
    pub fn seek(&mut self, offset: usize) {
        self.front = offset.min(self.back);
    }

    /// Rewinds to the start, restoring values consumed from either end.
    #[inline]
    pub fn reset(&mut self) {
        self.front = 0;
        self.back = self.values.len();
    }

    /// The values not yet yielded.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        &self.values[self.front..self.back]
    }
}

impl<'a, T> Iterator for ArrayIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = &self.values[self.front];
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for ArrayIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(&self.values[self.back])
    }
}

impl<T> ExactSizeIterator for ArrayIter<'_, T> {}

impl<T> FusedIterator for ArrayIter<'_, T> {}

/// Cursor over the whole tuples of a [`TypedArray`](crate::TypedArray).
///
/// A trailing partial tuple, left by value-level appends, is not yielded.
#[derive(Debug, Clone)]
pub struct TupleIter<'a, T> {
    values: &'a [T],
    components: usize,
    front: usize,
    back: usize,
}

impl<'a, T> TupleIter<'a, T> {
    pub(crate) fn new(values: &'a [T], components: usize) -> Self {
        Self {
            values,
            components,
            front: 0,
            back: values.len() / components,
        }
    }

    #[inline]
    pub fn number_of_components(&self) -> usize {
        self.components
    }

    /// Number of whole tuples in the traversed array.
    #[inline]
    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    /// Tuple index of the next tuple.
    #[inline]
    pub fn position(&self) -> usize {
        self.front
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.front == self.back
    }

    /// Tuple at `index`, regardless of the cursor position.
    #[inline]
    pub fn tuple(&self, index: usize) -> Option<&'a [T]> {
        if index >= self.number_of_tuples() {
            return None;
        }
        let start = index * self.components;
        Some(&self.values[start..start + self.components])
    }

    #[inline]
    pub fn seek(&mut self, index: usize) {
        self.front = index.min(self.back);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.front = 0;
        self.back = self.number_of_tuples();
    }
}

impl<'a, T> Iterator for TupleIter<'a, T> {
    type Item = &'a [T];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let tuple = self.tuple(self.front);
        self.front += 1;
        tuple
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for TupleIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.tuple(self.back)
    }
}

impl<T> ExactSizeIterator for TupleIter<'_, T> {}

impl<T> FusedIterator for TupleIter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::{Result, TypedArray};

    #[test]
    fn sequential_and_done() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2, 3])?;
        let mut it = array.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.position(), 1);
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next(), Some(&3));
        assert!(it.is_done());
        assert_eq!(it.next(), None);
        Ok(())
    }

    #[test]
    fn random_access_ignores_cursor() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2, 3])?;
        let mut it = array.iter();
        it.next();
        assert_eq!(it.get(0), Some(&1));
        assert_eq!(it.get(3), None);
        assert_eq!(it.nth(1), Some(&3));
        assert!(it.is_done());
        Ok(())
    }

    #[test]
    fn restartable() -> Result<()> {
        let array = TypedArray::from_values(1, vec![4_u64, 5])?;
        let mut it = array.iter();
        assert_eq!(it.by_ref().count(), 2);
        it.reset();
        assert_eq!(it.copied().collect::<Vec<_>>(), vec![4, 5]);
        Ok(())
    }

    #[test]
    fn both_ends_meet() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2, 3, 4])?;
        let mut it = array.iter();
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.as_slice(), &[2, 3]);
        assert_eq!(it.rev().copied().collect::<Vec<_>>(), vec![3, 2]);
        Ok(())
    }

    #[test]
    fn range_positions_are_absolute() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2, 3, 4, 5])?;
        let mut it = array.iter_range(2, 4)?;
        assert_eq!(it.position(), 2);
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.position(), 3);
        assert_eq!(it.get(0), Some(&3));
        Ok(())
    }

    #[test]
    fn seek_clamps_to_end() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2])?;
        let mut it = array.iter();
        it.seek(10);
        assert!(it.is_done());
        assert_eq!(it.remaining(), 0);
        Ok(())
    }

    #[test]
    fn two_iterators_share_array() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2, 3])?;
        let a = array.iter();
        let mut b = array.iter();
        b.next();
        assert_eq!(a.zip(b).map(|(x, y)| x + y).collect::<Vec<_>>(), vec![3, 5]);
        Ok(())
    }

    #[test]
    fn tuples_skip_partial_tail() -> Result<()> {
        let mut array = TypedArray::<u64>::with_options(2)?;
        array.insert_next_tuple(&[1, 2])?;
        array.insert_next_tuple(&[3, 4])?;
        array.insert_next_value(5)?;

        let mut tuples = array.tuples();
        assert_eq!(tuples.number_of_tuples(), 2);
        assert_eq!(tuples.number_of_components(), 2);
        assert_eq!(tuples.tuple(1), Some(&[3, 4][..]));
        assert_eq!(tuples.next(), Some(&[1, 2][..]));
        assert_eq!(tuples.next(), Some(&[3, 4][..]));
        assert!(tuples.is_done());
        assert_eq!(tuples.next(), None);

        tuples.reset();
        assert_eq!(tuples.next_back(), Some(&[3, 4][..]));
        assert_eq!(tuples.len(), 1);
        Ok(())
    }
}
