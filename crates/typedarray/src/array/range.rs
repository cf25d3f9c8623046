use crate::{ArrayValue, Error, Result};

use super::TypedArray;

fn min_max<T: ArrayValue>(values: impl Iterator<Item = T>) -> Option<(T, T)> {
    values
        .filter(|&v| !v.is_nan())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((
                if v < min { v } else { min },
                if v > max { v } else { max },
            )),
        })
}

impl<T> TypedArray<T>
where
    T: ArrayValue,
{
    /// Flat index of the first value equal to `value`.
    pub fn lookup_value(&self, value: T) -> Option<usize> {
        self.data.iter().position(|&v| v == value)
    }

    /// Flat indices of every value equal to `value`, in ascending order.
    pub fn lookup_all(&self, value: T) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| (v == value).then_some(i))
            .collect()
    }

    /// Smallest and largest value over all components, NaNs skipped.
    ///
    /// `None` when there is nothing to measure.
    pub fn value_range(&self) -> Option<(T, T)> {
        min_max(self.data.iter().copied())
    }

    /// Smallest and largest value of one component across whole tuples.
    pub fn component_range(&self, component: usize) -> Result<Option<(T, T)>> {
        if component >= self.number_of_components {
            return Err(Error::ComponentOutOfRange {
                component,
                components: self.number_of_components,
            });
        }
        Ok(min_max(
            self.data
                .chunks_exact(self.number_of_components)
                .map(|tuple| tuple[component]),
        ))
    }

    /// Smallest and largest Euclidean norm of the whole tuples.
    pub fn magnitude_range(&self) -> Option<(f64, f64)> {
        self.data
            .chunks_exact(self.number_of_components)
            .map(|tuple| {
                tuple
                    .iter()
                    .map(|v| {
                        let v = v.to_f64();
                        v * v
                    })
                    .sum::<f64>()
                    .sqrt()
            })
            .filter(|norm| !norm.is_nan())
            .fold(None, |range, norm| match range {
                None => Some((norm, norm)),
                Some((min, max)) => Some((min.min(norm), max.max(norm))),
            })
    }
}
