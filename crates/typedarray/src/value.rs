use std::fmt::{Debug, Display};

use crate::TypedArray;

/// Numeric element type that a [`TypedArray`] can store.
///
/// Implemented for the fixed-width integer and floating point primitives by
/// [`impl_array_value!`], which also declares the matching array alias
/// (`u64` gets [`UnsignedLongLongArray`](crate::UnsignedLongLongArray)).
pub trait ArrayValue
where
    Self: Sized + Debug + Display + Copy + Default + PartialEq + PartialOrd + Send + Sync + 'static,
{
    /// Human readable element type, as shown in diagnostic dumps.
    const DATA_TYPE: &'static str;

    /// Name of the concrete array type storing this element.
    const ARRAY_NAME: &'static str;

    /// Lossy widening used by magnitude computations.
    fn to_f64(self) -> f64;

    /// Returns true for values that must be skipped when computing ranges.
    #[inline]
    fn is_nan(self) -> bool {
        false
    }
}

/// Implements [`ArrayValue`] and declares the array alias for each listed type.
macro_rules! impl_array_value {
    (int: $($t:ty => $alias:ident, $data_type:literal);* $(;)?) => {
        $(
            impl ArrayValue for $t {
                const DATA_TYPE: &'static str = $data_type;
                const ARRAY_NAME: &'static str = stringify!($alias);

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            #[doc = concat!("Tuple-oriented array of `", stringify!($t), "` (", $data_type, ") values.")]
            pub type $alias = TypedArray<$t>;
        )*
    };
    (float: $($t:ty => $alias:ident, $data_type:literal);* $(;)?) => {
        $(
            impl ArrayValue for $t {
                const DATA_TYPE: &'static str = $data_type;
                const ARRAY_NAME: &'static str = stringify!($alias);

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }
            }

            #[doc = concat!("Tuple-oriented array of `", stringify!($t), "` (", $data_type, ") values.")]
            pub type $alias = TypedArray<$t>;
        )*
    };
}

impl_array_value!(int:
    i8 => SignedCharArray, "signed char";
    u8 => UnsignedCharArray, "unsigned char";
    i16 => ShortArray, "short";
    u16 => UnsignedShortArray, "unsigned short";
    i32 => IntArray, "int";
    u32 => UnsignedIntArray, "unsigned int";
    i64 => LongLongArray, "long long";
    u64 => UnsignedLongLongArray, "unsigned long long";
);

impl_array_value!(float:
    f32 => FloatArray, "float";
    f64 => DoubleArray, "double";
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_long_long_names() {
        assert_eq!(<u64 as ArrayValue>::DATA_TYPE, "unsigned long long");
        assert_eq!(<u64 as ArrayValue>::ARRAY_NAME, "UnsignedLongLongArray");
    }

    #[test]
    fn only_floats_report_nan() {
        assert!(ArrayValue::is_nan(f64::NAN));
        assert!(ArrayValue::is_nan(f32::NAN));
        assert!(!ArrayValue::is_nan(u64::MAX));
    }

    #[test]
    fn widening_is_lossy_for_large_integers() {
        assert_eq!(ArrayValue::to_f64(3_u64), 3.0);
        assert_eq!(ArrayValue::to_f64(u64::MAX), 18_446_744_073_709_551_615.0);
    }
}
