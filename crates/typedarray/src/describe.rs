use std::fmt::{self, Write};

use crate::{ArrayValue, TypedArray};

/// Indentation depth of a diagnostic dump. Each level is two spaces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Indent(usize);

impl Indent {
    const UNIT: &'static str = "  ";

    pub fn new(level: usize) -> Self {
        Self(level)
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.0
    }

    /// One level deeper.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str(Self::UNIT)?;
        }
        Ok(())
    }
}

/// Human-readable dump of an object's state.
///
/// Writing a description never changes the described object.
pub trait Describe {
    fn describe(&self, out: &mut dyn Write, indent: Indent) -> fmt::Result;
}

/// Writes every description layer of `array`, most general first.
///
/// `reference_count` is only known for arrays reached through a handle.
pub(crate) fn describe_layers<T: ArrayValue>(
    array: &TypedArray<T>,
    reference_count: Option<usize>,
    out: &mut dyn Write,
    indent: Indent,
) -> fmt::Result {
    describe_object::<T>(reference_count, out, indent)?;
    let indent = indent.next();
    describe_abstract_array(array, out, indent)?;
    describe_typed_array(array, out, indent)
}

/// Object layer only, for an array a writer currently holds.
pub(crate) fn describe_locked<T: ArrayValue>(
    reference_count: Option<usize>,
    out: &mut dyn Write,
    indent: Indent,
) -> fmt::Result {
    describe_object::<T>(reference_count, out, indent)?;
    writeln!(out, "{}(locked)", indent.next())
}

fn describe_object<T: ArrayValue>(
    reference_count: Option<usize>,
    out: &mut dyn Write,
    indent: Indent,
) -> fmt::Result {
    writeln!(out, "{indent}{}", T::ARRAY_NAME)?;
    if let Some(count) = reference_count {
        writeln!(out, "{}Reference Count: {count}", indent.next())?;
    }
    Ok(())
}

fn describe_abstract_array<T: ArrayValue>(
    array: &TypedArray<T>,
    out: &mut dyn Write,
    indent: Indent,
) -> fmt::Result {
    writeln!(out, "{indent}Name: {}", array.name().unwrap_or("(none)"))?;
    writeln!(out, "{indent}Data Type: {}", array.data_type_name())?;
    writeln!(out, "{indent}Size: {}", array.len())?;
    writeln!(out, "{indent}MaxId: {}", array.len() as i128 - 1)?;
    writeln!(
        out,
        "{indent}NumberOfComponents: {}",
        array.number_of_components()
    )?;
    if array.has_component_names() {
        writeln!(out, "{indent}ComponentNames:")?;
        for component in 0..array.number_of_components() {
            if let Some(name) = array.component_name(component) {
                writeln!(out, "{}{component}: {name}", indent.next())?;
            }
        }
    }
    Ok(())
}

fn describe_typed_array<T: ArrayValue>(
    array: &TypedArray<T>,
    out: &mut dyn Write,
    indent: Indent,
) -> fmt::Result {
    writeln!(out, "{indent}Capacity: {}", array.capacity())?;
    writeln!(
        out,
        "{indent}GrowthFactor: {}",
        array.growth_policy().factor()
    )?;
    writeln!(out, "{indent}BoundsCheck: {}", array.bounds_check())?;
    writeln!(out, "{indent}Reallocations: {}", array.reallocations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayOptions, BoundsCheck, Result};

    #[test]
    fn indent_renders_two_spaces_per_level() {
        assert_eq!(Indent::default().to_string(), "");
        assert_eq!(Indent::new(2).to_string(), "    ");
        assert_eq!(Indent::new(1).next().level(), 2);
    }

    #[test]
    fn layers_are_most_general_first() -> Result<()> {
        let mut array = TypedArray::<u64>::with_options(
            ArrayOptions::new(3)
                .with_name("velocity")
                .with_bounds_check(BoundsCheck::Checked),
        )?;
        array.insert_next_tuple(&[1, 2, 3])?;
        array.set_component_name(0, "x")?;

        let mut out = String::new();
        array.describe(&mut out, Indent::new(1))?;

        let expected = "  UnsignedLongLongArray\n\
                        \x20   Name: velocity\n\
                        \x20   Data Type: unsigned long long\n\
                        \x20   Size: 3\n\
                        \x20   MaxId: 2\n\
                        \x20   NumberOfComponents: 3\n\
                        \x20   ComponentNames:\n\
                        \x20     0: x\n\
                        \x20   Capacity: 3\n\
                        \x20   GrowthFactor: 2\n\
                        \x20   BoundsCheck: Checked\n\
                        \x20   Reallocations: 1\n";
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn empty_array_has_negative_max_id() {
        let array = TypedArray::<u64>::new();
        let out = array.to_string();
        assert!(out.starts_with("UnsignedLongLongArray\n"));
        assert!(out.contains("  Name: (none)\n"));
        assert!(out.contains("  MaxId: -1\n"));
        assert!(out.contains("  Capacity: 0\n"));
    }

    #[test]
    fn describing_does_not_mutate() -> Result<()> {
        let array = TypedArray::from_values(1, vec![1_u64, 2])?;
        let before = array.clone();
        let mut out = String::new();
        array.describe(&mut out, Indent::default())?;
        array.describe(&mut out, Indent::default())?;
        assert_eq!(array, before);
        assert_eq!(array.capacity(), before.capacity());
        Ok(())
    }
}
