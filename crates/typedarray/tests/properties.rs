use typedarray::{
    ArrayOptions, BoundsCheck, DoubleArray, Error, ErrorKind, Result, TypedArray,
    UnsignedLongLongArray,
};

/// Helper to create an array that reports every out-of-range index
fn checked_array(components: usize) -> Result<UnsignedLongLongArray> {
    UnsignedLongLongArray::with_options(
        ArrayOptions::new(components).with_bounds_check(BoundsCheck::Checked),
    )
}

#[test]
fn test_allocate_then_resize_addresses_every_index() -> Result<()> {
    for n in [0, 1, 2, 7, 64, 1000] {
        let mut array = checked_array(1)?;
        array.allocate(n, 0)?;
        assert_eq!(array.len(), 0);

        array.resize(n)?;
        assert_eq!(array.len(), n);
        for i in 0..n {
            array.set_value(i, i as u64)?;
            assert_eq!(array.value(i)?, i as u64);
        }
        assert_eq!(
            array.value(n).map_err(|e| e.kind()),
            Err(ErrorKind::IndexOutOfRange)
        );
    }
    Ok(())
}

#[test]
fn test_append_growth_is_logarithmic() -> Result<()> {
    for factor in [1.5, 2.0, 3.0] {
        let mut array = UnsignedLongLongArray::with_options(
            ArrayOptions::default().with_growth_factor(factor),
        )?;
        let n = 100_000;
        let mut capacity = array.capacity();

        for i in 0..n {
            array.insert_next_value(i)?;
            assert!(array.capacity() >= capacity, "capacity shrank");
            capacity = array.capacity();
        }

        assert_eq!(array.len(), n as usize);
        let bound = ((n as f64).ln() / factor.ln()).ceil() as usize + 2;
        assert!(
            array.reallocations() <= bound,
            "factor {factor}: {} reallocations, bound {bound}",
            array.reallocations()
        );
    }
    Ok(())
}

#[test]
fn test_tuple_roundtrip() -> Result<()> {
    let mut array = checked_array(4)?;
    array.set_number_of_tuples(16)?;
    for i in 0..array.number_of_tuples() {
        let tuple = [i as u64, i as u64 * 2, u64::MAX - i as u64, 0];
        array.set_tuple(i, &tuple)?;
    }
    for i in 0..array.number_of_tuples() {
        let mut out = [0; 4];
        array.tuple_into(i, &mut out)?;
        assert_eq!(out, [i as u64, i as u64 * 2, u64::MAX - i as u64, 0]);
    }
    Ok(())
}

#[test]
fn test_deep_copy_equal_and_independent() -> Result<()> {
    let mut source = checked_array(3)?;
    for i in 0..10 {
        source.insert_next_tuple(&[i, i + 1, i + 2])?;
    }

    let mut copy = checked_array(1)?;
    copy.insert_next_value(99)?;
    copy.deep_copy(&source)?;

    assert_eq!(copy.len(), source.len());
    assert_eq!(copy.number_of_components(), source.number_of_components());
    assert_eq!(copy.as_slice(), source.as_slice());

    copy.set_component(0, 0, 1000)?;
    assert_eq!(source.component(0, 0)?, 0);

    source.set_component(9, 2, 2000)?;
    assert_eq!(copy.component(9, 2)?, 11);

    copy.resize(0)?;
    assert_eq!(source.len(), 30);
    Ok(())
}

#[test]
fn test_set_number_of_components_state_rule() -> Result<()> {
    let mut array = checked_array(1)?;
    array.set_number_of_components(3)?;
    assert_eq!(array.number_of_components(), 3);

    array.insert_next_tuple(&[1, 2, 3])?;
    let error = array.set_number_of_components(2).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);
    assert_eq!(array.number_of_components(), 3);
    Ok(())
}

#[test]
fn test_two_three_component_tuples() -> Result<()> {
    let mut array = UnsignedLongLongArray::new();
    array.set_number_of_components(3)?;
    array.insert_next_tuple(&[1, 2, 3])?;
    array.insert_next_tuple(&[4, 5, 6])?;

    assert_eq!(array.len(), 6);
    assert_eq!(array.tuple(0)?, &[1, 2, 3]);
    assert_eq!(array.tuple(1)?, &[4, 5, 6]);
    assert_eq!(array.component(1, 2)?, 6);
    Ok(())
}

#[test]
fn test_preallocated_inserts_never_reallocate() -> Result<()> {
    let mut array = UnsignedLongLongArray::new();
    array.allocate(0, 4)?;
    let reallocations = array.reallocations();
    let capacity = array.capacity();

    for i in 0..4 {
        assert_eq!(array.insert_next_tuple(&[i])?, i as usize);
    }

    assert_eq!(array.reallocations(), reallocations);
    assert_eq!(array.capacity(), capacity);
    assert_eq!(array.as_slice(), &[0, 1, 2, 3]);
    Ok(())
}

#[test]
fn test_reacquired_iterator_sees_resize() -> Result<()> {
    let mut array = UnsignedLongLongArray::from_values(1, vec![1, 2, 3])?;
    {
        let it = array.iter();
        assert_eq!(it.len(), 3);
    }

    array.resize(6)?;
    array.set_value(5, 42)?;

    let it = array.iter();
    assert_eq!(it.len(), 6);
    assert_eq!(it.copied().collect::<Vec<_>>(), vec![1, 2, 3, 0, 0, 42]);
    Ok(())
}

#[test]
fn test_allocation_failure_is_recoverable() -> Result<()> {
    let mut array = UnsignedLongLongArray::from_values(1, vec![1, 2, 3])?;

    let error = array.resize(usize::MAX).unwrap_err();
    assert!(matches!(error, Error::Allocation { .. }));
    assert!(error.is_recoverable());
    assert_eq!(array.as_slice(), &[1, 2, 3]);

    array.resize(8)?;
    assert_eq!(array.len(), 8);
    Ok(())
}

#[test]
fn test_generic_over_element_type() -> Result<()> {
    fn sum_components<T: typedarray::ArrayValue + Into<f64>>(
        array: &TypedArray<T>,
        component: usize,
    ) -> f64 {
        array
            .tuples()
            .map(|tuple| Into::<f64>::into(tuple[component]))
            .sum()
    }

    let mut doubles = DoubleArray::with_options(2)?;
    doubles.insert_next_tuple(&[0.5, 1.0])?;
    doubles.insert_next_tuple(&[1.5, 2.0])?;
    assert_eq!(sum_components(&doubles, 0), 2.0);
    assert_eq!(doubles.data_type_name(), "double");
    Ok(())
}
