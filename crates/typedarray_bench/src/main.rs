use std::time::Instant;

use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};
use typedarray::{ArrayOptions, BoundsCheck, UnsignedLongLongArray};

struct BenchConfig {
    values: u64,
    components: usize,
    growth_factors: Vec<f64>,
    random_reads: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            values: 10_000_000,
            components: 3,
            growth_factors: vec![1.25, 1.5, 2.0, 4.0],
            random_reads: 1_000_000,
        }
    }
}

fn run(config: &BenchConfig) -> Result<()> {
    println!(
        "{} values, {} components, {} random reads",
        config.values, config.components, config.random_reads
    );
    println!(
        "{:>8} {:>14} {:>14} {:>12} {:>12}",
        "factor", "reallocations", "capacity", "append", "read"
    );

    for &factor in &config.growth_factors {
        let options = ArrayOptions::new(config.components)
            .with_growth_factor(factor)
            .with_bounds_check(BoundsCheck::Unchecked);
        let mut array = UnsignedLongLongArray::with_options(options)?;

        let start = Instant::now();
        let mut tuple = vec![0; config.components];
        let tuples = config.values / config.components as u64;
        for i in 0..tuples {
            tuple.fill(i);
            array.insert_next_tuple(&tuple)?;
        }
        let append = start.elapsed();

        let mut rng = StdRng::seed_from_u64(42);
        let start = Instant::now();
        let mut sum = 0u64;
        for _ in 0..config.random_reads {
            let index = rng.random_range(0..array.len());
            sum = sum.wrapping_add(array.value(index)?);
        }
        let read = start.elapsed();
        std::hint::black_box(sum);

        println!(
            "{:>8} {:>14} {:>14} {:>12?} {:>12?}",
            factor,
            array.reallocations(),
            array.capacity(),
            append,
            read
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let configs = vec![
        BenchConfig::default(),
        BenchConfig {
            values: 100_000_000,
            components: 1,
            ..Default::default()
        },
    ];
    for config in &configs {
        run(config)?;
    }
    Ok(())
}
