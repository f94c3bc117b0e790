//! Walk through the filter API with logging enabled.
//!
//! Run with: RUST_LOG=trace cargo run --example basic_usage

use bytebloom::{BloomFilter, BloomFilterBuilder, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("bytebloom v{}", bytebloom::VERSION);

    // A tiny filter holding one integer.
    let mut filter = BloomFilter::new(32, 5)?;
    filter.insert(&2500i32)?;
    println!("contains 2500: {}", filter.contains(&2500i32)?);
    println!("contains 2501: {}", filter.contains(&2501i32)?);
    println!("raw bits:      {:08b}", RawBits(filter.raw_bits()));

    // Estimators on a larger filter.
    let mut fruit = BloomFilter::new(128, 3)?;
    let mut more = BloomFilter::new(128, 3)?;
    fruit.insert_all(["apple", "banana", "cherry"])?;
    more.insert_all(["cherry", "date", "fig"])?;

    let union = fruit.union(&more)?;
    let intersection = fruit.intersection(&more)?;
    println!();
    println!("union:        ~{} items, fp rate {:.6}", union.estimated_cardinality()?, union.false_positive_rate()?);
    println!("intersection: ~{} items", intersection.estimated_cardinality()?);
    for key in ["apple", "banana", "cherry", "date", "fig"] {
        println!(
            "  {:<7} union={:<5} intersection={}",
            key,
            union.contains(key)?,
            intersection.contains(key)?
        );
    }

    // Sized from a capacity target.
    let planned = BloomFilterBuilder::new()
        .expected_items(1_000)
        .false_positive_rate(0.01)
        .build()?;
    println!();
    println!("{:#?}", planned.stats()?);

    Ok(())
}

/// Prints bytes as space-separated binary octets.
struct RawBits<'a>(&'a [u8]);

impl std::fmt::Binary for RawBits<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            std::fmt::Binary::fmt(byte, f)?;
        }
        Ok(())
    }
}
