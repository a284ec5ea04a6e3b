//! Paged Bloom filter capacity planning example.
//!
//! Run with: cargo run --example capacity_planning

use pagebloom::builder::PageBloomFilterBuilder;
use pagebloom::core::BloomFilter;

fn main() -> pagebloom::Result<()> {
    println!("Paged Bloom Filter Capacity Planning Examples\n");

    let configs = vec![
        ("Session cache", 500, 0.01),
        ("URL dedup", 100_000, 0.01),
        ("Crawler frontier", 10_000_000, 0.001),
        ("Loose prefilter", 1_000, 0.1),
    ];

    for (name, items, fpr) in configs {
        let (mut filter, metadata) = PageBloomFilterBuilder::new()
            .expected_items(items)
            .false_positive_rate(fpr)
            .build_with_metadata()?;

        let params = metadata.params;
        println!("{}", name);
        println!("  items / target fpr : {} / {}", items, fpr);
        println!(
            "  way / page / pages : {} / {} B / {}",
            params.way,
            params.page_size(),
            params.page_num
        );
        println!(
            "  memory             : {:.1} KiB ({:.2} B/item)",
            metadata.memory_kb(),
            metadata.bytes_per_item
        );
        println!("  capacity           : {}", metadata.capacity);
        println!("  virtual capacity   : {}", metadata.virtual_capacity);

        // Fill a small filter and measure against disjoint keys
        if items <= 100_000 {
            for i in 0..items as u64 {
                filter.set(&i.to_le_bytes());
            }
            let probes = 100_000u64;
            let hits = (items as u64..items as u64 + probes)
                .filter(|i| filter.test(&i.to_le_bytes()))
                .count();
            println!(
                "  measured fpr       : {:.4}",
                hits as f64 / probes as f64
            );
        }
        println!();
    }

    Ok(())
}
