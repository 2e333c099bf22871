//! Split a script file into top-level definitions without parsing it.
//!
//! Run with: cargo run --example split_file

use clausewitz_patch::{parse, split_segments, NameListing};
use std::error::Error;

const BUILDINGS: &[u8] = b"\
# Mining buildings
@base_cost = 100

building_mine = {
\tcost = { minerals = @base_cost } # scaled later
\tupgrades = { building_mine_2 }
}

building_mine_2 = {
\tcost = { minerals = 250 }
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut listing = NameListing::new();

    for segment in split_segments(BUILDINGS) {
        let name = segment.name().map(String::from_utf8_lossy).unwrap_or_default();
        println!("{name} at bytes {:?}", segment.span());

        // Segments keep their comments and formatting
        println!("{}\n", String::from_utf8_lossy(segment.body()));

        // and still parse on their own
        let doc = parse(segment.as_bytes())?;
        println!("  {} top-level elements", doc.len());
        listing.insert(name.as_bytes());
    }

    println!("Definitions:\n{}", String::from_utf8_lossy(&listing.to_sorted_bytes()));
    Ok(())
}
