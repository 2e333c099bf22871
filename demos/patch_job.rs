//! Parse a job definition, patch it and write the override back out.
//!
//! Run with: cargo run --example patch_job

use clausewitz_patch::{
    group, insert, parse, script, to_writer_with_options, Element, WriteOptions,
};
use std::error::Error;
use std::io;

const JOBS: &[u8] = b"\
job_miner = {
\tcategory = worker # tier 1
\tpossible = {
\t\tplanet = { has_owner = yes }
\t}
\tresources = {
\t\tproduces = { minerals = 4 }
\t}
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse(JOBS).map_err(|e| e.with_path("common/pop_jobs/01_worker_jobs.txt"))?;

    // Require an enabled planet
    insert(
        &mut doc,
        &["job_miner", "possible", "planet"],
        script!["is_enabled", "=", "yes"].into_children(),
    )?;

    // Bump the output in place
    let job = doc
        .field_mut("job_miner")?
        .and_then(Element::as_container_mut)
        .ok_or("job_miner is not a block")?;
    let produces = job
        .field_mut("resources")?
        .and_then(Element::as_container_mut)
        .ok_or("resources is not a block")?
        .field_mut("produces")?
        .and_then(Element::as_container_mut)
        .ok_or("produces is not a block")?;
    let old = produces.replace("minerals", "6")?;
    println!("minerals: {:?} -> 6", old.as_ref().and_then(Element::as_bytes));

    let names: Vec<_> = group(&doc)?.iter().map(|t| t.name.to_string()).collect();
    println!("Patched: {}\n", names.join(", "));

    to_writer_with_options(io::stdout().lock(), &doc, &WriteOptions::new().with_indent(4))?;
    Ok(())
}
