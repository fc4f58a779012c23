//! Handler for `gemorder order`.

use miette::Result;

use gemorder_resolver::{sorted_order, GemResolver, Seed};

pub fn exec(resolver: &GemResolver, seed: &Seed) -> Result<()> {
    for package in sorted_order(resolver, seed)? {
        println!("{package}");
    }
    Ok(())
}
