//! Handler for `gemorder versions`.

use miette::Result;

use gemorder_resolver::{exact_versions, GemResolver, Seed};

pub fn exec(resolver: &GemResolver, seed: &Seed) -> Result<()> {
    for (package, version) in exact_versions(resolver, seed)? {
        println!("{package} {version}");
    }
    Ok(())
}
