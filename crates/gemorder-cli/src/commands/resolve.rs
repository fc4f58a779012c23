//! Handler for `gemorder resolve`.

use miette::Result;

use gemorder_resolver::{resolve_all, GemResolver, Seed};
use gemorder_util::errors::GemorderError;

pub fn exec(resolver: &GemResolver, seed: &Seed, json: bool) -> Result<()> {
    let graph = resolve_all(resolver, seed)?;

    if json {
        let rendered = serde_json::to_string_pretty(&graph).map_err(|e| GemorderError::Command {
            message: format!("failed to render graph as JSON: {e}"),
        })?;
        println!("{rendered}");
        return Ok(());
    }

    for (package, deps) in graph.iter() {
        println!("{package}");
        for (dep, requirements) in deps {
            if requirements.is_empty() {
                println!("  {dep}");
            } else {
                println!("  {dep} ({})", requirements.join(", "));
            }
        }
    }
    Ok(())
}
