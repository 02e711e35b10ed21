//! Print the pre-render path manifest

use anyhow::Result;

use crate::Copydesk;

/// Enumerate every pre-renderable post path
pub async fn run(app: &Copydesk, json: bool) -> Result<()> {
    let manifest = app.paths().enumerate_paths().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    println!("Pre-render paths ({}):", manifest.paths.len());
    for slug in manifest.slugs() {
        println!("  /post/{}", slug);
    }
    println!("Fallback: {}", manifest.fallback);

    Ok(())
}
