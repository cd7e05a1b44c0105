//! The `roster render` command.

use std::path::PathBuf;

use anyhow::Result;

use roster_report::html::write_html_report;

use crate::SourceArgs;

pub fn execute(output: Option<PathBuf>, source: SourceArgs) -> Result<()> {
    let (store, config) = super::load_store(&source)?;
    let path = output.unwrap_or_else(|| config.output_dir.join("roster.html"));

    write_html_report(&store, &[], &path)?;
    println!("Wrote {} ({} students)", path.display(), store.len());
    Ok(())
}
