//! The `roster validate` command.

use std::path::PathBuf;

use anyhow::Result;

use roster_core::seed::{lint_seed, parse_seed};

pub fn execute(seed_path: PathBuf) -> Result<()> {
    let store = parse_seed(&seed_path)?;
    let records: usize = store.iter().map(|s| s.performance().len()).sum();
    println!(
        "Seed file: {} ({} students, {} performance records)",
        seed_path.display(),
        store.len(),
        records
    );

    let warnings = lint_seed(&seed_path)?;
    for w in &warnings {
        let prefix = w
            .student_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Seed file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
