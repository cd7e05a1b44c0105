//! The `roster list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use roster_core::store::RosterStore;
use roster_report::html::format_average;

use crate::SourceArgs;

pub fn execute(source: SourceArgs) -> Result<()> {
    let (store, _) = super::load_store(&source)?;
    println!("{}", roster_table(&store));
    Ok(())
}

/// The roster as a console table.
pub fn roster_table(store: &RosterStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Gender", "Age", "Form", "Records", "Average",
    ]);
    for s in store.iter() {
        table.add_row(vec![
            Cell::new(s.id()),
            Cell::new(s.name()),
            Cell::new(s.gender()),
            Cell::new(s.age()),
            Cell::new(s.form()),
            Cell::new(s.performance().len()),
            Cell::new(format_average(s.average())),
        ]);
    }
    table
}
