pub mod init;
pub mod list;
pub mod render;
pub mod session;
pub mod validate;

use anyhow::Result;

use roster_core::config::{load_config_from, RosterConfig};
use roster_core::store::RosterStore;

use crate::SourceArgs;

/// Resolve config plus command-line overrides into the starting roster.
pub fn load_store(source: &SourceArgs) -> Result<(RosterStore, RosterConfig)> {
    let mut config = load_config_from(source.config.as_deref())?;
    if let Some(seed) = &source.seed {
        config.seed_file = Some(seed.clone());
    }
    if source.no_sample {
        config.sample_data = false;
    }

    let store = config.initial_store()?;
    tracing::debug!("starting with {} student(s)", store.len());
    Ok((store, config))
}
