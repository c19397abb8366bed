pub mod config;
pub mod garden;
pub mod letter;
pub mod onboard;
pub mod stats;
pub mod status;
pub mod tags;
pub mod watch;

use anyhow::Context;
use selly_core::config::Config;
use selly_core::garden::GardenOptions;
use selly_core::{io, store, Garden};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// A loaded garden plus the runtime its background work runs on.
pub struct Session {
    pub runtime: Runtime,
    pub garden: Garden,
    pub config: Config,
}

/// Load config, open storage, build the reply generator and catch the
/// garden's growth up to the current time.
pub fn open_session(root: &Path) -> anyhow::Result<Session> {
    let config = Config::load(root).context("failed to load config")?;
    io::ensure_dir(root)
        .with_context(|| format!("failed to create data root {}", root.display()))?;

    let store = store::open(root, config.storage.backend).context("failed to open storage")?;
    let generator =
        selly_agent::build_generator(&config.reply).context("failed to build reply generator")?;
    let garden = Garden::open(
        store,
        generator,
        GardenOptions {
            thresholds: config.growth.thresholds(),
            reply_delay: config.reply.delay(),
            clock: Arc::new(selly_core::clock::SystemClock),
        },
    )
    .context("failed to load garden")?;

    garden.tick_growth().context("failed to update garden")?;
    let runtime = Runtime::new().context("failed to start runtime")?;
    Ok(Session {
        runtime,
        garden,
        config,
    })
}
