use super::open_session;
use crate::output::print_json;
use selly_core::scheduler::spawn_growth_loop;
use std::path::Path;
use tokio::sync::mpsc;

/// Keep the growth loop running in the foreground until Ctrl-C.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let every = session.config.growth.interval();
    let garden = session.garden.clone();

    session.runtime.block_on(async move {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let growth = spawn_growth_loop(garden.clone(), every, Some(tx));
        tracing::info!(every_ms = every.as_millis() as u64, "watching garden");
        if !json {
            println!(
                "Watching {} plant(s). Press Ctrl-C to stop.",
                garden.plants().len()
            );
        }

        loop {
            tokio::select! {
                change = rx.recv() => {
                    let Some(change) = change else { break };
                    if json {
                        print_json(&change)?;
                    } else {
                        println!(
                            "{} {} grew: {} -> {}",
                            change.to.emoji(change.kind),
                            change.kind.display_name(),
                            change.from,
                            change.to
                        );
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("stopping growth loop");
                    break;
                }
            }
        }
        growth.stop();
        Ok(())
    })
}
