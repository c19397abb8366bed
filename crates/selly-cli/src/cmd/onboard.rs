use super::open_session;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let profile = session
        .garden
        .onboard(name)
        .context("failed to save profile")?;

    if json {
        print_json(&profile)?;
    } else {
        println!("Nice to meet you, {}. Your garden is ready.", profile.name);
    }
    Ok(())
}
