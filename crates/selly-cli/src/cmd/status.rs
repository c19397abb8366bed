use super::open_session;
use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let snapshot = session.garden.snapshot();

    if json {
        return print_json(&snapshot);
    }

    match &snapshot.profile {
        Some(p) => println!("Hello, {}.", p.name),
        None => println!("Not onboarded yet. Run `selly onboard <name>`."),
    }
    println!("Letters: {}", snapshot.letters.len());
    println!("Replies: {}", snapshot.replies.len());
    println!("Plants:  {}", snapshot.plants.len());
    if snapshot.has_unread_reply {
        println!("A reply is waiting. Run `selly read`.");
    }
    Ok(())
}
