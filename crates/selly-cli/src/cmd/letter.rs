use super::open_session;
use crate::output::print_json;
use anyhow::Context;
use selly_core::letter::{MAX_INTENSITY, MIN_INTENSITY};
use selly_core::reply::Reply;
use selly_core::types::{Context as LetterContext, Emotion, Status};
use selly_core::LetterDraft;
use std::path::Path;

/// Arguments of `selly write`.
pub struct WriteArgs {
    pub content: String,
    pub emotion: String,
    pub intensity: u8,
    pub contexts: Vec<String>,
    pub statuses: Vec<String>,
}

// ---------------------------------------------------------------------------
// write
// ---------------------------------------------------------------------------

pub fn write(root: &Path, args: WriteArgs, json: bool) -> anyhow::Result<()> {
    let emotion: Emotion = args.emotion.parse()?;
    let contexts = args
        .contexts
        .iter()
        .map(|c| c.parse::<LetterContext>())
        .collect::<Result<Vec<_>, _>>()?;
    let statuses = args
        .statuses
        .iter()
        .map(|s| s.parse::<Status>())
        .collect::<Result<Vec<_>, _>>()?;
    let draft = LetterDraft::new(args.content, emotion, args.intensity)
        .with_contexts(contexts)
        .with_statuses(statuses);

    let session = open_session(root)?;
    let garden = session.garden.clone();
    let outcome = session.runtime.block_on(async move {
        let Some(letter) = garden.submit_letter(draft).context("failed to send letter")? else {
            return Ok::<_, anyhow::Error>(None);
        };
        if !json {
            println!("Letter sent. Selly is reading it...");
        }
        garden.wait_idle().await;
        let reply = garden
            .replies()
            .into_iter()
            .find(|r| r.letter_id == letter.id);
        Ok(Some((letter, reply)))
    })?;

    let Some((letter, reply)) = outcome else {
        anyhow::bail!(
            "letter not sent: content must not be blank and intensity must be {MIN_INTENSITY}-{MAX_INTENSITY}"
        );
    };

    if json {
        let value = serde_json::json!({
            "letter": letter,
            "reply": reply,
        });
        print_json(&value)?;
    } else {
        match reply {
            Some(_) => println!("A reply from Selly has arrived. Run `selly read` to open it."),
            None => println!("Selly could not reply this time. Your letter is kept."),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

pub fn read(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let reply = session.garden.acknowledge_reply();

    if json {
        return print_json(&reply);
    }
    match reply {
        Some(reply) => print_reply(&reply),
        None => println!("No unread replies."),
    }
    Ok(())
}

fn print_reply(reply: &Reply) {
    println!("\"{}\"", reply.summary);
    println!();
    println!("{}", reply.content);
    println!();
    println!("Tonight's care: {}", reply.advice);
    println!();
    let seed = reply.gift_seed;
    println!(
        "Gift: {} {}. {}",
        seed.emoji(),
        seed.display_name(),
        seed.description()
    );
    println!("Run `selly plant` to plant it in your garden.");
}

// ---------------------------------------------------------------------------
// plant
// ---------------------------------------------------------------------------

pub fn plant(root: &Path, reply_id: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let reply_id = match reply_id {
        Some(id) => id.to_string(),
        None => match session.garden.acknowledge_reply() {
            Some(reply) => reply.id,
            None => anyhow::bail!("no unread reply to plant"),
        },
    };

    let plant = session
        .garden
        .plant_seed(&reply_id)
        .with_context(|| format!("failed to plant seed of reply {reply_id}"))?;

    if json {
        print_json(&plant)?;
    } else {
        let kind = plant.kind;
        println!(
            "Planted {} {}. Check back with `selly garden`.",
            plant.stage.emoji(kind),
            kind.display_name()
        );
    }
    Ok(())
}
