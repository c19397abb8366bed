use crate::output::print_json;
use selly_core::types::{Context, Emotion, Status};
use serde::Serialize;

#[derive(Serialize)]
struct Tag {
    name: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct TagGroup {
    group: &'static str,
    tags: Vec<Tag>,
}

/// Bucket `items` by group, keeping the catalogue order of groups and tags.
fn grouped<T: Copy>(
    items: &[T],
    group: impl Fn(T) -> &'static str,
    tag: impl Fn(T) -> Tag,
) -> Vec<TagGroup> {
    let mut out: Vec<TagGroup> = Vec::new();
    for &item in items {
        let name = group(item);
        match out.iter_mut().find(|g| g.group == name) {
            Some(g) => g.tags.push(tag(item)),
            None => out.push(TagGroup {
                group: name,
                tags: vec![tag(item)],
            }),
        }
    }
    out
}

/// List the emotions and the situation/state tags `selly write` accepts.
pub fn run(json: bool) -> anyhow::Result<()> {
    let emotions: Vec<Tag> = Emotion::all()
        .iter()
        .map(|e| Tag {
            name: e.as_str(),
            label: e.label(),
        })
        .collect();
    let contexts = grouped(Context::all(), Context::group, |c| Tag {
        name: c.as_str(),
        label: c.label(),
    });
    let statuses = grouped(Status::all(), Status::group, |s| Tag {
        name: s.as_str(),
        label: s.label(),
    });

    if json {
        return print_json(&serde_json::json!({
            "emotions": emotions,
            "contexts": contexts,
            "statuses": statuses,
        }));
    }

    println!("Emotions (--emotion):");
    for e in &emotions {
        println!("  {:<14} {}", e.name, e.label);
    }
    print_groups("Situation (--context)", &contexts);
    print_groups("Body & mind (--status)", &statuses);
    Ok(())
}

fn print_groups(title: &str, groups: &[TagGroup]) {
    println!();
    println!("{title}:");
    for g in groups {
        println!("  {}", g.group);
        for t in &g.tags {
            println!("    {:<12} {}", t.name, t.label);
        }
    }
}
