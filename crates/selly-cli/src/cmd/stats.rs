use super::open_session;
use crate::output::{print_json, print_table};
use selly_core::analytics::summarize;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let summary = summarize(&session.garden.letters());

    if json {
        return print_json(&summary);
    }

    if summary.total == 0 {
        println!("No letters yet. Write one with `selly write`.");
        return Ok(());
    }

    println!("Letters written: {}", summary.total);
    println!();

    if summary.has_trend() {
        println!("Recent intensity:");
        for point in &summary.trend {
            println!(
                "  {}  {:<5}  {}",
                point.date,
                "●".repeat(point.intensity as usize),
                point.emotion.label()
            );
        }
        println!();
    }

    let rows = summary
        .distribution
        .iter()
        .map(|share| {
            vec![
                share.emotion.label().to_string(),
                share.count.to_string(),
                format!("{}%", share.percent),
            ]
        })
        .collect();
    print_table(&["EMOTION", "LETTERS", "SHARE"], rows);
    Ok(())
}
