use super::open_session;
use crate::output::{format_duration, print_json, print_table};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct PlantView {
    id: String,
    kind: selly_core::types::PlantType,
    name: &'static str,
    stage: selly_core::types::GrowthStage,
    planted_at: chrono::DateTime<chrono::Utc>,
    /// Seconds until the next stage, absent once mature.
    next_stage_in_secs: Option<u64>,
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = open_session(root)?;
    let garden = &session.garden;
    let now = garden.now();
    let thresholds = garden.thresholds();
    let plants = garden.plants();

    if json {
        let views: Vec<PlantView> = plants
            .iter()
            .map(|p| PlantView {
                id: p.id.clone(),
                kind: p.kind,
                name: p.kind.display_name(),
                stage: p.stage,
                planted_at: p.planted_at,
                next_stage_in_secs: p.next_stage_in(now, thresholds).map(|d| d.as_secs()),
            })
            .collect();
        return print_json(&views);
    }

    if plants.is_empty() {
        println!("Your garden is empty. Plant the seed from a reply to start it.");
        return Ok(());
    }

    let rows = plants
        .iter()
        .map(|p| {
            let next = match (p.stage.next(), p.next_stage_in(now, thresholds)) {
                (Some(stage), Some(wait)) => format!("{stage} in {}", format_duration(wait)),
                _ => "fully grown".to_string(),
            };
            vec![
                p.stage.emoji(p.kind).to_string(),
                p.kind.display_name().to_string(),
                p.stage.to_string(),
                p.planted_at.format("%Y-%m-%d %H:%M").to_string(),
                next,
            ]
        })
        .collect();
    print_table(&["", "PLANT", "STAGE", "PLANTED", "NEXT"], rows);
    Ok(())
}
