//! Prompt and response schema for Selly's persona.

use selly_core::generator::ReplyRequest;
use selly_core::types::PlantType;
use serde_json::{json, Value};

pub fn system_instruction(language: &str) -> String {
    format!(
        "You are Selly, an empathetic emotional support companion living in a \
         journaling garden. Always reply in {language}."
    )
}

/// Comma-separated labels, or a placeholder when nothing was picked.
fn labels<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None specified".to_string()
    } else {
        joined
    }
}

pub fn build_prompt(req: &ReplyRequest, language: &str) -> String {
    let contexts = labels(req.contexts.iter().map(|c| c.label()));
    let statuses = labels(req.statuses.iter().map(|s| s.label()));
    let plants = PlantType::all()
        .iter()
        .filter(|p| **p != PlantType::Unknown)
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "User name: {name}\n\
         Emotion: {emotion} (intensity {intensity}/5)\n\
         Situation: {contexts}\n\
         Physical/mental state: {statuses}\n\
         Letter: \"{content}\"\n\
         \n\
         You are Selly, the warm companion of a mental-care journaling app. \
         Validate the user's feelings, offer a comforting perspective and a gentle \
         piece of advice.\n\
         \n\
         Guidelines:\n\
         1. Weave the situation ({contexts}) and state ({statuses}) naturally into \
         the reply, e.g. suggest tea for a headache or a warm bath after a \
         sleepless night.\n\
         2. Do not sound clinical. Speak like a wise, kind friend or a gentle \
         garden spirit.\n\
         3. Write everything in {language}.\n\
         \n\
         Pick one symbolic plant for the user's emotion from: {plants}.",
        name = req.user_name,
        emotion = req.emotion,
        intensity = req.intensity,
        content = req.content,
    )
}

/// JSON schema the model's answer must follow.
pub fn response_schema(language: &str) -> Value {
    let plant_names: Vec<&str> = PlantType::all().iter().map(|p| p.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "reply": {
                "type": "STRING",
                "description": format!("A warm, validating reply of 3-5 sentences in {language}.")
            },
            "summary": {
                "type": "STRING",
                "description": format!(
                    "A poetic 3-5 word 'emotional weather' summary in {language}, e.g. 'sunlight behind clouds'."
                )
            },
            "plantType": {
                "type": "STRING",
                "enum": plant_names,
                "description": "The seed to gift, chosen from the user's emotion."
            },
            "advice": {
                "type": "STRING",
                "description": format!(
                    "One small, concrete self-care step that fits the situation and state, in {language}."
                )
            }
        },
        "required": ["reply", "summary", "plantType", "advice"]
    })
}
