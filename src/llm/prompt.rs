//! Prompt text and response parsing for the weekly narrative.

use serde_json::Value;

use super::Narrative;
use crate::report::prompt::PromptInputs;

/// Unparsable responses are kept as the overview, truncated to this many chars.
const RAW_OVERVIEW_LIMIT: usize = 500;

pub fn system_prompt() -> &'static str {
    "You are generating an NFL fantasy weekly roundup. Keep tone informative and concise. \
     Output strictly JSON with keys: overview, storylines, matchup_highlights, standings_blurb, incentives_blurb. \
     Do not include markdown; no prose outside JSON. Keep each value under 80 words."
}

pub fn user_prompt(inputs: &PromptInputs) -> Result<String, serde_json::Error> {
    Ok(format!(
        "Create a weekly roundup based on this data. Maintain consistent structure.\n{}",
        serde_json::to_string(inputs)?
    ))
}

/// Strip markdown code fences or surrounding prose from a JSON reply.
pub fn sanitize_json(raw_text: &str) -> String {
    let trimmed = raw_text.trim();

    if trimmed.starts_with("```") {
        let without_prefix = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);

        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
        return without_prefix.trim().to_string();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

/// Parse the model's reply into a narrative.
///
/// Missing keys default to empty; a reply that isn't a JSON object becomes the
/// overview.
pub fn parse_narrative(content: &str) -> Narrative {
    let clean = sanitize_json(content);
    match serde_json::from_str::<Value>(&clean) {
        Ok(Value::Object(map)) => {
            let field = |key: &str| map.get(key).map(value_text).unwrap_or_default();
            Narrative {
                overview: field("overview"),
                storylines: field("storylines"),
                matchup_highlights: field("matchup_highlights"),
                standings_blurb: field("standings_blurb"),
                incentives_blurb: field("incentives_blurb"),
            }
        }
        _ => Narrative {
            overview: content.chars().take(RAW_OVERVIEW_LIMIT).collect(),
            ..Narrative::default()
        },
    }
}

// Models occasionally answer a section with a list of bullet strings.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}
