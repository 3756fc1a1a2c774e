use crate::discover::types::Opportunity;
use crate::discover::DiscoverError;
use serde::Deserialize;

/// Wire envelope the prompt dictates: a single top-level object whose
/// "opportunities" key holds the extracted records. A missing key is a
/// legitimate empty result, not an error.
#[derive(Debug, Deserialize)]
struct ReplyEnvelope {
    #[serde(default)]
    opportunities: Vec<Opportunity>,
}

/// Parse the model's raw reply into typed opportunity records.
///
/// Strict JSON first; on failure, one normalization pass that strips a
/// leading/trailing markdown code fence, then one retry. No further
/// heuristic recovery is attempted after that.
pub fn parse_opportunities(text: &str) -> Result<Vec<Opportunity>, DiscoverError> {
    match parse_strict(text) {
        Ok(opportunities) => Ok(opportunities),
        Err(strict_err) => {
            let stripped = strip_code_fences(text);
            parse_strict(&stripped).map_err(|_| {
                tracing::debug!(error = %strict_err, "reply not parseable after fence strip");
                DiscoverError::MalformedResponse(strict_err.to_string())
            })
        }
    }
}

fn parse_strict(text: &str) -> Result<Vec<Opportunity>, serde_json::Error> {
    serde_json::from_str::<ReplyEnvelope>(text).map(|envelope| envelope.opportunities)
}

/// Remove a leading fence line (``` plus optional language tag) and a
/// trailing fence line. Anything between is left untouched.
fn strip_code_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();

    if let Some(first) = lines.first() {
        let rest = first.trim().strip_prefix("```");
        if rest.is_some_and(|tag| tag.chars().all(|c| c.is_ascii_alphanumeric())) {
            lines.remove(0);
        }
    }

    if lines.last().is_some_and(|last| last.trim() == "```") {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::types::OpportunityKind;

    const FULL_RECORD: &str = r#"{
        "opportunities": [{
            "title": "Rural Education Grant 2026",
            "organization": "Example Foundation",
            "focusArea": "Education",
            "region": "Uttarakhand",
            "budget": "INR 50,00,000",
            "deadline": "2026-03-15",
            "type": "RFP",
            "link": "https://example.org/rfp/2026",
            "brief": "Grants for rural primary education programs."
        }]
    }"#;

    #[test]
    fn round_trips_a_complete_record() {
        let opportunities = parse_opportunities(FULL_RECORD).unwrap();
        assert_eq!(opportunities.len(), 1);

        let opp = &opportunities[0];
        assert_eq!(opp.title, "Rural Education Grant 2026");
        assert_eq!(opp.organization, "Example Foundation");
        assert_eq!(opp.focus_area, "Education");
        assert_eq!(opp.region, "Uttarakhand");
        assert_eq!(opp.budget, "INR 50,00,000");
        assert_eq!(opp.deadline, "2026-03-15");
        assert_eq!(opp.kind, OpportunityKind::Rfp);
        assert_eq!(opp.link, "https://example.org/rfp/2026");
        assert_eq!(opp.brief, "Grants for rural primary education programs.");
    }

    #[test]
    fn fenced_reply_parses_identically_to_unwrapped() {
        let fenced = format!("```json\n{}\n```", FULL_RECORD);
        assert_eq!(
            parse_opportunities(&fenced).unwrap(),
            parse_opportunities(FULL_RECORD).unwrap()
        );
    }

    #[test]
    fn fence_without_language_tag_is_stripped() {
        let fenced = format!("```\n{}\n```", FULL_RECORD);
        assert_eq!(parse_opportunities(&fenced).unwrap().len(), 1);
    }

    #[test]
    fn garbage_fails_as_malformed() {
        let err = parse_opportunities("not json at all").unwrap_err();
        assert!(matches!(err, DiscoverError::MalformedResponse(_)));
    }

    #[test]
    fn empty_object_yields_empty_list() {
        assert!(parse_opportunities("{}").unwrap().is_empty());
    }

    #[test]
    fn missing_fields_pass_through_as_defaults() {
        let opportunities =
            parse_opportunities(r#"{"opportunities": [{"title": "Minimal"}]}"#).unwrap();
        assert_eq!(opportunities[0].title, "Minimal");
        assert_eq!(opportunities[0].budget, "");
        assert_eq!(opportunities[0].kind, OpportunityKind::Other);
    }

    #[test]
    fn unknown_type_maps_to_other() {
        let opportunities = parse_opportunities(
            r#"{"opportunities": [{"title": "T", "type": "Grant Notice"}]}"#,
        )
        .unwrap();
        assert_eq!(opportunities[0].kind, OpportunityKind::Other);
    }

    #[test]
    fn record_order_is_preserved() {
        let opportunities = parse_opportunities(
            r#"{"opportunities": [{"title": "first"}, {"title": "second"}, {"title": "third"}]}"#,
        )
        .unwrap();
        let titles: Vec<&str> = opportunities.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = parse_opportunities(r#"[{"title": "T"}]"#).unwrap_err();
        assert!(matches!(err, DiscoverError::MalformedResponse(_)));
    }
}
