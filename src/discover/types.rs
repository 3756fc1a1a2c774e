use serde::{Deserialize, Serialize};

/// Category of a funding/procurement solicitation
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub enum OpportunityKind {
    #[serde(rename = "RFP")]
    Rfp,
    #[serde(rename = "RFQ")]
    Rfq,
    #[serde(rename = "EOI")]
    Eoi,
    #[default]
    Other,
}

// Anything the model labels outside the three known categories folds into
// Other rather than failing the whole record.
impl<'de> Deserialize<'de> for OpportunityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "RFP" => OpportunityKind::Rfp,
            "RFQ" => OpportunityKind::Rfq,
            "EOI" => OpportunityKind::Eoi,
            _ => OpportunityKind::Other,
        })
    }
}

impl std::fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OpportunityKind::Rfp => "RFP",
            OpportunityKind::Rfq => "RFQ",
            OpportunityKind::Eoi => "EOI",
            OpportunityKind::Other => "Other",
        };
        f.write_str(label)
    }
}

/// One discovered funding/tender opportunity.
///
/// Field names follow the wire schema the prompt dictates to the model.
/// Free-text fields carry whatever the model extracted; the "Not specified"
/// and "Open" sentinels are produced by the model, not synthesized here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Opportunity {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default, rename = "focusArea")]
    pub focus_area: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default, rename = "type")]
    pub kind: OpportunityKind,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub brief: String,
}

/// One grounding citation surfaced to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Aggregate handed from the orchestrator to the UI.
///
/// Exists only on success; a failed discovery produces a `DiscoverError`
/// instead, never a partial aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub opportunities: Vec<Opportunity>,
    pub sources: Vec<Source>,
}
