use serde::{Deserialize, Serialize};

/// Export format selector. Advisory: it never affects discovery, only how
/// the export module serializes a finished result set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Cycle through the variants in form order
    pub fn next(&self) -> Self {
        match self {
            OutputFormat::Xlsx => OutputFormat::Csv,
            OutputFormat::Csv => OutputFormat::Json,
            OutputFormat::Json => OutputFormat::Xlsx,
        }
    }
}

/// The user's search intent. Built by the form, then handed to the
/// orchestrator as an immutable snapshot; edits produce a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    pub sectors: Vec<String>,
    pub geography: Vec<String>,
    /// ISO 8601 calendar date used as an inclusive upper bound instruction.
    /// Not validated locally; the model interprets it.
    pub deadline: String,
    /// Empty string means "no organization filter".
    #[serde(default)]
    pub specific_organization: String,
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for SearchFilters {
    fn default() -> Self {
        // Preset selection mirrors the form defaults.
        Self {
            sectors: vec![
                "Livelihood".to_string(),
                "Women Empowerment".to_string(),
                "Education".to_string(),
                "Health".to_string(),
                "Climate-resilient Agriculture".to_string(),
                "Agriculture".to_string(),
            ],
            geography: vec![
                "Pan-India".to_string(),
                "Uttarakhand".to_string(),
                "Himachal Pradesh".to_string(),
            ],
            deadline: default_deadline(),
            specific_organization: String::new(),
            output_format: OutputFormat::default(),
        }
    }
}

/// End of next month, so a fresh session has a sensible cutoff.
fn default_deadline() -> String {
    use chrono::Datelike;

    let today = chrono::Local::now().date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);
    let in_two_months = first_of_month + chrono::Months::new(2);
    let end_of_next_month = in_two_months - chrono::Days::new(1);
    end_of_next_month.format("%Y-%m-%d").to_string()
}
