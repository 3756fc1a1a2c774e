use crate::discover::filters::SearchFilters;

/// Build the retrieval instruction for one discovery request.
///
/// Pure and deterministic: the same filters always produce the same prompt.
/// The output schema is spelled out field by field so the reply can be
/// parsed without guesswork, and the model is told to extract only what
/// the retrieved material actually contains.
pub fn build_prompt(filters: &SearchFilters) -> String {
    let sectors = filters.sectors.join(", ");
    let regions = filters.geography.join(", ");

    let mut prompt = format!(
        "You are a CSR Research Assistant. Your task is to find REAL, ACTIVE RFP \
         (Request for Proposal), RFQ (Request for Quotation), and EOI (Expression \
         of Interest) opportunities.\n\n\
         Target Sectors: {sectors}\n\
         Target Regions: {regions}\n\
         Deadline Cutoff: {deadline} (include opportunities due before this date, \
         or marked 'Open' if ongoing)\n\n",
        sectors = sectors,
        regions = regions,
        deadline = filters.deadline,
    );

    let organization = filters.specific_organization.trim();
    if organization.is_empty() {
        prompt.push_str(
            "Use web search to sweep current listings from major CSR and funding \
             aggregator portals, NGO funding sites, corporate foundation pages, and \
             government tender listings.\n\n",
        );
    } else {
        prompt.push_str(&format!(
            "Prioritize announcements from {organization}: search their official \
             site, press releases, and related social-media updates first, then \
             widen to portals that list their opportunities.\n\n",
        ));
    }

    prompt.push_str(
        "EXTRACT only opportunities that appear in the retrieved material. Do not \
         make up data. If exact details like budget are missing, use \"Not specified\".\n\n\
         Return the data as a JSON object with a single key \"opportunities\" which \
         is an array of objects. Each object must have these fields:\n\
         - title: Name of the RFP/RFQ/EOI\n\
         - organization: Issuing organization\n\
         - focusArea: The specific sector (e.g., Education, Health)\n\
         - region: Geographic eligibility (e.g., Pan-India, Uttarakhand)\n\
         - budget: Budget amount if available, else \"Not specified\"\n\
         - deadline: Submission deadline (YYYY-MM-DD or \"Open\")\n\
         - type: \"RFP\", \"RFQ\", or \"EOI\"\n\
         - link: The direct URL to the opportunity found in the search\n\
         - brief: A short 1-sentence description\n\n\
         Ensure the response is valid JSON with no markdown formatting around it.",
    );

    prompt
}
