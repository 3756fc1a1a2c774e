use crate::discover::types::Source;
use crate::llm::types::GroundingChunk;

/// Turn grounding metadata into displayable sources.
///
/// Grounding is best-effort: an entry contributes a `Source` only when both
/// uri and title are present and non-empty, otherwise it is skipped without
/// error. Order is preserved and duplicates are kept as returned.
pub fn extract_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    let mut sources = Vec::new();

    for chunk in chunks {
        let Some(web) = &chunk.web else {
            tracing::trace!("grounding chunk without web block skipped");
            continue;
        };
        match (web.uri.as_deref(), web.title.as_deref()) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                sources.push(Source {
                    title: title.to_string(),
                    uri: uri.to_string(),
                });
            }
            _ => {
                tracing::trace!("incomplete grounding chunk skipped");
            }
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::WebSource;

    fn chunk(uri: Option<&str>, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.map(String::from),
                title: title.map(String::from),
            }),
        }
    }

    #[test]
    fn keeps_only_complete_entries() {
        let chunks = vec![
            chunk(Some("https://a.example"), Some("A")),
            chunk(Some(""), Some("B")),
            chunk(None, Some("C")),
        ];

        let sources = extract_sources(&chunks);
        assert_eq!(
            sources,
            vec![Source {
                title: "A".to_string(),
                uri: "https://a.example".to_string(),
            }]
        );
    }

    #[test]
    fn missing_web_block_is_skipped() {
        let chunks = vec![GroundingChunk { web: None }];
        assert!(extract_sources(&chunks).is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let chunks = vec![
            chunk(Some("https://x.example"), Some("X")),
            chunk(Some("https://y.example"), Some("Y")),
            chunk(Some("https://x.example"), Some("X")),
        ];

        let sources = extract_sources(&chunks);
        let uris: Vec<&str> = sources.iter().map(|s| s.uri.as_str()).collect();
        assert_eq!(
            uris,
            ["https://x.example", "https://y.example", "https://x.example"]
        );
    }
}
