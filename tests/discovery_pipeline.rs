use oppfinder::discover::filters::SearchFilters;
use oppfinder::discover::{DiscoverError, Discovery};
use oppfinder::llm::types::{GroundedReply, GroundingChunk, WebSource};
use oppfinder::llm::{GroundedModel, ModelError};
use std::sync::{Arc, Mutex};

/// Scripted outcome for one generate call
enum Script {
    Reply(GroundedReply),
    MissingKey,
    RateLimited,
}

/// Fake grounded model that records the prompt it was handed
struct FakeModel {
    script: Script,
    seen_prompt: Arc<Mutex<Option<String>>>,
}

impl FakeModel {
    fn replying(reply: GroundedReply) -> (Self, Arc<Mutex<Option<String>>>) {
        let seen = Arc::new(Mutex::new(None));
        (
            Self {
                script: Script::Reply(reply),
                seen_prompt: seen.clone(),
            },
            seen,
        )
    }

    fn failing(script: Script) -> Self {
        Self {
            script,
            seen_prompt: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait::async_trait]
impl GroundedModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<GroundedReply, ModelError> {
        *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::MissingKey => Err(ModelError::MissingApiKey),
            Script::RateLimited => Err(ModelError::RateLimitExceeded),
        }
    }
}

fn grounding(uri: &str, title: &str) -> GroundingChunk {
    GroundingChunk {
        web: Some(WebSource {
            uri: Some(uri.to_string()),
            title: Some(title.to_string()),
        }),
    }
}

#[tokio::test]
async fn success_combines_opportunities_and_sources() {
    let reply = GroundedReply {
        text: r#"{"opportunities": [
            {"title": "Grant A", "type": "RFP"},
            {"title": "Tender B", "type": "EOI"}
        ]}"#
        .to_string(),
        grounding: vec![
            grounding("https://a.example", "Portal A"),
            GroundingChunk { web: None },
            grounding("https://b.example", "Portal B"),
        ],
    };

    let (model, seen_prompt) = FakeModel::replying(reply);
    let discovery = Discovery::new(model);

    let result = discovery.discover(&SearchFilters::default()).await.unwrap();

    assert_eq!(result.opportunities.len(), 2);
    assert_eq!(result.opportunities[0].title, "Grant A");
    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[1].uri, "https://b.example");

    // The built prompt reached the model and carried the filters.
    let prompt = seen_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Livelihood"));
}

#[tokio::test]
async fn empty_opportunity_list_is_success_not_error() {
    let (model, _) = FakeModel::replying(GroundedReply {
        text: r#"{"opportunities": []}"#.to_string(),
        grounding: vec![grounding("https://a.example", "Portal A")],
    });
    let discovery = Discovery::new(model);

    let result = discovery.discover(&SearchFilters::default()).await.unwrap();
    assert!(result.opportunities.is_empty());
    assert_eq!(result.sources.len(), 1);
}

#[tokio::test]
async fn fenced_reply_still_parses() {
    let (model, _) = FakeModel::replying(GroundedReply {
        text: "```json\n{\"opportunities\": [{\"title\": \"Fenced\"}]}\n```".to_string(),
        grounding: vec![],
    });
    let discovery = Discovery::new(model);

    let result = discovery.discover(&SearchFilters::default()).await.unwrap();
    assert_eq!(result.opportunities[0].title, "Fenced");
}

#[tokio::test]
async fn unparseable_reply_is_all_or_nothing() {
    let (model, _) = FakeModel::replying(GroundedReply {
        text: "Here are some opportunities I found: ...".to_string(),
        grounding: vec![grounding("https://a.example", "Portal A")],
    });
    let discovery = Discovery::new(model);

    let err = discovery
        .discover(&SearchFilters::default())
        .await
        .unwrap_err();
    // Parse failure propagates; the extracted sources are not salvaged.
    assert!(matches!(err, DiscoverError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_credential_maps_to_configuration_error() {
    let discovery = Discovery::new(FakeModel::failing(Script::MissingKey));

    let err = discovery
        .discover(&SearchFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoverError::Configuration(_)));
    assert!(err.to_string().contains("API key"));
}

#[tokio::test]
async fn service_failure_maps_to_provider_error() {
    let discovery = Discovery::new(FakeModel::failing(Script::RateLimited));

    let err = discovery
        .discover(&SearchFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoverError::Provider(_)));
}
