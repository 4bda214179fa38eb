//! Mock provider for consumer tests.
//!
//! Serves recorded interactions from a local `wiremock` server so consumer
//! code can be exercised against exactly what the pact promises.

use crate::contract::Interaction;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEFAULT_JSON_CONTENT_TYPE: &str = "application/json";

/// A running mock provider.
pub struct MockProvider {
    server: MockServer,
}

impl MockProvider {
    /// Start a mock provider answering the given interactions. Each
    /// interaction is expected to be hit exactly once.
    pub async fn start(interactions: &[Interaction]) -> Self {
        let server = MockServer::start().await;
        for interaction in interactions {
            mock_for(interaction).mount(&server).await;
        }
        Self { server }
    }

    /// Base URI of the mock provider, without a trailing slash.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Panics if any interaction was not received the expected number of times.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

fn mock_for(interaction: &Interaction) -> Mock {
    let request = &interaction.request;
    let expected = &interaction.response;

    let mut mock = Mock::given(method(request.method.as_str())).and(path(request.path.as_str()));
    for (key, value) in request.query_pairs() {
        mock = mock.and(query_param(key, value));
    }

    let mut template = ResponseTemplate::new(expected.status);
    for (name, value) in &expected.headers {
        if !name.eq_ignore_ascii_case("content-type") {
            template = template.insert_header(name.as_str(), value.as_str());
        }
    }
    if let Some(body) = &expected.body {
        let content_type = expected
            .header("content-type")
            .unwrap_or(DEFAULT_JSON_CONTENT_TYPE);
        template = template.set_body_raw(body.to_string(), content_type);
    }

    mock.respond_with(template)
        .named(interaction.description.as_str())
        .expect(1)
}
