use serde::Deserialize;
use std::sync::Arc;

use super::utils::decode_checked;
use crate::errors::CapabilityResult;
use crate::transport::AuthenticatedTransport;

pub const NEWS_COUNTRY_PATH: &str = "/news/country";
pub const NEWS_TOPIC_PATH: &str = "/news/topic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsSubject {
    Country(String),
    Topic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsReport {
    pub subject: NewsSubject,
    pub text: String,
}

#[derive(Deserialize)]
struct NewsResponse {
    response: String,
}

/// Headlines by country or by topic
pub struct NewsClient {
    transport: Arc<AuthenticatedTransport>,
}

impl NewsClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    pub async fn by_country(&self, country: &str) -> CapabilityResult<NewsReport> {
        let text = self.fetch(NEWS_COUNTRY_PATH, "country", country).await?;
        Ok(NewsReport {
            subject: NewsSubject::Country(country.to_string()),
            text,
        })
    }

    pub async fn by_topic(&self, topic: &str) -> CapabilityResult<NewsReport> {
        let text = self.fetch(NEWS_TOPIC_PATH, "topic", topic).await?;
        Ok(NewsReport {
            subject: NewsSubject::Topic(topic.to_string()),
            text,
        })
    }

    async fn fetch(&self, path: &str, param: &str, value: &str) -> CapabilityResult<String> {
        let request = self.transport.get(path).query(&[(param, value)]);
        let response = self.transport.call(request).await?;
        let body: NewsResponse = decode_checked(response).await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Anonymous;
    use crate::configs::TransportConfig;
    use crate::errors::CapabilityError;
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> NewsClient {
        let transport = AuthenticatedTransport::new(
            TransportConfig::new(mock_server.uri()),
            Arc::new(Anonymous),
        )
        .unwrap();
        NewsClient::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn test_news_by_country_encodes_parameter() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(NEWS_COUNTRY_PATH))
            .and(query_param("country", "United Kingdom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "📰 Headline one - BBC\n📰 Headline two - Guardian"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = client_for(&mock_server).await.by_country("United Kingdom").await?;
        assert_eq!(
            report.subject,
            NewsSubject::Country("United Kingdom".into())
        );
        assert!(report.text.starts_with("📰 Headline one"));
        Ok(())
    }

    #[tokio::test]
    async fn test_news_by_topic() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(NEWS_TOPIC_PATH))
            .and(query_param("topic", "AI & robotics"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response": "No news found."})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = client_for(&mock_server).await.by_topic("AI & robotics").await?;
        assert_eq!(report.subject, NewsSubject::Topic("AI & robotics".into()));
        assert_eq!(report.text, "No news found.");
        Ok(())
    }

    #[tokio::test]
    async fn test_news_error_field() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(NEWS_COUNTRY_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "Unsupported country"})),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).await.by_country("Atlantis").await;
        assert!(
            matches!(
                result,
                Err(CapabilityError::Application(ref message)) if message == "Unsupported country"
            )
        );
    }
}
