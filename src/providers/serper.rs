//! Serper (Google SERP proxy) provider

use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::results::{ProviderKind, SearchResultRow};
use crate::search::SearchQuery;
use serde_json::json;

/// Upper bound Serper accepts for `num`
const MAX_NUM: usize = 20;

/// Serper search (keyed POST-JSON API)
pub struct Serper {
    base_url: String,
    api_key: Option<String>,
}

impl Serper {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.credential().map(str::to_string),
        }
    }
}

impl SearchProvider for Serper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Serper
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential {
                provider: self.name(),
                env_var: "SERPER_API_KEY",
            })?;

        let body = json!({
            "q": query.query,
            "gl": query.options.gl.as_deref().unwrap_or("kr"),
            "hl": query.options.hl.as_deref().unwrap_or("ko"),
            "num": query.count.min(MAX_NUM),
        });

        Ok(ProviderRequest::post(&self.base_url)
            .header("X-API-KEY", api_key)
            .json(body))
    }

    fn response(
        &self,
        response: ProviderResponse,
        count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError> {
        let json = response.json(self.name())?;

        let rows = nested_array(&json, &["organic"])
            .iter()
            .take(count)
            .map(|item| {
                SearchResultRow::new(str_field(item, "title"), str_field(item, "link"))
                    .with_snippet(str_field(item, "snippet"))
                    .with_source(str_field(item, "source"))
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use crate::providers::RequestBody;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn serper(base_url: &str) -> Serper {
        Serper::new(&ProviderConfig::new(base_url).with_api_key("serper-key"))
    }

    #[test]
    fn test_num_is_capped() {
        let request = serper("https://google.serper.dev/search")
            .request(&SearchQuery::new("rust").with_count(50))
            .unwrap();

        match request.data {
            Some(RequestBody::Json(body)) => {
                assert_eq!(body["num"], 20);
                assert_eq!(body["gl"], "kr");
                assert_eq!(body["hl"], "ko");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_serper_search() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-API-KEY", "serper-key"))
            .and(body_json(json!({"q": "rust", "gl": "kr", "hl": "ko", "num": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "A", "link": "https://a.example", "snippet": "a", "source": "a.example"},
                    {"title": "B", "link": "https://b.example"},
                    {"title": "C", "link": "https://c.example"},
                    {"title": "D", "link": "https://d.example"}
                ]
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = serper(&server.uri())
            .search(&client, &SearchQuery::new("rust").with_count(3))
            .await
            .unwrap();

        assert_eq!(response.provider, ProviderKind::Serper);
        assert_eq!(response.matched, 3);
        assert_eq!(response.rows[0].source, "a.example");
        assert_eq!(response.rows[2].title, "C");
    }
}
