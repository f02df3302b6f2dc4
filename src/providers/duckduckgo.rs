//! DuckDuckGo HTML provider
//!
//! Scrapes the no-JavaScript result page. No API key is needed, which makes
//! this the last resort of the fallback chain.

use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::network::{accept_html, generate_user_agent};
use crate::results::{ProviderKind, SearchResultRow};
use crate::search::SearchQuery;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

static RESULT_BODY: Lazy<Selector> = Lazy::new(|| selector(".result__body"));
static RESULT_TITLE: Lazy<Selector> = Lazy::new(|| selector(".result__title a"));
static RESULT_SNIPPET: Lazy<Selector> = Lazy::new(|| selector(".result__snippet"));
static RESULT_DOMAIN: Lazy<Selector> = Lazy::new(|| selector(".result__url__domain"));

/// Bare result anchors, used when the block markup is not recognised
static RESULT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("result anchor pattern")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// DuckDuckGo HTML search
pub struct DuckDuckGo {
    html_url: String,
}

impl DuckDuckGo {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            html_url: config.base_url.clone(),
        }
    }

    fn parse_html_results(&self, html: &str, count: usize) -> Vec<SearchResultRow> {
        let document = Html::parse_document(html);

        document
            .select(&RESULT_BODY)
            .filter_map(|block| {
                let anchor = block.select(&RESULT_TITLE).next()?;
                let title = anchor.text().collect::<String>().trim().to_string();
                let link = anchor.value().attr("href").unwrap_or_default();

                Some(
                    SearchResultRow::new(title, unwrap_redirect(link))
                        .with_snippet(first_text(block, &RESULT_SNIPPET))
                        .with_source(first_text(block, &RESULT_DOMAIN)),
                )
            })
            .take(count)
            .collect()
    }

    fn parse_anchors(&self, html: &str, count: usize) -> Vec<SearchResultRow> {
        RESULT_ANCHOR
            .captures_iter(html)
            .take(count)
            .map(|caps| {
                let title = TAG.replace_all(&caps[2], "").trim().to_string();
                SearchResultRow::new(title, unwrap_redirect(&caps[1]))
            })
            .collect()
    }
}

/// Whitespace-joined text of the first element matching `sel`
fn first_text(block: ElementRef<'_>, sel: &Selector) -> String {
    block
        .select(sel)
        .next()
        .map(|el| {
            el.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Resolve `//duckduckgo.com/l/?uddg=<target>` redirect links to the target
fn unwrap_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let target = Url::parse(&absolute).ok().and_then(|url| {
        let is_redirect = url
            .host_str()
            .map_or(false, |h| h.ends_with("duckduckgo.com"))
            && url.path().starts_with("/l/");
        if !is_redirect {
            return None;
        }
        url.query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned())
    });

    target.unwrap_or_else(|| href.to_string())
}

impl SearchProvider for DuckDuckGo {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckduckgoHtml
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let mut form_data = HashMap::new();
        form_data.insert("q".to_string(), query.query.clone());

        Ok(ProviderRequest::post(&self.html_url)
            .header("User-Agent", generate_user_agent())
            .header("Accept", accept_html())
            .form(form_data))
    }

    fn response(
        &self,
        response: ProviderResponse,
        count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let rows = self.parse_html_results(&response.text, count);
        if !rows.is_empty() {
            return Ok(rows);
        }

        Ok(self.parse_anchors(&response.text, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"
<html><body>
<div class="result results_links web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title">
      <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">Rust <b>Programming</b> Language</a>
    </h2>
    <div class="result__extras__url">
      <a class="result__url" href="https://www.rust-lang.org/"><span class="result__url__domain">www.rust-lang.org</span></a>
    </div>
    <a class="result__snippet" href="https://www.rust-lang.org/">A language empowering <b>everyone</b></a>
  </div>
</div>
<div class="result results_links web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title"><a class="result__a" href="https://doc.rust-lang.org/book/">The Book</a></h2>
  </div>
</div>
<div class="result results_links web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title"><a class="result__a" href="https://crates.io/">crates.io</a></h2>
  </div>
</div>
</body></html>
"#;

    fn ddg(url: &str) -> DuckDuckGo {
        DuckDuckGo::new(&ProviderConfig::new(url))
    }

    fn html_response(text: &str) -> ProviderResponse {
        ProviderResponse {
            status: 200,
            text: text.to_string(),
            url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }

    #[test]
    fn test_duckduckgo_request() {
        let request = ddg("https://html.duckduckgo.com/html/")
            .request(&SearchQuery::new("rust programming"))
            .unwrap();

        assert!(request.url.contains("duckduckgo.com"));
        assert!(request.headers["User-Agent"].starts_with("Mozilla/5.0"));
        match request.data {
            Some(RequestBody::Form(form)) => assert_eq!(form["q"], "rust programming"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_parse_result_blocks() {
        let rows = ddg("http://x").response(html_response(PAGE), 10).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "Rust Programming Language");
        assert_eq!(rows[0].link, "https://www.rust-lang.org/");
        assert_eq!(rows[0].snippet, "A language empowering everyone");
        assert_eq!(rows[0].source, "www.rust-lang.org");
        assert_eq!(rows[1].link, "https://doc.rust-lang.org/book/");
        assert_eq!(rows[1].snippet, "");
    }

    #[test]
    fn test_parse_stops_at_count() {
        let rows = ddg("http://x").response(html_response(PAGE), 2).unwrap();
        assert_eq!(rows.len(), 2);

        let rows = ddg("http://x").response(html_response(PAGE), 0).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_anchor_fallback_without_result_blocks() {
        let html = r#"<table><tr><td><a class="result__a" href="https://example.com/a">Example <b>A</b></a></td></tr>
<tr><td><a class="result__a" href="https://example.com/b">Example B</a></td></tr></table>"#;
        let rows = ddg("http://x").response(html_response(html), 10).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], SearchResultRow::new("Example A", "https://example.com/a"));
        assert_eq!(rows[1].snippet, "");
        assert_eq!(rows[1].source, "");
    }

    #[test]
    fn test_unwrap_redirect() {
        assert_eq!(
            unwrap_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fx&rut=1"),
            "https://example.com/x"
        );
        assert_eq!(unwrap_redirect("https://example.com/l/?uddg=zzz"), "https://example.com/l/?uddg=zzz");
        assert_eq!(unwrap_redirect("not a url"), "not a url");
    }

    #[tokio::test]
    async fn test_duckduckgo_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/html/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = ddg(&format!("{}/html/", server.uri()))
            .search(&client, &SearchQuery::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: 503, .. }));
    }
}
