use super::{SearchPost, SearchQuery, TweetSearch};
use crate::config::TwitterConfig;
use crate::error::SearchError;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Client for the Twitter API v2 recent search endpoint.
pub struct TwitterSearchClient {
    api_base: String,
    bearer_token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent when the window had no matches.
    #[serde(default)]
    data: Vec<ApiTweet>,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    text: String,
    created_at: DateTime<Utc>,
}

impl TwitterSearchClient {
    pub fn new(bearer_token: String, config: &TwitterConfig) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tweetpulse/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bearer_token,
            client: builder.build()?,
        })
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/tweets/search/recent?query={}&start_time={}&end_time={}&max_results={}&tweet.fields=text,created_at",
            self.api_base,
            urlencoding::encode(&query.query),
            urlencoding::encode(&query.start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            urlencoding::encode(&query.end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            query.max_results,
        )
    }
}

fn parse_search_response(body: &str) -> Result<Vec<SearchPost>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .into_iter()
        .map(|t| SearchPost {
            text: t.text,
            created_at: t.created_at,
        })
        .collect())
}

#[async_trait]
impl TweetSearch for TwitterSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchPost>, SearchError> {
        let url = self.search_url(query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match status {
            s if s.is_success() => parse_search_response(&body),
            StatusCode::TOO_MANY_REQUESTS => Err(SearchError::RateLimited(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SearchError::Unauthorized {
                status: status.as_u16(),
            }),
            _ => Err(SearchError::Api {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TwitterSearchClient {
        TwitterSearchClient::new("token".to_string(), &TwitterConfig::default()).unwrap()
    }

    #[test]
    fn test_search_url_encodes_query_and_times() {
        let query = SearchQuery {
            query: "rust lang:en".to_string(),
            start: DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            end: DateTime::parse_from_rfc3339("2024-03-02T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            max_results: 100,
        };
        assert_eq!(
            client().search_url(&query),
            "https://api.twitter.com/2/tweets/search/recent?query=rust%20lang%3Aen&start_time=2024-03-01T00%3A00%3A00Z&end_time=2024-03-02T00%3A00%3A00Z&max_results=100&tweet.fields=text,created_at"
        );
    }

    #[test]
    fn test_trailing_slash_in_api_base_is_ignored() {
        let config = TwitterConfig {
            api_base: "http://localhost:9000/2/".to_string(),
            ..TwitterConfig::default()
        };
        let client = TwitterSearchClient::new("t".to_string(), &config).unwrap();
        assert_eq!(client.api_base, "http://localhost:9000/2");
    }

    #[test]
    fn test_client_with_proxy() {
        let config = TwitterConfig {
            proxy: Some("http://proxy.local:8080".to_string()),
            ..TwitterConfig::default()
        };
        assert!(TwitterSearchClient::new("t".to_string(), &config).is_ok());
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "data": [
                {"id": "1", "text": "first", "created_at": "2024-03-01T10:00:00.000Z"},
                {"id": "2", "text": "second", "created_at": "2024-03-01T11:30:00.000Z"}
            ],
            "meta": {"result_count": 2}
        }"#;
        let posts = parse_search_response(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "first");
        assert_eq!(posts[1].created_at.to_rfc3339(), "2024-03-01T11:30:00+00:00");
    }

    #[test]
    fn test_parse_empty_window_response() {
        let body = r#"{"meta": {"result_count": 0}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_response() {
        let body = r#"{"data": [{"text": "no timestamp"}]}"#;
        assert!(matches!(
            parse_search_response(body),
            Err(SearchError::Json(_))
        ));
    }
}
