use crate::api::{
    ApiError, CheckedStateUpdate, ListId, ListSummary, NewItem, NewList, TodoApi, TodoList,
};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// `TodoApi` over HTTP. All paths hang off the configured base url.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|source| ApiError::Transport {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ApiError> {
        debug!(%method, %url, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let request = self.client.get(url.clone());
        let body = self.execute(Method::GET, url.clone(), request).await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl TodoApi for HttpApi {
    async fn list_summaries(&self) -> Result<Vec<ListSummary>, ApiError> {
        let url = self.endpoint(&["api", "lists"], false)?;
        self.get_json(url).await
    }

    async fn create_list(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "lists"], true)?;
        let request = self.client.post(url.clone()).json(&NewList { name });
        self.execute(Method::POST, url, request).await?;
        Ok(())
    }

    async fn delete_list(&self, id: &ListId) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "lists", id.as_str()], false)?;
        let request = self.client.delete(url.clone());
        self.execute(Method::DELETE, url, request).await?;
        Ok(())
    }

    async fn get_list(&self, id: &ListId) -> Result<TodoList, ApiError> {
        let url = self.endpoint(&["api", "lists", id.as_str()], false)?;
        self.get_json(url).await
    }

    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "lists", list_id.as_str(), "items"], false)?;
        let request = self.client.post(url.clone()).json(&NewItem { label });
        self.execute(Method::POST, url, request).await?;
        Ok(())
    }

    async fn set_checked(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "lists", list_id.as_str(), "checked_state"], false)?;
        let request = self.client.put(url.clone()).json(&CheckedStateUpdate {
            item_id,
            checked_state: checked,
        });
        self.execute(Method::PUT, url, request).await?;
        Ok(())
    }

    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "lists", list_id.as_str(), "items", item_id], false)?;
        let request = self.client.delete(url.clone());
        self.execute(Method::DELETE, url, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn api(base_url: &str) -> HttpApi {
        HttpApi::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let api = api("http://localhost:3001");
        assert_eq!(
            api.endpoint(&["api", "lists"], false).unwrap().as_str(),
            "http://localhost:3001/api/lists"
        );
        assert_eq!(
            api.endpoint(&["api", "lists"], true).unwrap().as_str(),
            "http://localhost:3001/api/lists/"
        );
        assert_eq!(
            api.endpoint(&["api", "lists", "a b/c"], false)
                .unwrap()
                .as_str(),
            "http://localhost:3001/api/lists/a%20b%2Fc"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let api = api("http://example.com/proxy/");
        assert_eq!(
            api.endpoint(&["api", "lists"], false).unwrap().as_str(),
            "http://example.com/proxy/api/lists"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let bad = |url: &str| {
            HttpApi::new(&ApiConfig {
                base_url: url.to_string(),
                timeout_secs: None,
            })
        };
        assert!(matches!(bad("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(bad("mailto:someone@example.com"), Err(ApiError::InvalidUrl(_))));
    }

    /// Accept a single connection, answer it with `status` and `body`, and
    /// hand back the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(request).unwrap()
        });
        (base_url, server)
    }

    /// Headers are in and the body matches `content-length`.
    fn request_complete(raw: &[u8]) -> bool {
        let Some(head_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&raw[..head_end]);
        let body_len = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= head_end + 4 + body_len
    }

    #[tokio::test]
    async fn test_list_summaries_decodes_numeric_ids() {
        let (base_url, server) =
            serve_once("200 OK", r#"[{"id":1,"name":"Groceries","item_count":2}]"#).await;
        let rows = api(&base_url).list_summaries().await.unwrap();
        assert_eq!(
            rows,
            vec![ListSummary {
                id: ListId::new("1"),
                name: "Groceries".into(),
                item_count: 2,
            }]
        );
        assert!(server.await.unwrap().starts_with("GET /api/lists HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_create_list_posts_name_to_trailing_slash_path() {
        let (base_url, server) = serve_once("201 Created", "").await;
        api(&base_url).create_list("Chores").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/lists/ HTTP/1.1\r\n"));
        assert!(request.ends_with(r#"{"name":"Chores"}"#));
    }

    #[tokio::test]
    async fn test_server_error_becomes_status_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", "").await;
        let result = api(&base_url).list_summaries().await;
        assert!(matches!(
            result,
            Err(ApiError::Status { method, status, .. })
                if method == Method::GET && status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_becomes_decode_error() {
        let (base_url, server) = serve_once("200 OK", "<html>not json</html>").await;
        let result = api(&base_url).get_list(&ListId::new("1")).await;
        assert!(matches!(result, Err(ApiError::Decode { .. })));
        assert!(server.await.unwrap().starts_with("GET /api/lists/1 HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_refused_connection_becomes_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = api(&base_url).delete_list(&ListId::new("1")).await;
        assert!(matches!(result, Err(ApiError::Transport { .. })));
    }
}
