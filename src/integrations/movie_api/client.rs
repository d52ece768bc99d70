// src/integrations/movie_api/client.rs
//
// Movie REST API client
//
// ARCHITECTURE:
// - Four JSON endpoints: list, create, update, delete
// - One request per call: no retries, no batching, no caching
// - Every failure surfaces as a TransportError
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never validates records; callers submit validated records only

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, Method, RequestBuilder, Url};
use std::time::Duration;

use crate::domain::{MovieId, MovieRecord};
use crate::error::TransportError;

/// The four operations the catalog needs from the movie server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieClient: Send + Sync {
    /// `GET /allmovies`
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, TransportError>;

    /// `POST /addmovies` with the record minus its id
    async fn create_movie(&self, record: &MovieRecord) -> Result<MovieRecord, TransportError>;

    /// `PUT /updatemovie/{id}` with the full record
    async fn update_movie(
        &self,
        id: &MovieId,
        record: &MovieRecord,
    ) -> Result<MovieRecord, TransportError>;

    /// `DELETE /delete/{id}`
    async fn delete_movie(&self, id: &MovieId) -> Result<(), TransportError>;
}

/// reqwest-backed MovieClient
pub struct HttpMovieClient {
    base_url: Url,
    http_client: Client,
}

impl HttpMovieClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| TransportError::InvalidBaseUrl(base_url.to_string()))?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// Send a request and return the raw body of a 2xx response
    async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<String, TransportError> {
        let response = request.send().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            warn!("Movie API returned {} for {}", status, url);
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// Submit a record and read back the server's copy of it
    ///
    /// Falls back to the submitted record when the response body is not a movie.
    async fn submit(
        &self,
        method: Method,
        url: Url,
        record: &MovieRecord,
    ) -> Result<MovieRecord, TransportError> {
        debug!("{} {}", method, url);
        let request = self.http_client.request(method, url.clone()).json(record);
        let body = self.execute(request, &url).await?;

        match serde_json::from_str::<MovieRecord>(&body) {
            Ok(saved) => Ok(saved),
            Err(e) => {
                debug!("Response from {} is not a movie ({}), keeping submitted record", url, e);
                Ok(record.clone())
            }
        }
    }
}

#[async_trait]
impl MovieClient for HttpMovieClient {
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, TransportError> {
        let url = self.endpoint(&["allmovies"]);
        debug!("GET {}", url);

        let body = self
            .execute(self.http_client.get(url.clone()), &url)
            .await?;

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })?;

        // One malformed row must not hide the rest of the table
        let movies = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value::<MovieRecord>(row) {
                Ok(movie) => Some(movie),
                Err(e) => {
                    warn!("Skipping movie row {} from {}: {}", index, url, e);
                    None
                }
            })
            .collect();

        Ok(movies)
    }

    async fn create_movie(&self, record: &MovieRecord) -> Result<MovieRecord, TransportError> {
        let url = self.endpoint(&["addmovies"]);
        self.submit(Method::POST, url, &record.without_id()).await
    }

    async fn update_movie(
        &self,
        id: &MovieId,
        record: &MovieRecord,
    ) -> Result<MovieRecord, TransportError> {
        let url = self.endpoint(&["updatemovie", id.as_str()]);
        self.submit(Method::PUT, url, record).await
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), TransportError> {
        let url = self.endpoint(&["delete", id.as_str()]);
        debug!("DELETE {}", url);

        self.execute(self.http_client.delete(url.clone()), &url)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(base_url: &str) -> HttpMovieClient {
        HttpMovieClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    /// Serve exactly one HTTP response and hand back the raw request text
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    fn dune() -> MovieRecord {
        MovieRecord {
            id: None,
            name: "Dune".to_string(),
            duration: "2h".to_string(),
            rating: 8.0,
        }
    }

    #[test]
    fn test_endpoints_join_base_url() {
        let client = client("http://localhost:8585");
        assert_eq!(
            client.endpoint(&["allmovies"]).as_str(),
            "http://localhost:8585/allmovies"
        );
        assert_eq!(
            client.endpoint(&["updatemovie", "42"]).as_str(),
            "http://localhost:8585/updatemovie/42"
        );
    }

    #[test]
    fn test_endpoints_keep_base_path_prefix() {
        let client = client("http://localhost:8585/api/");
        assert_eq!(
            client.endpoint(&["delete", "7"]).as_str(),
            "http://localhost:8585/api/delete/7"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let client = client("http://localhost:8585");
        assert_eq!(
            client.endpoint(&["delete", "a/b c"]).as_str(),
            "http://localhost:8585/delete/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpMovieClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidBaseUrl(_))));

        let result = HttpMovieClient::new("mailto:someone@example.com", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_list_movies_decodes_array() {
        let body = json!([
            { "id": 1, "name": "Dune", "duration": "2h", "rating": 8 },
            { "id": "b", "name": "Alien", "duration": "117m", "rating": 8.5 }
        ])
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let movies = client(&base_url).list_movies().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /allmovies HTTP/1.1"));
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, Some(MovieId::new("1")));
        assert_eq!(movies[1].name, "Alien");
    }

    #[tokio::test]
    async fn test_create_posts_record_without_id() {
        let (base_url, server) = serve_once("201 Created", String::new()).await;

        let mut record = dune();
        record.id = Some(MovieId::new("ignored"));
        let saved = client(&base_url).create_movie(&record).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /addmovies HTTP/1.1"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!({ "name": "Dune", "duration": "2h", "rating": 8.0 }));
        assert_eq!(saved, dune());
    }

    #[tokio::test]
    async fn test_update_puts_to_id_path_and_reads_back() {
        let body = json!({ "id": 42, "name": "Dune", "duration": "155m", "rating": 8 }).to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let mut record = dune();
        record.id = Some(MovieId::new("42"));
        record.duration = "155m".to_string();
        let saved = client(&base_url)
            .update_movie(&MovieId::new("42"), &record)
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("PUT /updatemovie/42 HTTP/1.1"));
        assert!(request.contains("\"id\":\"42\""));
        assert_eq!(saved.duration, "155m");
    }

    #[tokio::test]
    async fn test_delete_hits_delete_path() {
        let (base_url, server) = serve_once("200 OK", "{}".to_string()).await;

        client(&base_url)
            .delete_movie(&MovieId::new("42"))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("DELETE /delete/42 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", "boom".to_string()).await;

        let result = client(&base_url).list_movies().await;
        server.await.unwrap();

        match result {
            Err(TransportError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_skips_malformed_rows() {
        let body = json!([
            { "_id": "a", "id": "a", "name": "Dune", "duration": "2h", "rating": 8, "__v": 0 },
            { "_id": "b", "name": "Alien", "duration": "117m", "rating": null },
            { "_id": "c", "name": "Heat", "duration": "170m" },
            { "_id": "d", "name": "Up", "duration": "96m", "rating": "7.5" }
        ])
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let movies = client(&base_url).list_movies().await.unwrap();
        server.await.unwrap();

        let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Dune", "Up"]);
        assert_eq!(movies[0].id, Some(MovieId::new("a")));
    }

    #[tokio::test]
    async fn test_undecodable_list_is_transport_error() {
        let (base_url, server) = serve_once("200 OK", "{\"movies\": 3}".to_string()).await;

        let result = client(&base_url).list_movies().await;
        server.await.unwrap();

        assert!(matches!(result, Err(TransportError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = client(&base_url).list_movies().await;
        assert!(matches!(result, Err(TransportError::Request { .. })));
    }
}
