use crate::stations::station_code::StationCode;
use crate::types::raw_record::RawWeatherRecord;
use crate::weather_data::error::FetchError;
use log::debug;
use reqwest::Client;
use std::future::Future;

pub const DEFAULT_BASE_URL: &str = "https://avwx.rest/api/metar/";

/// Something that can produce the raw METAR record for a station.
///
/// [`AvwxSource`] is the production implementation. The fetcher only depends on this
/// trait, so batches can be driven by any other source.
pub trait MetarSource: Send + Sync + 'static {
    fn fetch(
        &self,
        station: &StationCode,
    ) -> impl Future<Output = Result<RawWeatherRecord, FetchError>> + Send;
}

/// Fetches METARs from the AVWX REST API.
#[derive(Debug, Clone)]
pub struct AvwxSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl AvwxSource {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        AvwxSource {
            client,
            base_url,
            token,
        }
    }

    pub fn url_for(&self, station: &StationCode) -> String {
        format!("{}{}", self.base_url, station)
    }
}

impl MetarSource for AvwxSource {
    async fn fetch(&self, station: &StationCode) -> Result<RawWeatherRecord, FetchError> {
        let url = self.url_for(station);
        debug!("Requesting METAR from {}", url);

        let mut request = self.client.get(&url).query(&[("options", "info")]);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("HTTP error for {}: {}", url, status);
            return Err(FetchError::HttpStatus { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response on a local port and hands back the request head.
    async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}/metar", addr), rx)
    }

    fn local_source(base_url: String, token: Option<String>) -> AvwxSource {
        let client = Client::builder().no_proxy().build().unwrap();
        AvwxSource::new(client, base_url, token)
    }

    #[test]
    fn test_url_for_station() {
        let source = AvwxSource::new(Client::new(), "https://example.test/metar", None);
        let station = StationCode::new("jfk").unwrap();
        assert_eq!(source.url_for(&station), "https://example.test/metar/KJFK");

        let default = AvwxSource::new(Client::new(), DEFAULT_BASE_URL, None);
        assert_eq!(default.url_for(&station), "https://avwx.rest/api/metar/KJFK");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        // Port 9 (discard) on localhost is not expected to be serving HTTP.
        let client = Client::builder().no_proxy().build().unwrap();
        let source = AvwxSource::new(client, "http://127.0.0.1:9/", None);
        let station = StationCode::new("KJFK").unwrap();
        let result = source.fetch(&station).await;
        assert!(matches!(result, Err(FetchError::NetworkRequest(_, _))));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_http_error() {
        let (base_url, _) = serve_once("404 Not Found", "").await;
        let source = local_source(base_url, None);
        let station = StationCode::new("ZZZZ").unwrap();

        match source.fetch(&station).await {
            Err(FetchError::HttpStatus { url, status }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/metar/ZZZZ"), "unexpected url {}", url);
            }
            other => panic!("expected an HTTP status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let (base_url, _) = serve_once("200 OK", "{not json").await;
        let source = local_source(base_url, None);
        let station = StationCode::new("KJFK").unwrap();

        let result = source.fetch(&station).await;
        assert!(matches!(result, Err(FetchError::Decode { .. })), "{:?}", result);
    }

    #[tokio::test]
    async fn test_success_sends_info_option_and_token() {
        let (base_url, request) =
            serve_once("200 OK", r#"{"Station":"KJFK","Temperature":"06"}"#).await;
        let source = local_source(base_url, Some("secret".to_string()));
        let station = StationCode::new("jfk").unwrap();

        let record = source.fetch(&station).await.unwrap();
        assert_eq!(record.station, "KJFK");
        assert_eq!(record.temperature, "06");

        let request = request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /metar/KJFK?"), "{}", request_line);
        assert!(request_line.contains("options=info"), "{}", request_line);
        assert!(request_line.contains("token=secret"), "{}", request_line);
    }
}
