use crate::config::MapsConfig;
use crate::domain::Coordinate;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Geocode request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Geocode service answered with HTTP {status}")]
    NetworkFailure { status: StatusCode },
    #[error("Geocode service rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },
    #[error("No address found for this location")]
    NoResultFound,
    #[error("Geocode response could not be parsed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Invalid geocode endpoint {url:?}")]
    InvalidEndpoint { url: String },
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
}

/// Reverse geocoder: coordinate → human-readable address
///
/// Every lookup is a single attempt with no retry and no timeout.
pub struct AddressLookup {
    client: Client,
    config: MapsConfig,
}

impl AddressLookup {
    pub fn new(config: MapsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: MapsConfig) -> Self {
        Self { client, config }
    }

    /// Looks up the formatted address of the first result
    pub async fn address(&self, coordinate: &Coordinate) -> Result<String, LookupError> {
        let url = self.request_url(coordinate)?;
        debug!(%coordinate, "reverse geocoding");

        self.fetch(url).await.inspect_err(|err| {
            warn!(%coordinate, error = %err, "reverse geocoding failed");
        })
    }

    async fn fetch(&self, url: Url) -> Result<String, LookupError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        // The body of a failed response is never read
        if !status.is_success() {
            return Err(LookupError::NetworkFailure { status });
        }
        let body = response.text().await?;
        address_from_response(status, &body)
    }

    pub fn request_url(&self, coordinate: &Coordinate) -> Result<Url, LookupError> {
        let params = [
            ("latlng", coordinate.to_query_pair()),
            ("key", self.config.api_key.clone()),
        ];
        Url::parse_with_params(&self.config.geocode_url, &params).map_err(|_| {
            LookupError::InvalidEndpoint {
                url: self.config.geocode_url.clone(),
            }
        })
    }
}

/// Extracts the first formatted address from a geocode response
///
/// Non-2xx statuses are network failures; an empty result list is an
/// error, never an empty string.
pub fn address_from_response(status: StatusCode, body: &str) -> Result<String, LookupError> {
    if !status.is_success() {
        return Err(LookupError::NetworkFailure { status });
    }

    let response: GeocodeResponse = serde_json::from_str(body)?;
    if let Some(first) = response.results.into_iter().next() {
        return Ok(first.formatted_address);
    }

    match response.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => Err(LookupError::NoResultFound),
        Some(other) => Err(LookupError::Rejected {
            status: other.to_string(),
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one HTTP request with a canned response and returns the endpoint
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/maps/api/geocode/json")
    }

    fn json_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    async fn lookup_against(response: String) -> AddressLookup {
        let mut config = MapsConfig::new("k3y");
        config.geocode_url = serve_once(response).await;
        let client = Client::builder().no_proxy().build().unwrap();
        AddressLookup::with_client(client, config)
    }

    #[tokio::test]
    async fn failed_status_wins_over_unreadable_body() {
        // Promises more body than it sends, then hangs up
        let response =
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 512\r\n\r\npartial".to_string();
        let lookup = lookup_against(response).await;

        let err = lookup.address(&Coordinate::new(37.78, -122.43)).await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::NetworkFailure { status } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[tokio::test]
    async fn empty_results_over_http_is_no_result_found() {
        let lookup =
            lookup_against(json_response(r#"{"results": [], "status": "ZERO_RESULTS"}"#)).await;

        let err = lookup.address(&Coordinate::new(0.0, 0.0)).await.unwrap_err();

        assert!(matches!(err, LookupError::NoResultFound));
    }

    #[tokio::test]
    async fn address_is_fetched_over_http() {
        let lookup = lookup_against(json_response(
            r#"{"results": [{"formatted_address": "1 Market St, San Francisco"}], "status": "OK"}"#,
        ))
        .await;

        let address = lookup.address(&Coordinate::new(37.79, -122.39)).await.unwrap();

        assert_eq!(address, "1 Market St, San Francisco");
    }

    #[test]
    fn single_result_address_is_returned_unchanged() {
        let body = r#"
{
  "results": [
    {
      "address_components": [],
      "formatted_address": "  1 Market St, San Francisco, CA 94105, USA",
      "geometry": { "location": { "lat": 37.7936, "lng": -122.3950 } },
      "place_id": "ChIJ"
    }
  ],
  "status": "OK"
}
"#;
        let address = address_from_response(StatusCode::OK, body).unwrap();
        assert_eq!(address, "  1 Market St, San Francisco, CA 94105, USA");
    }

    #[test]
    fn first_of_many_results_wins() {
        let body = r#"{"results": [{"formatted_address": "A"}, {"formatted_address": "B"}], "status": "OK"}"#;
        assert_eq!(address_from_response(StatusCode::OK, body).unwrap(), "A");
    }

    #[test]
    fn empty_results_is_no_result_found() {
        let body = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let err = address_from_response(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, LookupError::NoResultFound));

        let missing = address_from_response(StatusCode::OK, "{}").unwrap_err();
        assert!(matches!(missing, LookupError::NoResultFound));
    }

    #[test]
    fn non_success_status_is_network_failure() {
        let err = address_from_response(StatusCode::SERVICE_UNAVAILABLE, "").unwrap_err();
        assert!(matches!(
            err,
            LookupError::NetworkFailure { status } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[test]
    fn denied_key_is_not_reported_as_empty() {
        let body = r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        let err = address_from_response(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, LookupError::Rejected { ref status, .. } if status == "REQUEST_DENIED"));
    }

    #[test]
    fn malformed_body_is_reported() {
        let err = address_from_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse(_)));
    }

    #[test]
    fn request_url_carries_point_and_key() {
        let lookup = AddressLookup::new(MapsConfig::new("k3y"));
        let url = lookup.request_url(&Coordinate::new(37.78, -122.43)).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("latlng".to_string(), "37.78,-122.43".to_string()),
                ("key".to_string(), "k3y".to_string()),
            ]
        );
        assert_eq!(url.path(), "/maps/api/geocode/json");
    }

    #[test]
    fn bad_endpoint_is_reported() {
        let mut config = MapsConfig::new("k");
        config.geocode_url = "not a url".to_string();
        let lookup = AddressLookup::new(config);
        assert!(matches!(
            lookup.request_url(&Coordinate::new(0.0, 0.0)),
            Err(LookupError::InvalidEndpoint { .. })
        ));
    }
}
