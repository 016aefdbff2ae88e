use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::utils::decode_checked;
use crate::errors::CapabilityResult;
use crate::geolocation::Geolocator;
use crate::transport::AuthenticatedTransport;

pub const WEATHER_PATH: &str = "/weather";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub condition: String,
    pub temp_c: f64,
    pub temp_f: f64,
}

/// Current conditions for a city or for the device position
pub struct WeatherClient {
    transport: Arc<AuthenticatedTransport>,
}

impl WeatherClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    /// `city` may also be a "lat,lon" pair
    pub async fn by_city(&self, city: &str) -> CapabilityResult<WeatherReport> {
        let request = self.transport.get(WEATHER_PATH).query(&[("city", city)]);
        let response = self.transport.call(request).await?;
        decode_checked(response).await
    }

    /// Resolve the device position first; a denied or unsupported lookup ends the
    /// request without touching the network.
    pub async fn here(&self, geolocator: &dyn Geolocator) -> CapabilityResult<WeatherReport> {
        let coordinates = geolocator.locate().await?;
        debug!(?coordinates, "resolved device position");
        self.by_city(&coordinates.as_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Anonymous;
    use crate::configs::TransportConfig;
    use crate::errors::{CapabilityError, GeolocationError};
    use crate::geolocation::{Coordinates, DeniedLocation, FixedLocation, NoGeolocation};
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(mock_server: &MockServer) -> WeatherClient {
        let transport = AuthenticatedTransport::new(
            TransportConfig::new(mock_server.uri()),
            Arc::new(Anonymous),
        )
        .unwrap();
        WeatherClient::new(Arc::new(transport))
    }

    fn tokyo() -> serde_json::Value {
        json!({"location": "Tokyo", "condition": "Partly cloudy", "temp_c": 21.0, "temp_f": 69.8})
    }

    #[tokio::test]
    async fn test_weather_by_city() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("city", "Tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokyo()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = client_for(&mock_server).await.by_city("Tokyo").await?;
        assert_eq!(
            report,
            WeatherReport {
                location: "Tokyo".into(),
                condition: "Partly cloudy".into(),
                temp_c: 21.0,
                temp_f: 69.8,
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_weather_here_sends_coordinates() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("city", "35.68,139.69"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokyo()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let locator = FixedLocation(Coordinates::new(35.68, 139.69));
        let report = client_for(&mock_server).await.here(&locator).await?;
        assert_eq!(report.location, "Tokyo");
        Ok(())
    }

    #[tokio::test]
    async fn test_weather_here_denied_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokyo()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(matches!(
            client.here(&DeniedLocation).await,
            Err(CapabilityError::Geolocation(GeolocationError::PermissionDenied))
        ));
        assert!(matches!(
            client.here(&NoGeolocation).await,
            Err(CapabilityError::Geolocation(GeolocationError::Unsupported))
        ));
    }

    #[tokio::test]
    async fn test_weather_error_field() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"error": "Weather fetch failed: 'location'"})),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).await.by_city("Nowhere").await;
        assert!(matches!(result, Err(CapabilityError::Application(_))));
    }
}
