use super::types::{GeoconvResponse, RoutePlanParams, RoutePlanResponse};
use crate::sdk::config::BridgeConfig;
use crate::sdk::routing::coords::{CoordSystem, InternalPoint};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::RouteProvider;
use crate::sdk::util::rate_limit::{provider_limiter, wait_for_permit, Limiter};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

const GEOCONV_OK: &str = "ok";

/// Careland navigation API over blocking HTTP.
pub struct RemoteCarelandProvider {
    client: Client,
    api_key: String,
    base_url: String,
    plan: u32,
    limiter: Option<Limiter>,
}

impl RemoteCarelandProvider {
    pub fn new(config: &BridgeConfig) -> Result<Self, RoutingError> {
        // `None` disables reqwest's default 30s timeout
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            plan: config.plan,
            limiter: config.requests_per_minute.map(provider_limiter),
        })
    }

    fn pace(&self) {
        if let Some(limiter) = &self.limiter {
            wait_for_permit(limiter);
        }
    }

    fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, RoutingError> {
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Provider returned non-success status: {}. URL: {}\nBody: {}",
                status,
                url,
                text
            );
            return Err(RoutingError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse provider response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            RoutingError::from(e)
        })
    }
}

impl RouteProvider for RemoteCarelandProvider {
    fn route_plan(
        &self,
        origin: InternalPoint,
        destination: InternalPoint,
    ) -> Result<RoutePlanResponse, RoutingError> {
        self.pace();
        let url = format!("{}/api/v2/navi/routeplan", self.base_url);
        let params = serde_json::to_string(&RoutePlanParams::new(origin, destination, self.plan))?;
        log::debug!(
            "[PROVIDER] Calling routeplan for {:?} -> {:?}",
            origin,
            destination
        );

        let response = match self
            .client
            .get(&url)
            .query(&[("params", params.as_str()), ("ak", self.api_key.as_str())])
            .send()
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send routeplan request. URL: {}\nParams: {}\nError: {}",
                    url,
                    params,
                    e
                );
                return Err(e.into());
            }
        };

        let plan: RoutePlanResponse = Self::read_json(&url, response)?;
        log::debug!(
            "[PROVIDER] routeplan returned {} route(s), errorCode {}",
            plan.route_info.len(),
            plan.error_code
        );
        Ok(plan)
    }

    fn convert_coordinates(
        &self,
        coords: &[String],
        from: CoordSystem,
        to: CoordSystem,
    ) -> Result<Vec<[String; 2]>, RoutingError> {
        self.pace();
        let url = format!("{}/api/v2/pub/geoconv", self.base_url);
        let joined = coords.join(";");
        let (from_code, to_code) = (from.code().to_string(), to.code().to_string());
        log::debug!(
            "[PROVIDER] Calling geoconv for {} coordinate(s), {:?} -> {:?}",
            coords.len(),
            from,
            to
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ak", self.api_key.as_str()),
                ("coords", joined.as_str()),
                ("from", from_code.as_str()),
                ("to", to_code.as_str()),
            ])
            .send()
            .map_err(|e| {
                log::error!("Failed to send geoconv request. URL: {}\nError: {}", url, e);
                RoutingError::from(e)
            })?;

        let body: GeoconvResponse = Self::read_json(&url, response)?;
        if body.error_message != GEOCONV_OK {
            return Err(RoutingError::ApiError {
                code: body.error_code,
                message: body.error_message,
            });
        }
        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::config::{parse_key_values, BridgeConfig};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn provider_at(base_url: &str) -> RemoteCarelandProvider {
        let entries = parse_key_values(&format!("ak=test\nbase_url={}/\ntimeout_secs=2", base_url));
        RemoteCarelandProvider::new(&BridgeConfig::from_entries(&entries, None).unwrap()).unwrap()
    }

    /// Answers a single request with the given status line and body, then
    /// closes. Returns the base URL to reach it.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 8192];
                let _ = stream.read(&mut request);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let provider = provider_at("http://127.0.0.1:9");
        assert_eq!(provider.base_url, "http://127.0.0.1:9");
        assert!(provider.limiter.is_none());
    }

    #[test]
    fn refused_connection_is_unreachable() {
        // nothing listens on the discard port
        let provider = provider_at("http://127.0.0.1:9");
        let err = provider
            .route_plan(InternalPoint::new(1, 2), InternalPoint::new(3, 4))
            .unwrap_err();
        assert!(matches!(err, RoutingError::Unreachable(_)));
        assert!(err.is_upstream());

        let err = provider
            .convert_coordinates(&["1,2".to_string()], CoordSystem::Internal, CoordSystem::Gcj02)
            .unwrap_err();
        assert!(matches!(err, RoutingError::Unreachable(_)));
    }

    #[test]
    fn server_error_is_a_status_error() {
        let provider = provider_at(&serve_once("500 Internal Server Error", "busy"));
        let err = provider
            .route_plan(InternalPoint::new(1, 2), InternalPoint::new(3, 4))
            .unwrap_err();
        match &err {
            RoutingError::Status { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "busy");
            }
            other => panic!("expected a status error, got {:?}", other),
        }
        assert!(err.is_upstream());
    }

    #[test]
    fn non_json_body_is_malformed() {
        let provider = provider_at(&serve_once("200 OK", "<html>maintenance</html>"));
        let err = provider
            .route_plan(InternalPoint::new(1, 2), InternalPoint::new(3, 4))
            .unwrap_err();
        assert!(matches!(err, RoutingError::MalformedResponse(_)));
        assert!(err.is_upstream());
    }

    #[test]
    fn geoconv_rejection_is_an_api_error() {
        let provider = provider_at(&serve_once(
            "200 OK",
            r#"{"result":null,"errorCode":10001,"errorMessage":"invalid ak"}"#,
        ));
        let err = provider
            .convert_coordinates(&["1,2".to_string()], CoordSystem::Internal, CoordSystem::Gcj02)
            .unwrap_err();
        match &err {
            RoutingError::ApiError { code, message } => {
                assert_eq!(*code, 10001);
                assert_eq!(message, "invalid ak");
            }
            other => panic!("expected an api error, got {:?}", other),
        }
        assert!(err.is_upstream());
    }

    #[test]
    fn geoconv_success_returns_the_pairs() {
        let provider = provider_at(&serve_once(
            "200 OK",
            r#"{"result":[["113.94","22.54"]],"errorCode":0,"errorMessage":"ok"}"#,
        ));
        let pairs = provider
            .convert_coordinates(&["1,2".to_string()], CoordSystem::Internal, CoordSystem::Gcj02)
            .unwrap();
        assert_eq!(pairs, vec![["113.94".to_string(), "22.54".to_string()]]);
    }
}
