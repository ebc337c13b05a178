//! HTTP Service
//!
//! Wraps the router with the policies every response goes through: CORS for
//! the browser storefront, a per-IP fixed window rate limit and response
//! compression. They sit on the [`Service`] rather than the router so CORS
//! preflights are answered even for paths without an `OPTIONS` handler.

use salvo::{
    compression::Compression,
    cors::{Cors, CorsHandler},
    http::{HeaderValue, Method, header},
    prelude::*,
    rate_limiter::{BasicQuota, FixedGuard, MokaStore, RateLimiter, RemoteIpIssuer},
};
use tracing::warn;

use crate::config::http::HttpPolicyConfig;

/// Build the service for `router` with the configured HTTP policies.
pub(crate) fn build_service(router: Router, config: &HttpPolicyConfig) -> Service {
    let limiter = RateLimiter::new(
        FixedGuard::new(),
        MokaStore::new(),
        RemoteIpIssuer,
        BasicQuota::new(config.rate_limit(), config.rate_limit_window()),
    );

    Service::new(router)
        .hoop(cors(config))
        .hoop(limiter)
        .hoop(Compression::new())
}

fn cors(config: &HttpPolicyConfig) -> CorsHandler {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(origin, %error, "ignoring invalid CORS origin");

                None
            }
        })
        .collect();

    Cors::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .into_handler()
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddr};

    use salvo::test::{RequestBuilder, TestClient};
    use serde_json::json;

    use super::*;

    const STOREFRONT: &str = "http://localhost:3000";

    #[handler]
    async fn catalog(res: &mut Response) {
        res.render(Json(json!({ "products": vec!["Fresh Apples"; 200] })));
    }

    fn config(rate_limit_max_requests: usize) -> HttpPolicyConfig {
        HttpPolicyConfig {
            cors_allowed_origins: vec![STOREFRONT.to_string()],
            rate_limit_max_requests,
            rate_limit_window_seconds: 900,
        }
    }

    fn service(rate_limit_max_requests: usize) -> Service {
        build_service(
            Router::with_path("products").get(catalog),
            &config(rate_limit_max_requests),
        )
    }

    fn from(ip: [u8; 4], builder: RequestBuilder) -> Request {
        let mut req = builder.build();

        *req.remote_addr_mut() = SocketAddr::from((Ipv4Addr::from(ip), 40_000)).into();

        req
    }

    fn header<'a>(res: &'a Response, name: &str) -> Option<&'a str> {
        res.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin_is_answered() {
        let res = service(100)
            .handle(from(
                [203, 0, 113, 7],
                TestClient::options("http://example.com/products")
                    .add_header("origin", STOREFRONT, true)
                    .add_header("access-control-request-method", "POST", true)
                    .add_header("access-control-request-headers", "authorization", true),
            ))
            .await;

        assert_eq!(
            header(&res, "access-control-allow-origin"),
            Some(STOREFRONT)
        );
        assert_eq!(
            header(&res, "access-control-allow-credentials"),
            Some("true")
        );
        assert!(
            header(&res, "access-control-allow-headers")
                .is_some_and(|headers| headers.to_ascii_lowercase().contains("authorization")),
            "preflight should allow the Authorization header"
        );
    }

    #[tokio::test]
    async fn test_unknown_origin_gets_no_cors_headers() {
        let res = service(100)
            .handle(from(
                [203, 0, 113, 7],
                TestClient::get("http://example.com/products")
                    .add_header("origin", "https://elsewhere.example", true),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(header(&res, "access-control-allow-origin"), None);
    }

    #[tokio::test]
    async fn test_requests_over_the_limit_are_rejected() {
        let service = service(2);

        for _ in 0..2 {
            let res = service
                .handle(from(
                    [203, 0, 113, 7],
                    TestClient::get("http://example.com/products"),
                ))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK));
        }

        let limited = service
            .handle(from(
                [203, 0, 113, 7],
                TestClient::get("http://example.com/products"),
            ))
            .await;

        assert_eq!(limited.status_code, Some(StatusCode::TOO_MANY_REQUESTS));

        let other_client = service
            .handle(from(
                [198, 51, 100, 1],
                TestClient::get("http://example.com/products"),
            ))
            .await;

        assert_eq!(
            other_client.status_code,
            Some(StatusCode::OK),
            "limits are tracked per client IP"
        );
    }

    #[tokio::test]
    async fn test_responses_are_compressed_when_accepted() {
        let res = service(100)
            .handle(from(
                [203, 0, 113, 7],
                TestClient::get("http://example.com/products")
                    .add_header("accept-encoding", "gzip", true),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(header(&res, "content-encoding"), Some("gzip"));
    }
}
