//! HTTP adapter for lego's `httpreq` provider.
//!
//! - `GET /` health check
//! - `POST /present`, `POST /cleanup` with HTTP Basic auth

use std::collections::HashMap;

use acme_dns_proxy_core::dns01::{encode_key_authorization, fqdn_from_txt_record_name, to_fqdn};
use acme_dns_proxy_core::{Action, AuthorizingProxy, Challenge, Remote, Request};
use actix_web::http::header::{self, ContentType};
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors visible to HTTP clients. Proxy failures all collapse into `Unauthorized`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChallengeResponse {
    fqdn: String,
    value: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(route));
}

async fn route(
    req: HttpRequest,
    body: web::Bytes,
    proxy: web::Data<AuthorizingProxy>,
) -> Result<HttpResponse, ApiError> {
    let method = req.method();
    let path = req.path();

    if method == Method::GET {
        if path == "/" {
            return Ok(HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .body("OK\n"));
        }
        tracing::warn!(%method, path, "not found");
        return Err(ApiError::NotFound);
    }
    if method != Method::POST {
        tracing::warn!(%method, path, "method not allowed");
        return Err(ApiError::MethodNotAllowed);
    }

    let Ok(action) = path.parse::<Action>() else {
        tracing::warn!(%method, path, "not found");
        return Err(ApiError::NotFound);
    };

    let request = parse_request(&req, action, &body)
        .inspect_err(|e| tracing::warn!(%method, path, error = %e, "bad request"))?;
    let response = ChallengeResponse {
        fqdn: request.challenge.fqdn.clone(),
        value: request.challenge.encoded_key_auth.clone(),
    };

    // Details are logged by the request sink; the client only learns that it failed.
    proxy
        .handle(request)
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(response))
}

fn parse_request(req: &HttpRequest, action: Action, body: &[u8]) -> Result<Request, ApiError> {
    let payload: HashMap<String, String> = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("cannot parse request body: {e}")))?;
    let challenge = challenge_from_payload(&payload);
    let auth_token = basic_auth_token(req)?;

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    Ok(Request {
        action,
        auth_token,
        challenge,
        remote: Remote {
            address: req.peer_addr().map(|a| a.to_string()).unwrap_or_default(),
            client_name: user_agent.to_string(),
        },
    })
}

/// lego sends `{domain, token, keyAuth}` in RAW mode and `{fqdn, value}` otherwise.
fn challenge_from_payload(payload: &HashMap<String, String>) -> Challenge {
    let field = |key: &str| payload.get(key).map_or("", String::as_str);
    let is_raw = ["domain", "token", "keyAuth"]
        .iter()
        .all(|key| payload.contains_key(*key));

    if is_raw {
        Challenge::new(
            &to_fqdn(field("domain")),
            encode_key_authorization(field("keyAuth")),
        )
    } else {
        Challenge::new(&fqdn_from_txt_record_name(field("fqdn")), field("value"))
    }
}

/// Token for the ACL: lowercase hex SHA-256 of `user:password`.
fn basic_auth_token(req: &HttpRequest) -> Result<String, ApiError> {
    let invalid = || ApiError::BadRequest("invalid basic auth header".to_string());

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(invalid)?;
    let (scheme, encoded) = value.split_once(' ').ok_or_else(invalid)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(invalid());
    }
    let decoded = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
    let credentials = String::from_utf8(decoded).map_err(|_| invalid())?;
    if !credentials.contains(':') {
        return Err(invalid());
    }

    Ok(hex::encode(Sha256::digest(credentials.as_bytes())))
}
