use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::AUTHORIZATION, StatusCode},
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, warn};
use serde_json::json;

use crate::services::identity_service::{IdentityError, IdentityProvider};

/// Token from an `Authorization: Bearer <token>` header. The scheme is case-insensitive.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(char::is_whitespace)?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

fn reject(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "message": message.into() }))
}

fn identity_error_response(err: &IdentityError) -> HttpResponse {
    match err {
        IdentityError::NotConfigured
        | IdentityError::InvalidUrl(_)
        | IdentityError::Unreachable(_)
        | IdentityError::Upstream(_) => {
            warn!("identity provider unavailable: {}", err);
            reject(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        IdentityError::InvalidToken => reject(StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

/// Rejects requests without a valid bearer token and stores the resolved
/// `AuthenticatedUser` in the request extensions.
///
/// Expects a `web::Data<dyn IdentityProvider>` in app data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(bearer_token)
                .map(str::to_string);
            let Some(token) = token else {
                let response = reject(StatusCode::UNAUTHORIZED, "No bearer token provided");
                return Ok(req.into_response(response).map_into_right_body());
            };

            let Some(provider) = req.app_data::<web::Data<dyn IdentityProvider>>().cloned() else {
                let response =
                    reject(StatusCode::SERVICE_UNAVAILABLE, "identity provider is not configured");
                return Ok(req.into_response(response).map_into_right_body());
            };

            match provider.authenticate(&token).await {
                Ok(user) => {
                    debug!("authenticated user {}", user.user_id);
                    req.extensions_mut().insert(user);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    let response = identity_error_response(&e);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
