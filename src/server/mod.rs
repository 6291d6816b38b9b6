//! Server construction and wiring.

mod config;

pub use config::{ServerConfig, StoreBackend};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};

use crate::domain::AvatarService;
use crate::domain::ports::AvatarStore;
use crate::inbound::http::avatars::{create_avatar, delete_avatar, get_avatar, update_avatar};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::health::health;
use crate::inbound::http::state::HttpState;
use crate::outbound::{InMemoryAvatarRepository, RemoteAvatarStore};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the avatar store selected by configuration.
///
/// `memory` wires the domain service over the process-local repository;
/// `remote` delegates straight to the upstream avatar service.
///
/// # Errors
/// Returns [`std::io::Error`] when the remote HTTP client cannot be built.
pub fn build_store(config: &ServerConfig) -> std::io::Result<Arc<dyn AvatarStore>> {
    match &config.backend {
        StoreBackend::Memory => Ok(Arc::new(AvatarService::new(Arc::new(
            InMemoryAvatarRepository::new(),
        )))),
        StoreBackend::Remote { base_url } => {
            let store = RemoteAvatarStore::new(base_url.clone()).map_err(|e| {
                std::io::Error::other(format!("avatar API client construction failed: {e}"))
            })?;
            Ok(Arc::new(store))
        }
    }
}

/// Assemble the application with all routes mounted on the given state.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Deserialisation failures surface through the envelope like every
    // other client error.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(crate::domain::Error::invalid_request(format!(
            "Bad request: {err}"
        )))
        .into()
    });

    let api = web::scope("/api")
        .service(create_avatar)
        .service(get_avatar)
        .service(update_avatar)
        .service(delete_avatar);

    let app = App::new()
        .app_data(state)
        .app_data(json_config)
        .service(api)
        .service(health)
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(Envelope::<serde_json::Value>::fail("Route not found"))
        }));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bind and drive the HTTP server until shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or running the
/// listener fails.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let store = build_store(&config)?;
    let state = web::Data::new(HttpState::new(store, config.asset_base_url.clone()));
    tracing::info!(bind_addr = %config.bind_addr, "starting avatar backend");

    HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use url::Url;

    fn test_state() -> web::Data<HttpState> {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let store = build_store(&config).expect("memory store");
        web::Data::new(HttpState::new(store, config.asset_base_url.clone()))
    }

    #[actix_web::test]
    async fn health_reports_the_server_running() {
        let app = actix_test::init_service(build_app(test_state())).await;

        let request = actix_test::TestRequest::get().uri("/health").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["message"], json!("Server is running"));
    }

    #[actix_web::test]
    async fn unknown_routes_get_an_envelope_404() {
        let app = actix_test::init_service(build_app(test_state())).await;

        let request = actix_test::TestRequest::get().uri("/nope").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["message"], json!("Route not found"));
    }

    #[actix_web::test]
    async fn malformed_json_gets_an_envelope_400() {
        let app = actix_test::init_service(build_app(test_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/avatar")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], json!(true));
    }

    #[tokio::test]
    async fn build_store_honours_the_backend_selection() {
        let memory = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        // Smoke the wiring through the port.
        let store = build_store(&memory).expect("memory store");
        assert!(
            store
                .get(&crate::domain::AdUserId::new("u1").expect("user id"))
                .await
                .expect("memory store reachable")
                .is_none()
        );

        let remote = memory.with_backend(StoreBackend::Remote {
            base_url: Url::parse("http://avatars.internal/api").expect("base url"),
        });
        // Construction alone must not touch the network.
        assert!(build_store(&remote).is_ok());
    }
}
