use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use dpi_core_contact_contracts::ContactService;
use dpi_di::Build;
use dpi_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub cors_allowed_origins: Arc<[HeaderValue]>,
}

impl RestServerConfig {
    pub fn new(cors_allowed_origins: &[String]) -> anyhow::Result<Self> {
        let cors_allowed_origins = cors_allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            cors_allowed_origins,
        })
    }
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    pub async fn serve(self, address: SocketAddr) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind to {address}"))?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let origins = self.config.cors_allowed_origins;

        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .apply_if(!origins.is_empty(), |router| {
                middlewares::cors::add(router, &origins)
            });
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
