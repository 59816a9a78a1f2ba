use dpi_config::{Config, EmailEnvironment};
use dpi_di::Provide;
use dpi_notify_contracts::NotifyService;
use tracing::{info, warn};

use crate::environment::{
    types::{Notify, RestServer},
    Provider,
};

pub async fn serve(config: Config, environment: EmailEnvironment) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config, environment)?;

    // Resolved again for every submission, only reported here.
    let notify: Notify = provider.provide();
    match notify.resolve_config() {
        Ok(dispatch) => info!(channel = %dispatch.channel.kind(), "Email delivery configured"),
        Err(err) => warn!("Email delivery is not configured: {err}"),
    }

    let server: RestServer = provider.provide();
    info!("Starting http server on {}", config.http.address);
    server.serve(config.http.address).await
}
