use std::{net::SocketAddr, sync::Arc};

use axum::{Router, extract::DefaultBodyLimit};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::event::Dispatcher;
mod middleware;
mod service;

pub use service::ErrorDetail;

#[derive(Debug)]
pub struct WebHookService {
    pub(crate) bind: SocketAddr,
    pub(crate) task: JoinHandle<()>,
}

#[derive(Debug, Clone)]
pub struct WebHookServiceApp {
    dispatcher: Arc<Dispatcher>,
    secret: Option<Arc<str>>,
    config: Arc<WebHookServiceConfig>,
}

#[derive(Debug, Clone)]
pub struct WebHookServiceConfig {
    body_size_limit: usize,
}

impl WebHookServiceApp {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        secret: Option<&str>,
        body_size_limit: usize,
    ) -> Self {
        Self {
            dispatcher,
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
            config: Arc::new(WebHookServiceConfig { body_size_limit }),
        }
    }
    pub fn build_service(&self) -> Router<()> {
        let app = self.clone();
        axum::Router::new()
            .route(
                crate::consts::WEBHOOK_PATH,
                axum::routing::post(service::webhook_service),
            )
            .layer(DefaultBodyLimit::max(app.config.body_size_limit))
            .layer(axum::middleware::from_fn_with_state(
                app.clone(),
                middleware::secret_check,
            ))
            .with_state(app)
    }
}

pub struct WebHookServiceAppConfig {
    pub bind: SocketAddr,
    pub max_body_size: usize,
    pub secret: Option<String>,
}

impl WebHookService {
    /// Address actually bound, useful when binding port 0
    pub fn get_bind(&self) -> SocketAddr {
        self.bind
    }
    /// Waits for the server task to exit after cancellation
    pub async fn join(self) -> crate::Result<()> {
        self.task
            .await
            .map_err(|e| crate::Error::unexpected(format!("webhook task failed: {e}")))
    }
    pub async fn run(
        config: WebHookServiceAppConfig,
        dispatcher: Arc<Dispatcher>,
        ct: CancellationToken,
    ) -> crate::Result<Self> {
        let app =
            WebHookServiceApp::new(dispatcher, config.secret.as_deref(), config.max_body_size);
        let tokio_tcp_listen = tokio::net::TcpListener::bind(config.bind)
            .await
            .map_err(crate::Error::context("failed to bind to address"))?;
        let bind = tokio_tcp_listen
            .local_addr()
            .map_err(crate::Error::context("failed to read bound address"))?;
        let service = app.build_service();
        tracing::info!(%bind, path = crate::consts::WEBHOOK_PATH, "webhook service listening");
        let task = tokio::spawn(async move {
            let result = axum::serve(tokio_tcp_listen, service)
                .with_graceful_shutdown(async move {
                    ct.cancelled().await;
                    tracing::info!("webhook service shutdown");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("webhook service error: {:?}", err);
            }
        });
        Ok(Self { bind, task })
    }
}
