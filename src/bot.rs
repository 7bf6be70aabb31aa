pub mod methods;
pub mod role;

use std::{net::SocketAddr, ops::Deref, path::Path, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

use crate::{
    event::{
        Dispatcher,
        handler::{Handler, MessageKind},
        implement::webhook::{WebHookService, WebHookServiceApp, WebHookServiceAppConfig},
    },
    http::client::reqwest_client::ApiClient,
};
use role::{MembershipCheck, RoleClassifier};

/// Read once at startup, never mutated. Every optional value only switches a
/// feature off when absent.
#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct BotConfig {
    /// Credential for the chat platform api, enables the vip check
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub vip_channel_id: Option<String>,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_membership_timeout")]
    pub membership_timeout: Duration,
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default = "default_body_size_limit")]
    pub body_size_limit: usize,
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_api_base_url() -> String {
    crate::consts::API_DOMAIN.to_string()
}
fn default_membership_timeout() -> Duration {
    crate::consts::MEMBERSHIP_TIMEOUT
}
fn default_body_size_limit() -> usize {
    crate::consts::DEFAULT_BODY_SIZE
}
fn default_database_path() -> String {
    crate::consts::DEFAULT_DATABASE_PATH.to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            vip_channel_id: None,
            admin_id: None,
            api_base_url: default_api_base_url(),
            membership_timeout: default_membership_timeout(),
            webhook_secret: None,
            body_size_limit: default_body_size_limit(),
            database_path: default_database_path(),
        }
    }
}

impl BotConfig {
    /// Reads a JSON config file, absent keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(crate::Error::context("read config file"))?;
        let config = serde_json::from_slice(&bytes)
            .map_err(crate::Error::context("parse config file"))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

pub struct BotInner {
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) api_client: Option<ApiClient>,
    pub(crate) ct: tokio_util::sync::CancellationToken,
    pub(crate) config: BotConfig,
}

/// Server context: configuration, dispatcher and shutdown signal.
///
/// Cheap to clone, everything inside is behind an [`Arc`].
#[derive(Clone)]
pub struct Bot {
    inner: Arc<BotInner>,
}

impl Bot {
    /// A bot with only the built-in handlers
    pub fn new(config: BotConfig) -> Self {
        Self::builder(config).build()
    }
    pub fn builder(config: BotConfig) -> BotBuilder {
        BotBuilder {
            config,
            handlers: Vec::new(),
            membership: None,
        }
    }
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }
    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }
    /// The axum router serving the webhook, without binding anything
    pub fn router(&self) -> axum::Router {
        WebHookServiceApp::new(
            self.dispatcher.clone(),
            self.config.webhook_secret.as_deref(),
            self.config.body_size_limit,
        )
        .build_service()
    }
    pub async fn start_webhook_service(&self, bind: SocketAddr) -> crate::Result<WebHookService> {
        WebHookService::run(
            WebHookServiceAppConfig {
                bind,
                max_body_size: self.config.body_size_limit,
                secret: self.config.webhook_secret.clone(),
            },
            self.dispatcher.clone(),
            self.ct.child_token(),
        )
        .await
    }
    pub fn stop(&self) {
        self.inner.ct.cancel();
    }
    pub fn is_stopped(&self) -> bool {
        self.inner.ct.is_cancelled()
    }
}

impl Deref for Bot {
    type Target = BotInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct BotBuilder {
    config: BotConfig,
    handlers: Vec<(MessageKind, Arc<dyn Handler>)>,
    membership: Option<Arc<dyn MembershipCheck>>,
}

impl BotBuilder {
    /// Adds or replaces the handler for `kind`
    pub fn handler<H: Handler>(mut self, kind: impl Into<MessageKind>, handler: H) -> Self {
        let handler: Arc<dyn Handler> = Arc::new(handler);
        self.handlers.push((kind.into(), handler));
        self
    }
    /// Membership lookup used instead of the chat api client
    pub fn membership_check<M: MembershipCheck>(self, membership: M) -> Self {
        Self {
            membership: Some(Arc::new(membership)),
            ..self
        }
    }
    pub fn build(self) -> Bot {
        let config = self.config;
        let api_client = config
            .bot_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| ApiClient::new(token, &config.api_base_url, config.membership_timeout));
        let membership = self.membership.or_else(|| {
            api_client
                .clone()
                .map(|client| Arc::new(client) as Arc<dyn MembershipCheck>)
        });
        let mut classifier = RoleClassifier::new();
        if let Some(admin_id) = &config.admin_id {
            classifier = classifier.admin_id(admin_id);
        }
        match (&config.vip_channel_id, membership) {
            (Some(channel_id), Some(membership)) => {
                classifier =
                    classifier.vip_channel(channel_id, membership, config.membership_timeout);
            }
            (Some(_), None) => {
                tracing::warn!("vip channel configured without bot token, vip check disabled")
            }
            _ => {}
        }
        let mut dispatcher = Dispatcher::new(classifier);
        for (kind, handler) in self.handlers {
            dispatcher.register_arc(kind, handler);
        }
        tracing::info!(kinds = ?dispatcher.kinds(), "dispatcher ready");
        Bot {
            inner: Arc::new(BotInner {
                dispatcher: Arc::new(dispatcher),
                api_client,
                ct: tokio_util::sync::CancellationToken::new(),
                config,
            }),
        }
    }
}
