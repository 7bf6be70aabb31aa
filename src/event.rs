use std::{collections::HashMap, sync::Arc};

pub mod builtin;
pub mod handler;
pub mod implement;
pub mod model;

use crate::bot::role::RoleClassifier;
use handler::{Handler, MessageKind};
use model::{Envelope, Reply, kind};

/// Where an envelope goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Text starting with `/start`
    Start,
    Registered(MessageKind),
}

/// Routes envelopes to handlers by message type and stamps the sender's role
/// on every reply.
///
/// Built once, then shared read-only between requests.
pub struct Dispatcher {
    handlers: HashMap<MessageKind, Arc<dyn Handler>>,
    start_handler: Arc<dyn Handler>,
    classifier: RoleClassifier,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("kinds", &self.kinds())
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl Dispatcher {
    /// A dispatcher with the built-in handlers registered
    pub fn new(classifier: RoleClassifier) -> Self {
        let mut dispatcher = Self::empty(classifier);
        dispatcher.register(kind::TEXT, builtin::handle_text_input);
        dispatcher.register(kind::CALLBACK_QUERY, builtin::handle_callback_query);
        dispatcher.register(kind::BUTTON_CLICK, builtin::handle_button_click);
        dispatcher.register(kind::MENU_SELECTION, builtin::handle_menu_selection);
        dispatcher
    }

    /// No registered kinds, only the start handler
    pub fn empty(classifier: RoleClassifier) -> Self {
        Self {
            handlers: HashMap::new(),
            start_handler: Arc::new(builtin::handle_start),
            classifier,
        }
    }

    /// Registers `handler` for `kind`, returning the handler it replaced
    pub fn register<H: Handler>(
        &mut self,
        kind: impl Into<MessageKind>,
        handler: H,
    ) -> Option<Arc<dyn Handler>> {
        self.register_arc(kind.into(), Arc::new(handler))
    }

    pub fn register_arc(
        &mut self,
        kind: MessageKind,
        handler: Arc<dyn Handler>,
    ) -> Option<Arc<dyn Handler>> {
        tracing::debug!(%kind, handler = handler.name(), "handler registered");
        self.handlers.insert(kind, handler)
    }

    pub fn unregister(&mut self, kind: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.remove(kind)
    }

    pub fn set_start_handler<H: Handler>(&mut self, handler: H) {
        self.start_handler = Arc::new(handler);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(MessageKind::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn classifier(&self) -> &RoleClassifier {
        &self.classifier
    }

    /// First match wins: the start command, then the registry.
    pub fn route(&self, envelope: &Envelope) -> crate::Result<Route> {
        if envelope.message.is_start_command() {
            return Ok(Route::Start);
        }
        let message_type = envelope.message_type();
        match self.handlers.get_key_value(message_type) {
            Some((kind, _)) => Ok(Route::Registered(kind.clone())),
            None => Err(crate::Error::unknown_message_type(message_type)),
        }
    }

    fn handler(&self, route: &Route) -> Option<&Arc<dyn Handler>> {
        match route {
            Route::Start => Some(&self.start_handler),
            Route::Registered(kind) => self.handlers.get(kind.as_str()),
        }
    }

    pub async fn dispatch(&self, envelope: &Envelope) -> crate::Result<Reply> {
        tracing::info!(
            user_id = envelope.user_id,
            message_type = envelope.message_type(),
            data = %envelope.message.data_for_log(),
            timestamp = envelope.timestamp,
            metadata = ?envelope.metadata,
            "received webhook"
        );
        let route = self.route(envelope).inspect_err(|_| {
            tracing::warn!(
                message_type = envelope.message_type(),
                "unknown message type"
            );
        })?;
        let handler = self
            .handler(&route)
            .ok_or_else(|| crate::Error::unknown_message_type(envelope.message_type()))?;
        tracing::debug!(?route, handler = handler.name(), "invoking handler");
        let reply = handler.handle(envelope).await;
        let role = self.classifier.classify(envelope.user_id).await;
        tracing::debug!(user_id = envelope.user_id, %role, action = %reply.action, "dispatched");
        Ok(reply.with_role(role))
    }
}
