use super::model::{Envelope, Reply};
use std::{borrow::Borrow, sync::Arc};

/// Registry key, the `message_type` a handler answers to
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageKind(Arc<str>);

impl From<&str> for MessageKind {
    fn from(kind: &str) -> Self {
        Self(Arc::from(kind))
    }
}

impl From<String> for MessageKind {
    fn from(kind: String) -> Self {
        Self(Arc::from(kind))
    }
}

impl Borrow<str> for MessageKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl MessageKind {
    pub fn new(kind: impl AsRef<str>) -> Self {
        Self(Arc::from(kind.as_ref()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Produces the reply for one message type. Handlers are total: every
/// envelope routed to them yields a [`Reply`].
#[async_trait::async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Shown in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
    async fn handle(&self, envelope: &Envelope) -> Reply;
}

/// Plain functions are handlers too
#[async_trait::async_trait]
impl<F> Handler for F
where
    F: Fn(&Envelope) -> Reply + Send + Sync + 'static,
{
    async fn handle(&self, envelope: &Envelope) -> Reply {
        self(envelope)
    }
}
