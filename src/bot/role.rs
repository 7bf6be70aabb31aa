use std::{sync::Arc, time::Duration};

use crate::{
    http::client::reqwest_client::ApiClient,
    model::{ChatMemberStatus, Role},
};

/// Remote lookup of a user's status in a chat
#[async_trait::async_trait]
pub trait MembershipCheck: Send + Sync + 'static {
    async fn chat_member_status(
        &self,
        chat_id: &str,
        user_id: i64,
    ) -> crate::Result<ChatMemberStatus>;
}

#[async_trait::async_trait]
impl MembershipCheck for ApiClient {
    async fn chat_member_status(
        &self,
        chat_id: &str,
        user_id: i64,
    ) -> crate::Result<ChatMemberStatus> {
        Ok(self.get_chat_member(chat_id, user_id).await?.status)
    }
}

#[derive(Clone)]
struct VipCheck {
    channel_id: Arc<str>,
    membership: Arc<dyn MembershipCheck>,
    timeout: Duration,
}

/// Resolves the [`Role`] of a user.
///
/// The configured admin id wins without any remote call. Otherwise, when a vip
/// channel and a membership capability are both present, one bounded lookup
/// decides between vip and free. Lookup failures of any kind count as free.
#[derive(Clone, Default)]
pub struct RoleClassifier {
    admin_id: Option<Arc<str>>,
    vip: Option<VipCheck>,
}

impl std::fmt::Debug for RoleClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleClassifier")
            .field("admin_id", &self.admin_id)
            .field("vip_channel", &self.vip.as_ref().map(|v| &v.channel_id))
            .finish()
    }
}

impl RoleClassifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn admin_id(self, admin_id: impl AsRef<str>) -> Self {
        let admin_id = admin_id.as_ref().trim();
        Self {
            admin_id: (!admin_id.is_empty()).then(|| Arc::from(admin_id)),
            ..self
        }
    }
    pub fn vip_channel(
        self,
        channel_id: impl AsRef<str>,
        membership: Arc<dyn MembershipCheck>,
        timeout: Duration,
    ) -> Self {
        let channel_id = channel_id.as_ref().trim();
        if channel_id.is_empty() {
            return self;
        }
        Self {
            vip: Some(VipCheck {
                channel_id: Arc::from(channel_id),
                membership,
                timeout,
            }),
            ..self
        }
    }
    pub fn has_vip_check(&self) -> bool {
        self.vip.is_some()
    }

    pub async fn classify(&self, user_id: i64) -> Role {
        if self
            .admin_id
            .as_deref()
            .is_some_and(|admin_id| admin_id == user_id.to_string())
        {
            return Role::Admin;
        }
        let Some(vip) = &self.vip else {
            return Role::Free;
        };
        if vip.is_vip(user_id).await {
            Role::Vip
        } else {
            Role::Free
        }
    }
}

impl VipCheck {
    async fn is_vip(&self, user_id: i64) -> bool {
        let lookup = self.membership.chat_member_status(&self.channel_id, user_id);
        let result = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(crate::Error::context("vip membership lookup"))
            .and_then(|status| status);
        match result {
            Ok(status) => {
                tracing::debug!(user_id, ?status, "vip membership resolved");
                status.is_vip()
            }
            Err(err) => {
                tracing::warn!(user_id, %err, "vip membership check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    type Outcome = fn() -> crate::Result<ChatMemberStatus>;

    struct FakeMembership {
        calls: AtomicUsize,
        outcome: Outcome,
        delay: Duration,
    }

    impl FakeMembership {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
                delay: Duration::ZERO,
            })
        }
        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome: || Ok(ChatMemberStatus::Member),
                delay,
            })
        }
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl MembershipCheck for FakeMembership {
        async fn chat_member_status(
            &self,
            chat_id: &str,
            _user_id: i64,
        ) -> crate::Result<ChatMemberStatus> {
            assert_eq!(chat_id, "@vip");
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.outcome)()
        }
    }

    fn classifier(membership: Arc<FakeMembership>) -> RoleClassifier {
        RoleClassifier::new().admin_id(" 1 ").vip_channel(
            "@vip",
            membership,
            crate::consts::MEMBERSHIP_TIMEOUT,
        )
    }

    #[tokio::test]
    async fn admin_short_circuits() {
        let membership = FakeMembership::new(|| Ok(ChatMemberStatus::Member));
        let classifier = classifier(membership.clone());
        assert_eq!(classifier.classify(1).await, Role::Admin);
        assert_eq!(membership.calls(), 0);
    }

    #[tokio::test]
    async fn member_statuses_are_vip() {
        for outcome in [
            (|| Ok(ChatMemberStatus::Member)) as Outcome,
            || Ok(ChatMemberStatus::Administrator),
            || Ok(ChatMemberStatus::Creator),
        ] {
            let membership = FakeMembership::new(outcome);
            assert_eq!(classifier(membership.clone()).classify(2).await, Role::Vip);
            assert_eq!(membership.calls(), 1);
        }
    }

    #[tokio::test]
    async fn other_statuses_are_free() {
        for outcome in [
            (|| Ok(ChatMemberStatus::Left)) as Outcome,
            || Ok(ChatMemberStatus::Kicked),
            || Ok(ChatMemberStatus::Restricted),
            || Ok(ChatMemberStatus::Unknown),
        ] {
            let membership = FakeMembership::new(outcome);
            assert_eq!(classifier(membership).classify(2).await, Role::Free);
        }
    }

    #[tokio::test]
    async fn lookup_error_is_free() {
        let membership = FakeMembership::new(|| Err(crate::Error::unexpected("boom")));
        assert_eq!(classifier(membership.clone()).classify(2).await, Role::Free);
        assert_eq!(membership.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_timeout_is_free() {
        let membership = FakeMembership::slow(Duration::from_secs(60));
        let started = tokio::time::Instant::now();
        assert_eq!(classifier(membership).classify(2).await, Role::Free);
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn without_vip_config_everyone_is_free() {
        let classifier = RoleClassifier::new();
        assert!(!classifier.has_vip_check());
        assert_eq!(classifier.classify(1).await, Role::Free);

        let membership = FakeMembership::new(|| Ok(ChatMemberStatus::Member));
        let classifier =
            RoleClassifier::new().vip_channel("  ", membership.clone(), Duration::from_secs(1));
        assert_eq!(classifier.classify(1).await, Role::Free);
        assert_eq!(membership.calls(), 0);
    }
}
