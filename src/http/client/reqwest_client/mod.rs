use std::{sync::Arc, time::Duration};

use crate::{
    http::api::{
        Api, Response,
        chat::{GetChatMember, GetChatMemberRequest},
    },
    model::ChatMember,
};
use reqwest::{ClientBuilder, Url};

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    /// `{domain}/bot{token}`, never logged
    base_url: Arc<str>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a default client for the bot identified by `token`
    pub fn new(token: &str, domain: &str, timeout: Duration) -> Self {
        let client = ClientBuilder::new()
            .https_only(domain.starts_with("https://"))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "api client builder failed, using reqwest defaults");
                reqwest::Client::default()
            });
        Self::from_client(client, token, domain, timeout)
    }

    /// Bring your own client
    pub fn from_client(
        client: reqwest::Client,
        token: &str,
        domain: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", domain.trim_end_matches('/'), token).into(),
            timeout,
        }
    }

    /// Sends one request
    ///
    /// ```rust,no_run,ignore
    /// let resp = client.send::<GetChatMember>(&request).await?;
    /// ```
    pub async fn send<A: Api>(&self, request: &A::Request) -> crate::Result<Response<A::Response>> {
        let url = Url::parse(format!("{}{}", self.base_url, A::path(request)).as_str())
            .map_err(|_| crate::Error::unexpected("invalid api url"))?;
        let resp = self
            .client
            .request(A::METHOD, url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| crate::Error::context("send request")(e.without_url()))?;
        resp.json::<Response<A::Response>>()
            .await
            .map_err(|e| crate::Error::context("parse response")(e.without_url()))
    }

    /// Looks up `user_id` in `chat_id`
    pub async fn get_chat_member(&self, chat_id: &str, user_id: i64) -> crate::Result<ChatMember> {
        let request = GetChatMemberRequest { chat_id, user_id };
        self.send::<GetChatMember<'_>>(&request)
            .await?
            .as_result()
            .map_err(crate::Error::context("get chat member"))
    }
}
