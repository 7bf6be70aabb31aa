use serde::Serialize;

use crate::model::ChatMember;

use super::Api;

pub struct GetChatMember<'a> {
    marker: std::marker::PhantomData<&'a ()>,
}

#[derive(Debug, Serialize, Clone)]
pub struct GetChatMemberRequest<'a> {
    /// Channel username (`@name`) or numeric id
    pub chat_id: &'a str,
    pub user_id: i64,
}

impl<'a> Api for GetChatMember<'a> {
    type Request = GetChatMemberRequest<'a>;

    type Response = ChatMember;

    const METHOD: http::Method = http::Method::POST;

    const PATH: &'static str = "/getChatMember";
}
