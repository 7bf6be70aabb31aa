pub mod chat;
use std::fmt::Display;

use http::Method;
use serde::{Deserialize, Serialize};

pub trait Api {
    type Request: Serialize;
    type Response: for<'a> Deserialize<'a>;
    const METHOD: Method;
    const PATH: &'static str = "";
    fn path(_request: &Self::Request) -> impl std::fmt::Display {
        Self::PATH
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseFail {
    pub error_code: u32,
    pub description: String,
    pub parameters: Option<serde_json::Value>,
}

impl Display for ResponseFail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request failed: [{:4}]{}", self.error_code, self.description)?;
        if let Some(parameters) = &self.parameters {
            write!(f, "\n{}", parameters)
        } else {
            Ok(())
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseOk<T> {
    pub ok: bool,
    pub result: T,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Response<T> {
    Ok(ResponseOk<T>),
    Fail(ResponseFail),
    CannotParse(serde_json::Value),
}

impl<T> Response<T> {
    #[inline]
    pub fn as_result(self) -> Result<T, ResponseFail> {
        match self {
            Response::Ok(ResponseOk { ok: true, result }) => Ok(result),
            Response::Ok(ResponseOk { ok: false, .. }) => Err(ResponseFail {
                error_code: u32::MAX,
                description: "result present but ok is false".to_string(),
                parameters: None,
            }),
            Response::Fail(f) => Err(f),
            Response::CannotParse(v) => Err(ResponseFail {
                error_code: u32::MAX,
                description: format!("cannot parse\n{}", v),
                parameters: None,
            }),
        }
    }
}
