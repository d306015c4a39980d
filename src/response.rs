use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// One `(code, msg)` entry of the response catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpCode {
    pub code: i32,
    pub msg: &'static str,
}

impl HttpCode {
    const fn new(code: i32, msg: &'static str) -> Self {
        Self { code, msg }
    }

    /// Transport status for an envelope carrying this entry. Business errors
    /// travel as 200 and are told apart by `code`.
    pub fn status(&self) -> StatusCode {
        match self.code {
            404 => StatusCode::NOT_FOUND,
            500 => StatusCode::INTERNAL_SERVER_ERROR,
            504 => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::OK,
        }
    }
}

/// Fixed response catalog.
pub struct HttpResp;

impl HttpResp {
    pub const SUCCESS: HttpCode = HttpCode::new(200, "成功");
    pub const FAILED: HttpCode = HttpCode::new(300, "失败");
    pub const PARAMS_VALID_ERROR: HttpCode = HttpCode::new(310, "参数校验错误");
    pub const PARAMS_TYPE_ERROR: HttpCode = HttpCode::new(311, "参数类型错误");
    pub const REQUEST_METHOD_ERROR: HttpCode = HttpCode::new(312, "请求方法错误");
    pub const ASSERT_ARGUMENT_ERROR: HttpCode = HttpCode::new(313, "断言参数错误");

    pub const LOGIN_ACCOUNT_ERROR: HttpCode = HttpCode::new(330, "登录账号或密码错误");
    pub const LOGIN_DISABLE_ERROR: HttpCode = HttpCode::new(331, "登录账号已被禁用了");
    pub const TOKEN_EMPTY: HttpCode = HttpCode::new(332, "token参数为空");
    pub const TOKEN_INVALID: HttpCode = HttpCode::new(333, "token参数无效");

    pub const NO_PERMISSION: HttpCode = HttpCode::new(403, "无相关权限");
    pub const REQUEST_404_ERROR: HttpCode = HttpCode::new(404, "请求接口不存在");

    pub const SYSTEM_ERROR: HttpCode = HttpCode::new(500, "系统错误");
    pub const SYSTEM_TIMEOUT_ERROR: HttpCode = HttpCode::new(504, "请求超时");
}

/// `{code, msg, data}` body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub code: i32,
    pub msg: String,
    pub data: Value,
    #[serde(skip)]
    status: StatusCode,
}

impl Envelope {
    pub fn new(entry: HttpCode, data: Value) -> Self {
        Self {
            code: entry.code,
            msg: entry.msg.to_string(),
            data,
            status: entry.status(),
        }
    }

    /// Error envelope with an overridden message and `data: []`.
    pub fn failure(entry: HttpCode, msg: impl Into<String>) -> Self {
        Self {
            code: entry.code,
            msg: msg.into(),
            data: Value::Array(Vec::new()),
            status: entry.status(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode response envelope: {}", e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
            body,
        )
            .into_response()
    }
}
