use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use servidor_game::{
    bot::{Bot, BotConfig},
    event::{
        implement::webhook::ErrorDetail,
        model::{Envelope, Reply},
    },
};
use tower::ServiceExt;

fn post(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/user/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(bot: &Bot, request: Request<Body>) -> (StatusCode, Value) {
    let response = bot.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn bot() -> Bot {
    Bot::new(BotConfig {
        admin_id: Some("1000".to_string()),
        ..BotConfig::default()
    })
}

#[tokio::test]
async fn start_command() {
    let (status, body) = call(
        &bot(),
        post(&json!({"user_id": 1, "message_type": "text", "message_data": "/start"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"action": "reply", "data": {"text": "Welcome to ServidorGame!"}, "user_role": "free"})
    );
}

#[tokio::test]
async fn admin_text() {
    let (status, body) = call(
        &bot(),
        post(&json!({
            "user_id": 1000,
            "message_type": "text",
            "message_data": "hello",
            "timestamp": 1700000000.0,
            "metadata": {"source": "test"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reply: Reply = serde_json::from_value(body).unwrap();
    assert_eq!(reply.text(), Some("Text received"));
    assert_eq!(reply.user_role.map(|r| r.to_string()).as_deref(), Some("admin"));
}

#[tokio::test]
async fn unknown_message_type_is_400() {
    let (status, body) = call(
        &bot(),
        post(&json!({"user_id": 1, "message_type": "sticker", "message_data": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail: ErrorDetail = serde_json::from_value(body).unwrap();
    assert_eq!(detail.detail, "Unknown message type: sticker");
}

#[tokio::test]
async fn malformed_envelope_is_rejected() {
    // missing user_id
    let (status, body) = call(&bot(), post(&json!({"message_type": "text"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("user_id"));

    // text must carry a string
    let (status, body) = call(
        &bot(),
        post(&json!({"user_id": 1, "message_type": "text", "message_data": [1, 2]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("must be a string"));

    let request = Request::builder()
        .method("POST")
        .uri("/user/webhook")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = call(&bot(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri("/user/webhook")
        .body(Body::from(
            json!({"user_id": 2, "message_type": "callback_query", "message_data": "cb:1"})
                .to_string(),
        ))
        .unwrap();
    let (status, body) = call(&bot(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "Callback processed");

    let request = Request::builder()
        .method("POST")
        .uri("/user/webhook")
        .header("content-type", "text/plain")
        .body(Body::from(
            json!({"user_id": 2, "message_type": "text", "message_data": "/start"}).to_string(),
        ))
        .unwrap();
    let (status, body) = call(&bot(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "Welcome to ServidorGame!");
}

#[tokio::test]
async fn secret_token_is_checked() {
    let bot = Bot::new(BotConfig {
        webhook_secret: Some("hunter2".to_string()),
        ..BotConfig::default()
    });
    let body = json!({"user_id": 1, "message_type": "button_click", "message_data": {"id": 3}});

    let (status, _) = call(&bot, post(&body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut request = post(&body);
    request.headers_mut().insert(
        "X-Telegram-Bot-Api-Secret-Token",
        "hunter3".parse().unwrap(),
    );
    let (status, _) = call(&bot, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut request = post(&body);
    request.headers_mut().insert(
        "X-Telegram-Bot-Api-Secret-Token",
        "hunter2".parse().unwrap(),
    );
    let (status, body) = call(&bot, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "Button clicked");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let bot = Bot::new(BotConfig {
        body_size_limit: 64,
        ..BotConfig::default()
    });
    let body = json!({"user_id": 1, "message_type": "text", "message_data": "x".repeat(256)});
    let (status, _) = call(&bot, post(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn registered_handler_is_served() {
    let bot = Bot::builder(BotConfig::default())
        .handler("command", |env: &Envelope| {
            Reply::new(Reply::ACTION_SEND_MESSAGE).with_text(format!("user {}", env.user_id))
        })
        .build();
    let (status, body) = call(
        &bot,
        post(&json!({"user_id": 8, "message_type": "command", "message_data": "/help"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"action": "send_message", "data": {"text": "user 8"}, "user_role": "free"})
    );
}

#[tokio::test]
async fn served_over_tcp_until_stopped() {
    let bot = bot();
    let service = bot
        .start_webhook_service("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let url = format!("http://{}/user/webhook", service.get_bind());
    let reply: Reply = reqwest::Client::new()
        .post(&url)
        .json(&json!({"user_id": 3, "message_type": "menu_selection", "message_data": "settings"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reply.text(), Some("Menu option chosen"));

    bot.stop();
    assert!(bot.is_stopped());
    service.join().await.unwrap();
}
