use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::post,
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use foodwaste_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LlmArgs, LogArgs, ServerArgs},
};
use serde_json::{Value, json};
use test_context::{AsyncTestContext, test_context};
use tokio::{net::TcpListener, task::JoinHandle};

const API_KEY: &str = "sk-test";

#[derive(Clone)]
struct UpstreamState {
    reply: Arc<Mutex<(StatusCode, String)>>,
    delay: Arc<Mutex<Duration>>,
    requests: Arc<Mutex<Vec<Value>>>,
    authorizations: Arc<Mutex<Vec<String>>>,
}

async fn chat_completions(
    State(upstream): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    upstream.requests.lock().unwrap().push(body);
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        upstream
            .authorizations
            .lock()
            .unwrap()
            .push(value.to_string());
    }

    let delay = *upstream.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = upstream.reply.lock().unwrap().clone();
    (status, [(CONTENT_TYPE, "application/json")], body)
}

/// OpenAI-compatible upstream on an ephemeral port with a scripted reply.
struct FakeProvider {
    addr: SocketAddr,
    upstream: UpstreamState,
    server: JoinHandle<()>,
}

impl AsyncTestContext for FakeProvider {
    async fn setup() -> Self {
        let upstream = UpstreamState {
            reply: Arc::new(Mutex::new((StatusCode::OK, completion("")))),
            delay: Arc::new(Mutex::new(Duration::ZERO)),
            requests: Arc::new(Mutex::new(Vec::new())),
            authorizations: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(upstream.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            upstream,
            server,
        }
    }

    async fn teardown(self) {
        self.server.abort();
    }
}

fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
    .to_string()
}

impl FakeProvider {
    fn reply(&self, status: StatusCode, body: impl Into<String>) {
        *self.upstream.reply.lock().unwrap() = (status, body.into());
    }

    fn reply_with_content(&self, content: &str) {
        self.reply(StatusCode::OK, completion(content));
    }

    fn delay_replies(&self, delay: Duration) {
        *self.upstream.delay.lock().unwrap() = delay;
    }

    fn requests(&self) -> Vec<Value> {
        self.upstream.requests.lock().unwrap().clone()
    }

    fn app(&self, api_key: Option<&str>) -> TestServer {
        self.app_with_timeout(api_key, 5)
    }

    fn app_with_timeout(&self, api_key: Option<&str>, timeout_secs: u64) -> TestServer {
        let args = Args {
            server: ServerArgs {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
                root_path: String::new(),
                allowed_origins: Vec::new(),
            },
            llm: LlmArgs {
                openai_api_key: api_key.map(str::to_string),
                model: "gpt-4o-mini".to_string(),
                base_url: format!("http://{}/v1", self.addr),
                timeout_secs,
            },
            log: LogArgs {
                filter: "info".to_string(),
                json: false,
            },
        };

        let app_state = state(Arc::new(args)).expect("app state");
        TestServer::new(router(app_state).expect("router")).expect("test server")
    }
}

fn image_form(field: &str, bytes: &[u8], mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        field,
        Part::bytes(bytes.to_vec())
            .file_name("fridge.png")
            .mime_type(mime_type),
    )
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_returns_detected_items(provider: &mut FakeProvider) {
    provider.reply_with_content(r#"{"items":[{"name":"egg","confidence":0.9}]}"#);
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"\x89PNG fake", "image/png"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "items": [{ "name": "egg", "confidence": 0.9 }] })
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request["model"], "gpt-4o-mini");
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["response_format"]["type"], "json_schema");
    assert_eq!(
        request["response_format"]["json_schema"]["name"],
        "detected_items"
    );
    let image_url = request["messages"][1]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(image_url.starts_with("data:image/png;base64,"));

    let authorizations = provider.upstream.authorizations.lock().unwrap().clone();
    assert_eq!(authorizations, vec![format!("Bearer {API_KEY}")]);
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_falls_back_to_first_attached_file(provider: &mut FakeProvider) {
    provider.reply_with_content(r#"{"items":[]}"#);
    let server = provider.app(Some(API_KEY));

    let form = MultipartForm::new()
        .add_text("note", "leftovers")
        .add_part(
            "photo",
            Part::bytes(b"jpeg bytes".to_vec()).file_name("photo.jpg"),
        );

    let response = server.post("/api/analyze-image").multipart(form).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "items": [] }));
    assert_eq!(provider.requests().len(), 1);
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_treats_empty_completion_as_no_items(provider: &mut FakeProvider) {
    provider.reply_with_content("");
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"img", "image/jpeg"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "items": [] }));
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_rejects_empty_file(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"", "image/png"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "No image uploaded");
    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_rejects_non_multipart_body(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    let response = server.post("/api/analyze-image").text("not a form").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_without_api_key_is_a_server_error(provider: &mut FakeProvider) {
    let server = provider.app(None);

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"img", "image/png"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "E_INTERNAL_SERVER_ERROR");
    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_maps_upstream_error_to_bad_gateway(provider: &mut FakeProvider) {
    provider.reply(
        StatusCode::UNAUTHORIZED,
        r#"{"error":{"message":"Incorrect API key provided: sk-test"}}"#,
    );
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"img", "image/png"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["status"], 502);
    assert!(!body["message"].as_str().unwrap().contains("Incorrect API key"));
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_maps_upstream_timeout_to_bad_gateway(provider: &mut FakeProvider) {
    provider.reply_with_content(r#"{"items":[]}"#);
    provider.delay_replies(Duration::from_secs(3));
    let server = provider.app_with_timeout(Some(API_KEY), 1);

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"img", "image/png"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "E_BAD_GATEWAY");
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_ignores_text_field_named_image(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    let form = MultipartForm::new().add_text("image", "not a file");
    let response = server.post("/api/analyze-image").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "No image uploaded");
    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_uses_attached_file_over_text_field_named_image(
    provider: &mut FakeProvider,
) {
    provider.reply_with_content(r#"{"items":[]}"#);
    let server = provider.app(Some(API_KEY));

    let form = MultipartForm::new()
        .add_text("image", "not a file")
        .add_part(
            "photo",
            Part::bytes(b"png bytes".to_vec())
                .file_name("photo.png")
                .mime_type("image/png"),
        );
    let response = server.post("/api/analyze-image").multipart(form).await;

    response.assert_status_ok();
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let image_url = requests[0]["messages"][1]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(image_url.starts_with("data:image/png;base64,"));
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn analyze_image_rejects_non_json_completion(provider: &mut FakeProvider) {
    provider.reply_with_content("I can see an egg and some milk.");
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/analyze-image")
        .multipart(image_form("image", b"img", "image/png"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

const RECIPE_WITHOUT_SERVINGS: &str = r#"{
    "title": "Spinach scramble",
    "ingredients": ["3 eggs", "80 g spinach", "1 tsp oil"],
    "steps": ["Heat the oil", "Wilt the spinach", "Scramble in the eggs"],
    "nutrition_per_serving": {"calories": 210, "protein_g": 15, "carbs_g": 3, "fat_g": 15}
}"#;

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_defaults_to_two_servings(provider: &mut FakeProvider) {
    provider.reply_with_content(RECIPE_WITHOUT_SERVINGS);
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg", "spinach"] }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "title": "Spinach scramble",
            "ingredients": ["3 eggs", "80 g spinach", "1 tsp oil"],
            "steps": ["Heat the oil", "Wilt the spinach", "Scramble in the eggs"],
            "servings": 2,
            "nutrition_per_serving": {
                "calories": 210.0,
                "protein_g": 15.0,
                "carbs_g": 3.0,
                "fat_g": 15.0
            }
        })
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["response_format"], json!({ "type": "json_object" }));
    let user_message = requests[0]["messages"][1]["content"].as_str().unwrap();
    assert!(user_message.contains("egg, spinach"));
    assert!(user_message.contains("servings=2"));
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_keeps_upstream_servings(provider: &mut FakeProvider) {
    provider.reply_with_content(
        r#"{"title":"Frittata","ingredients":["6 eggs"],"steps":["Bake"],"servings":4,
            "nutrition_per_serving":{"calories":150,"protein_g":11,"carbs_g":2,"fat_g":10}}"#,
    );
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg"], "servings": 2 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["servings"], 4);
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_rejects_missing_or_empty_items(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    for body in [json!({ "items": [] }), json!({ "servings": 2 })] {
        let response = server.post("/api/generate-recipe").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_rejects_non_positive_servings(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    for servings in [0, -3] {
        let response = server
            .post("/api/generate-recipe")
            .json(&json!({ "items": ["egg"], "servings": servings }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_maps_upstream_error_to_bad_gateway(provider: &mut FakeProvider) {
    provider.reply(StatusCode::UNAUTHORIZED, r#"{"error":{"message":"bad key"}}"#);
    let server = provider.app(Some(API_KEY));

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg"] }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_rejects_empty_or_invalid_completion(provider: &mut FakeProvider) {
    let server = provider.app(Some(API_KEY));

    for content in ["", "{ not json", r#"{"title":"Half a recipe"}"#] {
        provider.reply_with_content(content);

        let response = server
            .post("/api/generate-recipe")
            .json(&json!({ "items": ["egg"] }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_without_api_key_is_a_server_error(provider: &mut FakeProvider) {
    let server = provider.app(None);

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(provider.requests().is_empty());
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn generate_recipe_validates_body_before_credentials(provider: &mut FakeProvider) {
    let server = provider.app(None);

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg"], "servings": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/generate-recipe")
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/generate-recipe")
        .json(&json!({ "items": ["egg"] }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_context(FakeProvider)]
#[tokio::test]
async fn openapi_document_lists_both_endpoints(provider: &mut FakeProvider) {
    let server = provider.app(None);

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let document = response.json::<Value>();
    assert!(document["paths"]["/api/analyze-image"]["post"].is_object());
    assert!(document["paths"]["/api/generate-recipe"]["post"].is_object());
}
