use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use steward_config::LlmProviderConfig;
use steward_domain::api_toolset;
use steward_providers::decision;

#[derive(Clone)]
struct MockState {
	requests: Arc<Mutex<Vec<Value>>>,
	response: Arc<Value>,
}

struct MockChatServer {
	base_url: String,
	requests: Arc<Mutex<Vec<Value>>>,
	shutdown_tx: Option<oneshot::Sender<()>>,
	handle: Option<JoinHandle<()>>,
}
impl MockChatServer {
	async fn start(response: Value) -> Self {
		let requests = Arc::new(Mutex::new(Vec::new()));
		let state =
			MockState { requests: Arc::clone(&requests), response: Arc::new(response) };
		let app = Router::new().route("/v1/chat/completions", post(record_request)).with_state(state);
		let listener =
			TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind mock server.");
		let addr = listener.local_addr().expect("Failed to read mock server address.");
		let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app)
				.with_graceful_shutdown(async {
					let _ = shutdown_rx.await;
				})
				.await;
		});

		Self {
			base_url: format!("http://{addr}"),
			requests,
			shutdown_tx: Some(shutdown_tx),
			handle: Some(handle),
		}
	}

	fn request_count(&self) -> usize {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	fn last_request(&self) -> Value {
		self.requests
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.last()
			.cloned()
			.expect("Mock server received no requests.")
	}

	fn config(&self) -> LlmProviderConfig {
		LlmProviderConfig {
			api_base: self.base_url.clone(),
			api_key: "test-key".to_string(),
			path: "/v1/chat/completions".to_string(),
			model: "gpt-4o".to_string(),
			temperature: 0.0,
			default_headers: Map::new(),
		}
	}

	async fn shutdown(mut self) {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(());
		}
		if let Some(handle) = self.handle.take() {
			let _ = handle.await;
		}
	}
}

async fn record_request(State(state): State<MockState>, Json(payload): Json<Value>) -> Json<Value> {
	let mut requests = state.requests.lock().unwrap_or_else(|err| err.into_inner());

	requests.push(payload);

	Json((*state.response).clone())
}

fn tool_call_response(name: &str, arguments: &str) -> Value {
	serde_json::json!({
		"choices": [
			{
				"message": {
					"tool_calls": [
						{
							"id": "call_0",
							"type": "function",
							"function": { "name": name, "arguments": arguments }
						}
					]
				}
			}
		]
	})
}

#[tokio::test]
async fn sends_toolset_and_returns_the_tool_call() {
	let server =
		MockChatServer::start(tool_call_response("ask_question", r#"{"question_to_user":"?"}"#))
			.await;
	let tools = api_toolset();
	let messages = vec![serde_json::json!({ "role": "user", "content": "register me" })];
	let call = decision::decide(&server.config(), &messages, &tools)
		.await
		.expect("decision call failed");

	assert_eq!(call.name, "ask_question");

	let request = server.last_request();

	assert_eq!(request["model"], "gpt-4o");
	assert_eq!(request["tool_choice"], "required");
	assert_eq!(request["messages"].as_array().expect("messages missing").len(), 1);

	let wire_tools = request["tools"].as_array().expect("tools missing");

	assert_eq!(wire_tools.len(), tools.len());
	assert_eq!(wire_tools[0]["function"]["name"], "ask_question");

	server.shutdown().await;
}

#[tokio::test]
async fn malformed_response_fails_after_a_single_attempt() {
	let server = MockChatServer::start(serde_json::json!({
		"choices": [
			{ "message": { "content": "no tools here" } }
		]
	}))
	.await;
	let result =
		decision::decide(&server.config(), &[], &api_toolset()).await;

	assert!(result.is_err());
	assert_eq!(server.request_count(), 1, "a malformed response must not be retried");

	server.shutdown().await;
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
	// Mock replies 200 with a non-JSON-shape, so point at a path that 404s instead.
	let server = MockChatServer::start(Value::Null).await;
	let mut cfg = server.config();

	cfg.path = "/missing".to_string();

	let result = decision::decide(&cfg, &[], &api_toolset()).await;

	assert!(result.is_err());
	assert_eq!(server.request_count(), 0);

	server.shutdown().await;
}
