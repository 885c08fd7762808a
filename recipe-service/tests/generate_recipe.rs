mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{generate_request, send, test_app, TEST_MODEL};
use recipe_service::services::providers::mock::{MockCompletionClient, SAMPLE_RECIPE};
use recipe_service::services::providers::Completion;
use serde_json::{json, Value};

#[tokio::test]
async fn missing_ingredients_is_rejected_without_calling_upstream() {
    for body in [
        r#"{}"#,
        r#"{"ingredients":null}"#,
        r#"{"ingredients":""}"#,
        r#"{"ingredients":0}"#,
        r#"{"ingredients":false}"#,
    ] {
        let (router, client) = test_app(MockCompletionClient::default());

        let (status, response) = send(router, generate_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(response, json!({ "error": "Ingredients required" }));
        assert_eq!(client.call_count(), 0);
    }
}

#[tokio::test]
async fn request_without_json_content_type_counts_as_empty() {
    let (router, client) = test_app(MockCompletionClient::default());

    let request = Request::builder()
        .method("POST")
        .uri("/generate-recipe")
        .body(Body::empty())
        .unwrap();
    let (status, response) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Ingredients required");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let (router, client) = test_app(MockCompletionClient::default());

    let (status, response) = send(router, generate_request(r#"{"ingredients": "#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!response["error"].as_str().unwrap().is_empty());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn fried_rice_example_is_relayed_exactly() {
    let (router, client) = test_app(MockCompletionClient::with_content(SAMPLE_RECIPE));

    let (status, response) = send(
        router,
        generate_request(r#"{"ingredients":"egg, rice, soy sauce"}"#),
    )
    .await;

    let expected: Value = serde_json::from_str(SAMPLE_RECIPE).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, expected);
    assert_eq!(response["ingredients"], "egg\nrice\nsoy sauce");
    assert_eq!(response["cookingTime"], 15);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn upstream_receives_prompt_and_decoding_parameters() {
    let (router, client) = test_app(MockCompletionClient::default());

    send(router, generate_request(r#"{"ingredients":"tofu, garlic"}"#)).await;

    let request = client.last_request().expect("client was not called");
    assert_eq!(request.model, TEST_MODEL);
    assert_eq!(request.temperature, 0.7);
    assert_eq!(request.max_tokens, 800);
    assert!(request.messages[0]
        .content
        .contains("using ONLY these ingredients: tofu, garlic"));
}

#[tokio::test]
async fn leading_prose_is_a_server_error() {
    let content = format!("Sure! Here is a recipe:\n{}", SAMPLE_RECIPE);
    let (router, _) = test_app(MockCompletionClient::with_content(content));

    let (status, response) = send(router, generate_request(r#"{"ingredients":"egg"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = response["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(response.get("name").is_none());
}

#[tokio::test]
async fn transport_failure_surfaces_message_without_retry() {
    let (router, client) = test_app(MockCompletionClient::failing("connection reset by peer"));

    let (status, response) = send(router, generate_request(r#"{"ingredients":"egg"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("connection reset by peer"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn wrong_shape_is_a_server_error() {
    let (router, _) = test_app(MockCompletionClient::with_content(
        r#"{"name":"Soup","cookingTime":"ten"}"#,
    ));

    let (status, response) = send(router, generate_request(r#"{"ingredients":"water"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("recipe schema"));
}

#[tokio::test]
async fn missing_choices_is_a_server_error() {
    let (router, _) = test_app(MockCompletionClient::with_completion(Completion::default()));

    let (status, response) = send(router, generate_request(r#"{"ingredients":"egg"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response,
        json!({ "error": "Completion response contained no message content" })
    );
}

#[tokio::test]
async fn repeated_requests_each_yield_a_valid_recipe() {
    let (router, client) = test_app(MockCompletionClient::default());

    for _ in 0..3 {
        let (status, response) = send(
            router.clone(),
            generate_request(r#"{"ingredients":"egg, rice"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for field in [
            "name",
            "description",
            "ingredients",
            "instructions",
            "category",
            "tips",
        ] {
            assert!(response[field].is_string(), "field {} not a string", field);
        }
        assert!(response["cookingTime"].is_number());
        assert!(response["servings"].is_number());
    }

    assert_eq!(client.call_count(), 3);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (router, _) = test_app(MockCompletionClient::default());

    let request = Request::builder()
        .method("POST")
        .uri("/generate-recipe")
        .header("origin", "https://savor.example")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"ingredients":"egg"}"#))
        .unwrap();

    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
