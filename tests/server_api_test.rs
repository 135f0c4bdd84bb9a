// ABOUTME: End-to-end tests of the REST client against the reference backend
// ABOUTME: Covers create/list/get/update, ordering, error bodies, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{api_client, payload, spawn_backend};
use serde_json::{json, Value};
use wechef::api::RecipeApi;
use wechef::errors::ErrorCode;

#[tokio::test]
async fn test_health() {
    let backend = spawn_backend().await.unwrap();
    let health = api_client(&backend).health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_create_then_get() {
    let backend = spawn_backend().await.unwrap();
    let client = api_client(&backend);

    let created = client
        .create_recipe(&payload("Pancakes", 4, &[("Flour", 2.0, 1.5), ("Eggs", 3.0, 0.25)]))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Pancakes");
    assert_eq!(created.servings, 4);
    assert_eq!(created.ingredients.len(), 2);
    assert_eq!(created.ingredients[0].name, "Flour");
    assert!(created.ingredients[0].id < created.ingredients[1].id);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = client.get_recipe(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let backend = spawn_backend().await.unwrap();
    let client = api_client(&backend);

    assert!(client.list_recipes().await.unwrap().is_empty());

    let first = client.create_recipe(&payload("Soup", 2, &[("Leek", 1.0, 2.0)])).await.unwrap();
    let second = client.create_recipe(&payload("Salad", 1, &[("Kale", 1.0, 3.0)])).await.unwrap();

    let rows = client.list_recipes().await.unwrap();
    let ids: Vec<_> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    client
        .update_recipe(first.id, &payload("Leek Soup", 2, &[("Leek", 2.0, 2.0)]))
        .await
        .unwrap();
    let rows = client.list_recipes().await.unwrap();
    assert_eq!(rows[0].id, first.id);
    assert_eq!(rows[0].name, "Leek Soup");
}

#[tokio::test]
async fn test_update_replaces_ingredients() {
    let backend = spawn_backend().await.unwrap();
    let client = api_client(&backend);

    let created = client
        .create_recipe(&payload("Stew", 6, &[("Beef", 1.0, 12.0), ("Carrot", 4.0, 0.3)]))
        .await
        .unwrap();
    let updated = client
        .update_recipe(created.id, &payload("Stew", 8, &[("Lamb", 1.5, 14.0)]))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.servings, 8);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].name, "Lamb");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_unknown_recipe_is_not_found() {
    let backend = spawn_backend().await.unwrap();
    let client = api_client(&backend);

    let err = client.get_recipe(999).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(err.message.starts_with("HTTP 404"));

    let err = client
        .update_recipe(999, &payload("Ghost", 1, &[("Air", 1.0, 0.0)]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_bad_payloads_return_json_errors() {
    let backend = spawn_backend().await.unwrap();
    let http = reqwest::Client::new();
    let url = format!("{}/recipes", backend.base_url);

    let response = http
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = http
        .post(&url)
        .json(&json!({"name": "Tea", "ingredients": [{"name": "   "}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Name cannot be empty");

    let response = http.post(&url).body("").send().await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_lenient_backend_defaults() {
    let backend = spawn_backend().await.unwrap();
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/recipes", backend.base_url))
        .json(&json!({"name": "Toast", "ingredients": [{"name": "  Bread  "}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["servings"], 1);
    assert_eq!(body["ingredients"][0]["name"], "Bread");
    assert_eq!(body["ingredients"][0]["quantity"], 0.0);
    assert!(body["ingredients"][0]["category"].is_null());
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let backend = spawn_backend().await.unwrap();
    let response = reqwest::get(format!("{}/recipes/abc", backend.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = reqwest::get(format!("{}/nowhere", backend.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let backend = spawn_backend().await.unwrap();
    let response = reqwest::Client::new()
        .get(format!("{}/health", backend.base_url))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );

    let response = reqwest::Client::new()
        .get(format!("{}/health", backend.base_url))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
