//! API integration tests
//!
//! These run against a live server started with a clean database:
//! `cargo run`, then `cargo test -- --ignored`.

use reqwest::{multipart, Client};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique email per test run to avoid collisions with existing accounts
fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}+{}@example.org", prefix, nanos)
}

/// Helper to register a fresh account and get its bearer token
async fn register_and_login(client: &Client) -> (String, String) {
    let email = unique_email("reader");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "correct horse battery"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "correct horse battery"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    (email, token)
}

/// Multipart form with a title and a small PDF payload
fn book_form(title: &str, filename: &str) -> multipart::Form {
    let part = multipart::Part::bytes(b"%PDF-1.4 test".to_vec()).file_name(filename.to_string());
    multipart::Form::new().text("title", title.to_string()).part("pdf", part)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_then_login() {
    let client = Client::new();
    let (email, token) = register_and_login(&client).await;
    assert!(!token.is_empty());

    // Session is bound to the registered email
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email.as_str());
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = Client::new();
    let email = unique_email("dupe");

    for attempt in 0..2 {
        let response = client
            .post(format!("{}/auth/register", BASE_URL))
            .json(&json!({
                "email": email,
                "password": "correct horse battery"
            }))
            .send()
            .await
            .expect("Failed to send request");

        if attempt == 0 {
            assert_eq!(response.status(), 201);
        } else {
            assert_eq!(response.status(), 409);
        }
    }

    // The original account still works with its original password
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "correct horse battery"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let client = Client::new();
    let (email, _token) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.get("token").is_none());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_book() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Dune", "dune.pdf"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");
    assert_eq!(body["title"], "Dune");
    assert!(!body["pdf_file"].as_str().unwrap().is_empty());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Dune");

    // The stored file is retrievable
    let response = client
        .get(format!("{}/books/{}/file", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_non_pdf() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let before: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Not A Book", "malware.exe"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // No record was persisted
    let after: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(before["total"], after["total"]);
}

#[tokio::test]
#[ignore]
async fn test_update_title_preserves_pdf() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let body: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Old Title", "old.pdf"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");
    let pdf_file = body["pdf_file"].as_str().unwrap().to_string();

    let form = multipart::Form::new().text("title", "New Title");
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "New Title");
    assert_eq!(body["pdf_file"], pdf_file.as_str());
}

#[tokio::test]
#[ignore]
async fn test_update_replaces_pdf_and_removes_old_file() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let body: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Dune", "first.pdf"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");
    let old_pdf = body["pdf_file"].as_str().unwrap().to_string();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Dune", "second.pdf"))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let new_pdf = body["pdf_file"].as_str().unwrap().to_string();
    assert_ne!(old_pdf, new_pdf);

    // The new file is retrievable
    let response = client
        .get(format!("{}/books/{}/file", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_delete_book_removes_record_and_file() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let body: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(book_form("Ephemeral", "gone.pdf"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Record is gone
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Stored file is no longer retrievable either
    let response = client
        .get(format!("{}/books/{}/file", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_logout_is_idempotent() {
    let client = Client::new();

    for _ in 0..2 {
        let response = client
            .post(format!("{}/auth/logout", BASE_URL))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 204);
    }
}
