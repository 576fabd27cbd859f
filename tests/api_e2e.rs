//! End-to-end tests against a real PostgreSQL.
//!
//! Ignored by default. Run with
//! `TEST_DATABASE_URL=postgres://... cargo test --test api_e2e -- --ignored`.

mod common;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::Value;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_user_registration_and_login() {
    let context = common::spawn_app().await;
    let email = common::unique_email("reader");

    let reg_response = context.register(&context.client, &email, "SecurePass123!").await;
    assert_eq!(reg_response.status().as_u16(), 200, "Registration failed");
    let reg_body: Value = reg_response.json().await.unwrap();
    assert_eq!(reg_body["email"], email.as_str());
    assert!(reg_body["id"].as_i64().unwrap() > 0);
    assert!(reg_body.get("password").is_none());

    let login_response = context.login(&context.client, &email, "SecurePass123!").await;
    assert_eq!(login_response.status().as_u16(), 200, "Login failed");
    let login_body: Value = login_response.json().await.unwrap();
    assert_eq!(
        login_body["message"],
        format!("User id is {}", reg_body["id"]).as_str()
    );

    let me_response = context
        .client
        .get(context.url("/api/users/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(me_response.status().as_u16(), 200);
    let me: Value = me_response.json().await.unwrap();
    assert_eq!(me["id"], reg_body["id"]);
    assert_eq!(me["email"], email.as_str());
    assert!(me.get("password").is_none());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_bad_credentials_are_indistinguishable() {
    let context = common::spawn_app().await;
    let email = common::unique_email("guarded");
    context.register(&context.client, &email, "SecurePass123!").await;

    let wrong_password = context.login(&context.client, &email, "WrongPass123!").await;
    let unknown_email = context
        .login(&context.client, &common::unique_email("ghost"), "SecurePass123!")
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);
    assert_eq!(
        wrong_password.text().await.unwrap(),
        unknown_email.text().await.unwrap()
    );

    let me = context
        .client
        .get(context.url("/api/users/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(me.status().as_u16(), 403);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_duplicate_email_conflicts() {
    let context = common::spawn_app().await;
    let email = common::unique_email("twice");

    let first = context.register(&context.client, &email, "SecurePass123!").await;
    assert_eq!(first.status().as_u16(), 200);
    let second = context.register(&context.client, &email, "OtherPass123!").await;
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_registration_is_validated() {
    let context = common::spawn_app().await;

    let bad_email = context.register(&context.client, "not-an-email", "SecurePass123!").await;
    assert_eq!(bad_email.status().as_u16(), 400);

    let short_password = context
        .register(&context.client, &common::unique_email("short"), "abc")
        .await;
    assert_eq!(short_password.status().as_u16(), 400);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_sentences_are_listed_in_order_and_scoped() {
    let context = common::spawn_app().await;
    context.signed_in_user(&context.client, "alice").await;

    let mut ids = Vec::new();
    for n in 1..=3 {
        let response = context
            .add_sentence(
                &context.client,
                &format!("Sentence number {}", n),
                "https://example.com/articles?id=7",
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        ids.push(body["id"].as_i64().unwrap());
    }

    let bob = context.new_client();
    context.signed_in_user(&bob, "bob").await;
    let response = context
        .add_sentence(&bob, "Bob's only sentence", "http://bob.example.org")
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let list: Vec<Value> = context
        .client
        .get(context.url("/api/sentences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed: Vec<i64> = list.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(listed, ids);
    assert_eq!(list[0]["text"], "Sentence number 1");
    assert_eq!(list[2]["text"], "Sentence number 3");

    let bob_list: Vec<Value> = bob
        .get(context.url("/api/sentences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bob_list.len(), 1);
    assert_eq!(bob_list[0]["text"], "Bob's only sentence");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_invalid_sentences_are_rejected() {
    let context = common::spawn_app().await;
    context.signed_in_user(&context.client, "sloppy").await;

    let empty_text = context
        .add_sentence(&context.client, "", "http://example.com")
        .await;
    assert_eq!(empty_text.status().as_u16(), 400);
    let body: Value = empty_text.json().await.unwrap();
    assert_eq!(body["error"], "Text is invalid");

    let bad_url = context
        .add_sentence(&context.client, "Valid text", "example.com")
        .await;
    assert_eq!(bad_url.status().as_u16(), 400);
    let body: Value = bad_url.json().await.unwrap();
    assert_eq!(body["error"], "Url is invalid");

    let list: Vec<Value> = context
        .client
        .get(context.url("/api/sentences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_delete_requires_ownership() {
    let context = common::spawn_app().await;
    context.signed_in_user(&context.client, "owner").await;

    let mut ids = Vec::new();
    for text in ["first", "second", "third"] {
        let body: Value = context
            .add_sentence(&context.client, text, "https://example.com")
            .await
            .json()
            .await
            .unwrap();
        ids.push(body["id"].as_i64().unwrap());
    }

    let deleted = context
        .client
        .delete(context.url(&format!("/api/sentences/{}", ids[1])))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 200);

    let intruder = context.new_client();
    context.signed_in_user(&intruder, "intruder").await;
    let denied = intruder
        .delete(context.url(&format!("/api/sentences/{}", ids[0])))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status().as_u16(), 404);

    let again = context
        .client
        .delete(context.url(&format!("/api/sentences/{}", ids[1])))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);

    let list: Vec<Value> = context
        .client
        .get(context.url("/api/sentences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed: Vec<i64> = list.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(listed, vec![ids[0], ids[2]]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_logout_invalidates_the_session_cookie() {
    let context = common::spawn_app().await;
    let client = context.new_client();
    let email = common::unique_email("leaver");
    context.register(&client, &email, "SecurePass123!").await;

    let login = context.login(&client, &email, "SecurePass123!").await;
    assert_eq!(login.status().as_u16(), 200);
    let session_cookie = login
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_id="))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let logout = client
        .post(context.url("/api/users/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status().as_u16(), 202);

    // Replay the old cookie from a client that never saw the logout.
    let replay = reqwest::Client::new()
        .get(context.url("/api/sentences"))
        .header(COOKIE, session_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status().as_u16(), 403);

    let after = client
        .post(context.url("/api/users/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(after.status().as_u16(), 403);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_landing_page_is_served() {
    let context = common::spawn_app().await;
    let response = context.client.get(context.url("/")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("/components/jquery/jquery.js"));
}
