mod common;

use std::sync::Arc;

use actix_web::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::StatusCode,
    test, App,
};
use serde_json::{json, Value};

use classroom_quiz_server::{app_state::AppState, handlers, relay::RelayHandle};

use common::{test_config, InMemoryUserRepository};

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::with_repository(
        test_config(),
        Arc::new(InMemoryUserRepository::new()),
        RelayHandle::spawn(),
    ))
}

#[actix_web::test]
async fn test_register_login_dashboard_flow() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "userid": "t1", "password": "pw", "role": "teacher" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully!");

    let req = test::TestRequest::post()
        .uri("/check-user")
        .set_json(json!({ "userid": "t1", "pswd": "pw", "role": "teacher" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["exists"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["userid"], "t1");
    assert_eq!(body["role"], "teacher");
    let token = body["token"].as_str().expect("token missing").to_string();

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "message": "Token valid", "user": { "userid": "t1", "role": "teacher" } })
    );
}

#[actix_web::test]
async fn test_register_duplicate_userid() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;
    let payload = json!({ "userid": "stu1", "password": "pw", "role": "student" });

    let req = test::TestRequest::post().uri("/register").set_json(&payload).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post().uri("/register").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "USER ID already exists!");
}

#[actix_web::test]
async fn test_register_unknown_role() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "userid": "x", "password": "pw", "role": "principal" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_check_user_rejections_are_ok_responses() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "userid": "stu1", "password": "pw", "role": "student" }))
        .to_request();
    test::call_service(&app, req).await;

    let cases = [
        (json!({ "userid": "stu1", "role": "student" }), "Missing userid, password, or role"),
        (json!({ "userid": "ghost", "pswd": "pw", "role": "student" }), "User does not exist"),
        (json!({ "userid": "stu1", "pswd": "pw", "role": "admin" }), "User is not admin"),
        (json!({ "userid": "stu1", "pswd": "nope", "role": "student" }), "Incorrect password"),
    ];

    for (payload, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/check-user")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["exists"], false, "payload {}", payload);
        assert_eq!(body["message"], expected);
        assert!(body.get("token").is_none());
    }
}

#[actix_web::test]
async fn test_form_encoded_register_and_login() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(vec![("userid", "form1"), ("password", "pw"), ("role", "student")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/check-user")
        .set_form(vec![("userid", "form1"), ("pswd", "pw"), ("role", "student")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["exists"], true);
    assert!(body["token"].is_string());

    // A form without the password still gets the JSON rejection body
    let req = test::TestRequest::post()
        .uri("/check-user")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("userid=form1&role=student")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["exists"], false);
    assert_eq!(body["message"], "Missing userid, password, or role");
}

#[actix_web::test]
async fn test_dashboard_rejects_bad_tokens() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access Denied. No token provided.");

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header((AUTHORIZATION, "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_web::test]
async fn test_health_endpoints() {
    let app = test::init_service(App::new().configure(handlers::configure(test_state()))).await;

    let req = test::TestRequest::get().uri("/health/live").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "alive");

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["relay_sessions"], 0);
}
