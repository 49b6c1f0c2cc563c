use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::LoginResponse,
    },
    services::LoginOutcome,
};

/// Accepts the same fields as JSON or as an urlencoded form.
pub type JsonOrForm<T> = web::Either<web::Json<T>, web::Form<T>>;

#[post("/register")]
pub async fn register(
    state: web::Data<Arc<AppState>>,
    request: JsonOrForm<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Login. Credential failures answer 200 with `exists: false`.
#[post("/check-user")]
pub async fn check_user(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    request: JsonOrForm<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .user_service
        .verify_credentials(request.into_inner())
        .await
        .inspect_err(|e| {
            let request_id = get_request_id(&req).unwrap_or_default();
            log::error!("[{}] Login lookup failed: {}", request_id, e)
        })?;

    let response = match outcome {
        LoginOutcome::Accepted(user) => {
            let token = state.jwt_service.create_token(&user)?;
            log::info!("{} {} logged in", user.role, user.userid);
            LoginResponse::success(&user, token)
        }
        LoginOutcome::Rejected(message) => LoginResponse::rejected(message),
    };

    Ok(HttpResponse::Ok().json(response))
}
