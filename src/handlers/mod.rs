pub mod auth_handler;
pub mod user_handler;

use std::sync::Arc;

use actix_web::web;

use crate::{app_state::AppState, auth::AuthMiddleware};

pub use auth_handler::{check_user, register};
pub use user_handler::{dashboard, health_check, health_check_live};

/// Registers shared state and every HTTP route.
pub fn configure(state: Arc<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.jwt_service.clone()))
            .app_data(web::Data::new(state))
            .service(register)
            .service(check_user)
            .service(health_check)
            .service(health_check_live)
            .service(
                web::scope("/dashboard")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(dashboard)),
            );
    }
}
