//! HTTP handlers and route configuration.

mod health;
mod posts;
mod users;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Posts
        .route("/", web::get().to(posts::index))
        .route("/group/{slug}/", web::get().to(posts::group_list))
        .route("/profile/{username}/", web::get().to(posts::profile))
        .route("/posts/{post_id}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::post_create_form))
                .route(web::post().to(posts::post_create)),
        )
        .service(
            web::resource("/posts/{post_id}/edit/")
                .route(web::get().to(posts::post_edit_form))
                .route(web::post().to(posts::post_edit)),
        )
        // Accounts
        .service(
            web::scope("/auth")
                .service(
                    web::resource("/signup/")
                        .route(web::get().to(users::signup_form))
                        .route(web::post().to(users::signup)),
                )
                .service(
                    web::resource("/login/")
                        .route(web::get().to(users::login_form))
                        .route(web::post().to(users::login)),
                )
                .service(
                    web::resource("/logout/")
                        .route(web::get().to(users::logout))
                        .route(web::post().to(users::logout)),
                )
                .service(
                    web::resource("/password_change/")
                        .route(web::get().to(users::password_change_form))
                        .route(web::post().to(users::password_change)),
                )
                .route(
                    "/password_change/done/",
                    web::get().to(users::password_change_done),
                )
                .service(
                    web::resource("/password_reset/")
                        .route(web::get().to(users::password_reset_form))
                        .route(web::post().to(users::password_reset)),
                )
                .route(
                    "/password_reset/done/",
                    web::get().to(users::password_reset_done),
                )
                .route("/reset/done/", web::get().to(users::password_reset_complete))
                .service(
                    web::resource("/reset/{uid}/{token}/")
                        .route(web::get().to(users::password_reset_confirm_form))
                        .route(web::post().to(users::password_reset_confirm)),
                ),
        )
        .default_service(web::to(not_found));
}

/// Fallback for paths no route matches.
async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No page at {}", req.path())))
}
