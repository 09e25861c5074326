pub mod auth;
pub mod health;
pub mod pages;
pub mod secrets;

use actix_web::HttpResponse;

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Generic error page for store failures; the cause is logged at the call
/// site, never shown to the browser.
pub(crate) fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/html; charset=utf-8")
        .body(crate::views::error_page())
}
