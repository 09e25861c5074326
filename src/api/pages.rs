use actix_web::HttpResponse;

use super::html;
use crate::views;

pub async fn home() -> HttpResponse {
    html(views::home())
}

pub async fn about() -> HttpResponse {
    html(views::about())
}

pub async fn contact() -> HttpResponse {
    html(views::contact())
}

pub async fn error_page() -> HttpResponse {
    html(views::error_page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_static_pages_render() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(home))
                .route("/about", web::get().to(about))
                .route("/contact", web::get().to(contact))
                .route("/error", web::get().to(error_page)),
        )
        .await;

        for path in ["/", "/about", "/contact", "/error"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK, "{} should render", path);
        }
    }
}
