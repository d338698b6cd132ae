use actix_web::web;

use super::web::routes::{create_user_handler, get_user_by_email_handler, update_user_handler};
use crate::shared::middleware::RequestLogger;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::post().to(create_user_handler))
            .route(web::get().to(get_user_by_email_handler))
            .route(web::put().to(update_user_handler))
            .wrap(RequestLogger),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::sync::Arc;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::StubUserUseCase;

    #[actix_web::test]
    async fn test_methods_dispatch_to_handlers() {
        let state = TestAppStateBuilder::default()
            .with_user_use_case(Arc::new(StubUserUseCase::default()))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(init_routes),
        )
        .await;

        let body = serde_json::json!({
            "name": "Test User",
            "email": "test@example.com",
            "password": "password123"
        });

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/users").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/users").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            test::TestRequest::put().uri("/users").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unsupported_method_is_rejected() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(init_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::delete().uri("/users").to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[actix_web::test]
    async fn test_unknown_path_is_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(init_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/accounts").to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
