// server/src/web/routes.rs

use actix_web::web;

// Placeholder for a simple health check handler function.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function is called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Customer-facing order routes
      .service(
        web::scope("/orders")
          .route(
            "",
            web::post().to(crate::web::handlers::order_handlers::create_order_handler),
          )
          .route(
            "/{order_id}/payment-proof",
            web::post().to(crate::web::handlers::order_handlers::submit_proof_handler),
          ),
      )
      // Catalog and checkout support routes
      .service(
        web::scope("/plans").route(
          "",
          web::get().to(crate::web::handlers::plan_handlers::list_plans_handler),
        ),
      )
      .service(
        web::scope("/promo-codes").route(
          "/validate",
          web::post().to(crate::web::handlers::promo_handlers::validate_promo_handler),
        ),
      )
      .service(
        web::scope("/settings").route(
          "/payment",
          web::get().to(crate::web::handlers::settings_handlers::payment_settings_handler),
        ),
      )
      // Payment provider callbacks
      .service(
        web::scope("/webhooks").route(
          "/fastlipa",
          web::post().to(crate::web::handlers::callback_handlers::fastlipa_callback_handler),
        ),
      )
      // Operator routes. Assumes an authenticated operator (e.g. via gateway
      // or middleware); operator identity plays no part in the decisions.
      .service(
        web::scope("/admin")
          .service(
            web::scope("/orders")
              .route(
                "",
                web::get().to(crate::web::handlers::order_handlers::list_orders_handler),
              )
              .route(
                "/{order_id}",
                web::put().to(crate::web::handlers::order_handlers::update_order_handler),
              ),
          )
          .service(
            web::scope("/promo-codes")
              .route(
                "",
                web::get().to(crate::web::handlers::promo_handlers::list_promos_handler),
              )
              .route(
                "",
                web::post().to(crate::web::handlers::promo_handlers::upsert_promo_handler),
              ),
          )
          .service(
            web::scope("/plans").route(
              "",
              web::post().to(crate::web::handlers::plan_handlers::upsert_plan_handler),
            ),
          ),
      ),
  );
}
