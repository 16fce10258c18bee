// demos/shop_app/src/web/routes.rs

use actix_web::web;

// Simple health check; the dashboard's frontend polls this on load.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function is called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Shop listing (proxied from the backend)
      .service(web::scope("/products").route(
        "",
        web::get().to(crate::web::handlers::product_handlers::list_products_handler),
      ))
      // Cart Routes
      .service(
        web::scope("/cart")
          .route("", web::get().to(crate::web::handlers::cart_handlers::view_cart_handler))
          .route(
            "/add",
            web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
          )
          .route(
            "/quantity",
            web::post().to(crate::web::handlers::cart_handlers::set_quantity_handler),
          )
          .route(
            "/remove",
            web::post().to(crate::web::handlers::cart_handlers::remove_from_cart_handler),
          )
          .route(
            "/sync",
            web::post().to(crate::web::handlers::cart_handlers::sync_stock_handler),
          ),
      )
      // Checkout Route
      .service(web::scope("/checkout").route(
        "",
        web::post().to(crate::web::handlers::checkout_handlers::submit_checkout_handler),
      ))
      // Purchase History Route
      .service(web::scope("/history").route(
        "",
        web::get().to(crate::web::handlers::history_handlers::purchase_history_handler),
      )),
  );
}
