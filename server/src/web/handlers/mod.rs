// server/src/web/handlers/mod.rs

// Declare handler modules
pub mod callback_handlers;
pub mod order_handlers;
pub mod plan_handlers;
pub mod promo_handlers;
pub mod settings_handlers;

// Routes access handlers via their module path
// (e.g., order_handlers::create_order_handler).
