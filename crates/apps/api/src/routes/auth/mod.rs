pub mod handlers;
pub mod middlewares;
pub mod router;
