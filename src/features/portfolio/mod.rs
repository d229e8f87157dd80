pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

pub use routes::routes;
pub use service::PortfolioService;
