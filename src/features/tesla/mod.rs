pub mod fleet_client;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod routes;
pub mod service;
pub mod token_manager;

pub use fleet_client::TeslaFleetClient;
pub use routes::routes;
pub use service::TeslaService;
pub use token_manager::TeslaTokenManager;
