pub mod handlers;
pub mod routes;
pub mod titles;

pub use routes::routes;
pub use titles::site_title;

/// Shared state for the static page handlers
pub struct PagesState {
    /// Filesystem path of the Fleet API partner public key
    pub tesla_public_key_path: String,
}
