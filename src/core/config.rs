use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub bunny: BunnyConfig,
    pub tesla: TeslaConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

/// Bunny.net storage zone + CDN pull zone configuration
///
/// The storage zone holds the uploaded portfolio files; the pull zone is the
/// CDN-facing base URL the gallery links to.
#[derive(Debug, Clone)]
pub struct BunnyConfig {
    /// Storage API base URL
    pub storage_url: String,
    /// Storage zone name (path segment in the storage API)
    pub storage_zone: Option<String>,
    /// Storage zone access key (sent as the `AccessKey` header)
    pub access_key: Option<String>,
    /// Pull zone base URL for serving files
    pub pull_zone_url: String,
    /// Path inside the zone where portfolio media lives
    pub portfolio_path: String,
}

/// Tesla Fleet API + OAuth configuration
///
/// Everything here is optional: the site must boot and render a degraded
/// vehicle status when credentials are absent or stale.
#[derive(Debug, Clone)]
pub struct TeslaConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub redirect_uri: Option<String>,
    pub auth_base_url: String,
    pub fleet_base_url: String,
    /// Display name of the vehicle to report on; defaults to the first listed
    pub vehicle_name: Option<String>,
    pub partner_domain: String,
    /// Partner public key served on the well-known route
    pub public_key_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            bunny: BunnyConfig::from_env()?,
            tesla: TeslaConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // 50MB, mp4 uploads

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_BYTES must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_bytes,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BunnyConfig {
    pub fn from_env() -> Result<Self, String> {
        let storage_url = env::var("BUNNY_STORAGE_URL")
            .unwrap_or_else(|_| "https://storage.bunnycdn.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let storage_zone = env::var("BUNNY_STORAGE_ZONE").ok().filter(|s| !s.is_empty());
        let access_key = env::var("BUNNY_ACCESS_KEY").ok().filter(|s| !s.is_empty());

        let pull_zone_url = env::var("BUNNY_PULLZONE_URL")
            .unwrap_or_else(|_| "https://your-pullzone.b-cdn.net".to_string())
            .trim_end_matches('/')
            .to_string();

        let portfolio_path = env::var("BUNNY_PORTFOLIO_PATH")
            .unwrap_or_else(|_| "portfolio".to_string())
            .trim_matches('/')
            .to_string();

        Ok(Self {
            storage_url,
            storage_zone,
            access_key,
            pull_zone_url,
            portfolio_path,
        })
    }

    /// Whether the storage API can be used (listing + upload)
    pub fn is_configured(&self) -> bool {
        self.storage_zone.is_some() && self.access_key.is_some()
    }
}

impl TeslaConfig {
    const DEFAULT_FLEET_BASE_URL: &'static str = "https://fleet-api.prd.na.vn.cloud.tesla.com";
    const DEFAULT_PUBLIC_KEY_PATH: &'static str = "static/well-known/com.tesla.3p.public-key.pem";

    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("TESLA_CLIENT_ID").ok().filter(|s| !s.is_empty());
        let client_secret = env::var("TESLA_CLIENT_SECRET").ok().filter(|s| !s.is_empty());
        let refresh_token = env::var("TESLA_REFRESH_TOKEN").ok().filter(|s| !s.is_empty());
        let redirect_uri = env::var("TESLA_REDIRECT_URI").ok().filter(|s| !s.is_empty());

        let auth_base_url = env::var("TESLA_AUTH_BASE_URL")
            .unwrap_or_else(|_| "https://auth.tesla.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let fleet_base_url = env::var("TESLA_FLEET_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_FLEET_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let vehicle_name = env::var("TESLA_VEHICLE_NAME").ok().filter(|s| !s.is_empty());

        let partner_domain =
            env::var("TESLA_PARTNER_DOMAIN").unwrap_or_else(|_| "example.com".to_string());

        let public_key_path = env::var("TESLA_PUBLIC_KEY_PATH")
            .unwrap_or_else(|_| Self::DEFAULT_PUBLIC_KEY_PATH.to_string());

        Ok(Self {
            client_id,
            client_secret,
            refresh_token,
            redirect_uri,
            auth_base_url,
            fleet_base_url,
            vehicle_name,
            partner_domain,
            public_key_path,
        })
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth2/v3/token", self.auth_base_url)
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/oauth2/v3/authorize", self.auth_base_url)
    }
}
