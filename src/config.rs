use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Directory uploaded files are written to and served back from.
    pub upload_dir: String,

    /// Insert the demo dataset on startup when the employees table is empty.
    pub seed_demo: bool,

    /// Route prefix for the JSON API. The OpenAPI paths are written
    /// against the default "/api"; swagger-ui "try it" calls will miss
    /// the routes under a different prefix.
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".to_string()),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
