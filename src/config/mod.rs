use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Anything other than `APP_ENV=production` counts as dev: permissive
    /// CORS and human-readable logs.
    pub is_dev: bool,
}

impl Config {
    /// Every variable has a workable default, so loading cannot fail; a
    /// missing `.env` file is fine too.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
