use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `HOST` and `PORT`, falling back to the defaults when unset or unparsable.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(PORT);

        Self { host, port }
    }
}
