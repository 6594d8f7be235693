use anyhow::Result;

use super::config_model::{DotEnvyConfig, Formspree, Gemini, Server};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let gemini = Gemini {
        api_key: std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY is invalid"),
        base_url: std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
    };

    let formspree = Formspree {
        endpoint: std::env::var("FORMSPREE_ENDPOINT").expect("FORMSPREE_ENDPOINT is invalid"),
    };

    Ok(DotEnvyConfig {
        server,
        gemini,
        formspree,
    })
}
