#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub gemini: Gemini,
    pub formspree: Formspree,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Gemini {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Formspree {
    pub endpoint: String,
}
