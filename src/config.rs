pub const DEFAULT_INNERTUBE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Upstream request deadline, in seconds. The original never bounded the
/// upstream call; here a timeout is enforced and surfaced as 504.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct InnertubeClientConfig {
    pub client_name: String,
    pub client_version: String,
    pub hl: String,
    pub gl: String,
}

impl Default for InnertubeClientConfig {
    fn default() -> Self {
        Self {
            client_name: "WEB".to_string(),
            client_version: "2.20240814.00.00".to_string(),
            hl: "en".to_string(),
            gl: "US".to_string(),
        }
    }
}

impl InnertubeClientConfig {
    /// The `context.client` object sent with every youtubei/v1 request
    /// (camelCase keys).
    pub fn to_context_value(&self) -> serde_json::Value {
        serde_json::json!({
            "clientName": self.client_name,
            "clientVersion": self.client_version,
            "hl": self.hl,
            "gl": self.gl,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub user_agent: String,
    pub innertube: InnertubeClientConfig,
}

impl Config {
    /// There is no config file: the service takes its port from the
    /// environment and everything else has fixed defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let user_agent = std::env::var("INNERTUBE_USER_AGENT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_INNERTUBE_USER_AGENT.to_string());

        let mut innertube = InnertubeClientConfig::default();
        if let Ok(name) = std::env::var("INNERTUBE_CLIENT_NAME") {
            if !name.trim().is_empty() {
                innertube.client_name = name.trim().to_string();
            }
        }
        if let Ok(version) = std::env::var("INNERTUBE_CLIENT_VERSION") {
            if !version.trim().is_empty() {
                innertube.client_version = version.trim().to_string();
            }
        }

        Self {
            port,
            user_agent,
            innertube,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_value_uses_camel_case_keys() {
        let ctx = InnertubeClientConfig::default().to_context_value();
        assert_eq!(ctx["clientName"], "WEB");
        assert!(ctx["clientVersion"].as_str().is_some());
        assert_eq!(ctx["hl"], "en");
    }
}
