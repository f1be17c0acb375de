use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_DISCRIMINATOR_HEADER: &str = "JSON_RPC_MOCK";

pub fn default_discriminator_header() -> String {
    DEFAULT_DISCRIMINATOR_HEADER.to_string()
}

/// One simulated outcome of a method, selected by its discriminator.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResultEntry {
    pub discriminator: String,
    pub is_error: bool,
    /// Opaque payload, re-emitted verbatim. `null` is a legal value.
    pub data: Value,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Handler {
    pub method: String,
    pub result: Vec<ResultEntry>,
}

impl Handler {
    /// First entry declared with `discriminator`, if any.
    pub fn find_result(&self, discriminator: &str) -> Option<&ResultEntry> {
        self.result
            .iter()
            .find(|entry| entry.discriminator == discriminator)
    }
}

/// The whole mock definition. Built once at startup and shared read-only.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Configuration {
    pub server_port: u16,
    pub url_prefix: String,
    #[serde(default = "default_discriminator_header")]
    pub discriminator_header: String,
    pub handlers: Vec<Handler>,
}

impl Configuration {
    /// First handler declared for `method`, if any. Matching is exact and case-sensitive.
    pub fn find_handler(&self, method: &str) -> Option<&Handler> {
        self.handlers.iter().find(|handler| handler.method == method)
    }

    /// The path requests are served under, always starting with `/`.
    pub fn route_path(&self) -> String {
        if self.url_prefix.starts_with('/') {
            self.url_prefix.clone()
        } else {
            format!("/{}", self.url_prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with_prefix(prefix: &str) -> Configuration {
        Configuration {
            server_port: 8080,
            url_prefix: prefix.to_string(),
            discriminator_header: default_discriminator_header(),
            handlers: vec![],
        }
    }

    #[test]
    fn route_path_is_normalized() {
        assert_eq!(config_with_prefix("/rpc").route_path(), "/rpc");
        assert_eq!(config_with_prefix("v1").route_path(), "/v1");
        assert_eq!(config_with_prefix("").route_path(), "/");
    }

    #[test]
    fn discriminator_header_defaults_when_absent() {
        let config: Configuration = serde_json::from_value(json!({
            "server_port": 8080,
            "url_prefix": "/rpc",
            "handlers": []
        }))
        .unwrap();
        assert_eq!(config.discriminator_header, "JSON_RPC_MOCK");
    }

    #[test]
    fn lookups_return_first_declared() {
        let config: Configuration = serde_json::from_value(json!({
            "server_port": 1,
            "url_prefix": "/",
            "handlers": [
                {"method": "a", "result": [
                    {"discriminator": "x", "is_error": false, "data": 1},
                    {"discriminator": "x", "is_error": false, "data": 2}
                ]},
                {"method": "a", "result": []}
            ]
        }))
        .unwrap();

        let handler = config.find_handler("a").unwrap();
        assert_eq!(handler.result.len(), 2);
        assert_eq!(handler.find_result("x").unwrap().data, json!(1));
        assert!(config.find_handler("A").is_none());
    }
}
