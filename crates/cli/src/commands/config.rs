use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;
use weddy_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, env_keys, value) in effective_values(&config) {
        let source =
            field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(render_line(key, &value, source));
    }

    lines.join("\n")
}

type EffectiveValue = (&'static str, &'static [&'static str], String);

fn field(key: &'static str, env_keys: &'static [&'static str], value: String) -> EffectiveValue {
    (key, env_keys, value)
}

fn effective_values(config: &AppConfig) -> Vec<EffectiveValue> {
    vec![
        field("database.url", &["WEDDY_DATABASE_URL"], config.database.url.clone()),
        field(
            "database.max_connections",
            &["WEDDY_DATABASE_MAX_CONNECTIONS"],
            config.database.max_connections.to_string(),
        ),
        field(
            "database.timeout_secs",
            &["WEDDY_DATABASE_TIMEOUT_SECS"],
            config.database.timeout_secs.to_string(),
        ),
        field("server.bind_address", &["WEDDY_SERVER_BIND_ADDRESS"], config.server.bind_address.clone()),
        field("server.port", &["WEDDY_SERVER_PORT"], config.server.port.to_string()),
        field(
            "server.graceful_shutdown_secs",
            &["WEDDY_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            config.server.graceful_shutdown_secs.to_string(),
        ),
        field(
            "images.base_path",
            &["WEDDY_IMAGES_BASE_PATH"],
            config.images.base_path.display().to_string(),
        ),
        field("cache.backend", &["WEDDY_CACHE_BACKEND"], format!("{:?}", config.cache.backend)),
        field("cache.ttl_secs", &["WEDDY_CACHE_TTL_SECS"], config.cache.ttl_secs.to_string()),
        field(
            "recommend.default_limit",
            &["WEDDY_RECOMMEND_DEFAULT_LIMIT"],
            config.recommend.default_limit.to_string(),
        ),
        field(
            "logging.level",
            &["WEDDY_LOGGING_LEVEL", "WEDDY_LOG_LEVEL"],
            config.logging.level.clone(),
        ),
        field(
            "logging.format",
            &["WEDDY_LOGGING_FORMAT", "WEDDY_LOG_FORMAT"],
            format!("{:?}", config.logging.format),
        ),
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("weddy.toml"), PathBuf::from("config/weddy.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
