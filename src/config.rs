use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::events::{EventBus, EventKind, Subscriber};
use crate::logger::clock::SystemClock;
use crate::logger::FileLogger;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub url: String,
}

// Route table: defined at startup, never mutated
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    pub entries: HashMap<String, RouteTarget>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteTarget {
    View { file: String, content_type: String },
    DailyInfo,
}

impl RoutesConfig {
    /// Exact, case-sensitive match on the raw request target.
    ///
    /// No trailing-slash normalization and no query-string stripping: a
    /// target carrying a query string matches nothing.
    pub fn lookup(&self, target: &str) -> Option<&RouteTarget> {
        self.entries.get(target)
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        let mut entries = HashMap::new();
        for (path, file) in [
            ("/", "views/index.html"),
            ("/about", "views/about.html"),
            ("/contact", "views/contact.html"),
            ("/products", "views/products.html"),
            ("/subscribe", "views/subscribe.html"),
        ] {
            entries.insert(
                path.to_string(),
                RouteTarget::View {
                    file: file.to_string(),
                    content_type: "text/html".to_string(),
                },
            );
        }
        entries.insert("/daily-info".to_string(), RouteTarget::DailyInfo);
        Self { entries }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("VIEWHOST"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.dir", "logs")?
            .set_default(
                "upstream.url",
                "https://api.exchangerate-api.com/v4/latest/USD",
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Process-wide context passed to the HTTP entry point.
///
/// Built once before the listener binds, read-only thereafter. Holds the
/// subscriber registry, the route table, and the shared upstream client.
pub struct AppState {
    pub config: Config,
    pub bus: EventBus,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let file_logger: Arc<dyn Subscriber> = Arc::new(FileLogger::new(
            &config.logging.dir,
            Box::new(SystemClock),
        ));

        let mut bus = EventBus::new();
        bus.subscribe(EventKind::Log, Arc::clone(&file_logger));
        bus.subscribe(EventKind::Error, file_logger);

        Self {
            config: config.clone(),
            bus,
            client: reqwest::Client::new(),
        }
    }
}
