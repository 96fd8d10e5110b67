use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Main listener: UI pages, HTMX partials, API and static assets
    pub addr: String,
    /// Optional second listener that only serves `/api/*`
    pub api_addr: Option<String>,
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

/// Knobs for the dashboard views and the goal projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub user_id: i32,
    pub summary_span_days: i64,
    pub milestone_kg: f64,
    pub goal_kg: f64,
    pub trend_window_days: i64,
    pub quick_add_limit: i64,
    pub bmi_window_days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Layer overrides from `lookup` onto a preset. Blank values count as
    /// unset and unparseable numbers keep the preset value.
    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Server overrides
        if let Some(v) = get("ADDR") {
            self.server.addr = normalize_addr(&v);
        }
        if let Some(v) = get("API_ADDR").or_else(|| get("MCP_ADDR")) {
            self.server.api_addr = Some(normalize_addr(&v));
        }
        if let Some(v) = get("STATIC_DIR") {
            self.server.static_dir = v;
        }

        // Database overrides
        if let Some(v) = get("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = get("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Dashboard overrides
        if let Some(v) = get("VITALS_USER_ID") {
            self.dashboard.user_id = v.parse().unwrap_or(self.dashboard.user_id);
        }
        if let Some(v) = get("VITALS_SUMMARY_SPAN_DAYS") {
            self.dashboard.summary_span_days = v.parse().unwrap_or(self.dashboard.summary_span_days);
        }
        if let Some(v) = get("VITALS_MILESTONE_KG") {
            self.dashboard.milestone_kg = v.parse().unwrap_or(self.dashboard.milestone_kg);
        }
        if let Some(v) = get("VITALS_GOAL_KG") {
            self.dashboard.goal_kg = v.parse().unwrap_or(self.dashboard.goal_kg);
        }
        if let Some(v) = get("VITALS_TREND_WINDOW_DAYS") {
            self.dashboard.trend_window_days = v.parse().unwrap_or(self.dashboard.trend_window_days);
        }
        if let Some(v) = get("VITALS_QUICK_ADD_LIMIT") {
            self.dashboard.quick_add_limit = v.parse().unwrap_or(self.dashboard.quick_add_limit);
        }
        if let Some(v) = get("VITALS_BMI_WINDOW_DAYS") {
            self.dashboard.bmi_window_days = v.parse().unwrap_or(self.dashboard.bmi_window_days);
        }

        // Security overrides
        if let Some(v) = get("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Logging overrides
        if let Some(v) = get("LOG_FORMAT") {
            self.logging.format = match v.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Text,
            };
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                addr: "0.0.0.0:8181".to_string(),
                api_addr: None,
                static_dir: "static".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            dashboard: DashboardConfig::default(),
            security: SecurityConfig { enable_cors: true },
            logging: LoggingConfig { format: LogFormat::Text },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                addr: "0.0.0.0:8181".to_string(),
                api_addr: None,
                static_dir: "static".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 5,
            },
            dashboard: DashboardConfig::default(),
            security: SecurityConfig { enable_cors: false },
            logging: LoggingConfig { format: LogFormat::Json },
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            user_id: 1,
            summary_span_days: 3,
            milestone_kg: 63.0,
            goal_kg: 60.0,
            trend_window_days: 30,
            quick_add_limit: 5,
            bmi_window_days: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Accept Go-style ":8181" listen addresses as well as full host:port pairs
pub fn normalize_addr(addr: &str) -> String {
    let addr = addr.trim();
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
