use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";
pub const LOG_FILE: &str = "dashboard.log";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_PAGE_FILE: &str = "dashboard.html";
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
