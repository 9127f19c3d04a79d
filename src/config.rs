use crate::error::BenchResult;
use crate::scene::DisplayMetrics;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub host: HostConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub refresh_period_ms: u64,
    pub virtual_clock: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                width: 800,
                height: 480,
                dpi: 130,
            },
            host: HostConfig {
                refresh_period_ms: 30,
                virtual_clock: false,
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then `scene-bench.{toml,json,..}` (or `file` when given),
    /// then `SCENE_BENCH__` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("display.width", 800)?
            .set_default("display.height", 480)?
            .set_default("display.dpi", 130)?
            .set_default("host.refresh_period_ms", 30)?
            .set_default("host.virtual_clock", false)?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("scene-bench").required(false)),
        };

        // Allow env var overrides (e.g. SCENE_BENCH__DISPLAY__DPI=160)
        builder
            .add_source(config::Environment::with_prefix("SCENE_BENCH").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn display_metrics(&self) -> BenchResult<DisplayMetrics> {
        DisplayMetrics::new(self.display.width, self.display.height, self.display.dpi)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.host.refresh_period_ms.max(1))
    }
}
