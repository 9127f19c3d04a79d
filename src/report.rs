use crate::bench::BenchmarkSession;
use crate::error::{BenchError, BenchResult};
use crate::scene::{DisplayMetrics, PassMetrics, Scene, SceneKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Final results of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub weighted_fps: u32,
    pub display: DisplayMetrics,
    pub scenes: Vec<SceneReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneReport {
    pub name: String,
    pub weight: u32,
    pub kind: SceneKind,
    pub normal: PassReport,
    pub opa: PassReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub pixels: u64,
    pub millis: u64,
    pub fps: u32,
}

impl From<&PassMetrics> for PassReport {
    fn from(metrics: &PassMetrics) -> Self {
        Self {
            pixels: metrics.pixels,
            millis: metrics.millis,
            fps: metrics.fps,
        }
    }
}

impl From<&Scene> for SceneReport {
    fn from(scene: &Scene) -> Self {
        Self {
            name: scene.name().to_string(),
            weight: scene.weight(),
            kind: scene.kind(),
            normal: (&scene.normal).into(),
            opa: (&scene.opa).into(),
        }
    }
}

impl BenchmarkReport {
    /// Snapshot of a finished session.
    pub fn from_session(session: &BenchmarkSession) -> BenchResult<Self> {
        let weighted_fps = session.weighted_fps().ok_or(BenchError::NotFinished)?;
        Ok(Self {
            weighted_fps,
            display: *session.metrics(),
            scenes: session.registry().iter().map(SceneReport::from).collect(),
        })
    }

    /// Scene with the lowest normal pass FPS.
    pub fn slowest(&self) -> Option<&SceneReport> {
        self.scenes.iter().min_by_key(|scene| scene.normal.fps)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "# Benchmark Report\n\n**Weighted FPS**: {}\n\n**Display**: {}x{} @ {} dpi\n\n",
            self.weighted_fps, self.display.width, self.display.height, self.display.dpi
        );
        md.push_str("| Scene | Weight | FPS | FPS + opa | Pixels | Pixels + opa |\n");
        md.push_str("|-------|-------:|----:|----------:|-------:|-------------:|\n");
        for scene in &self.scenes {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                scene.name,
                scene.weight,
                scene.normal.fps,
                scene.opa.fps,
                scene.normal.pixels,
                scene.opa.pixels
            ));
        }
        md
    }

    /// Write the report; the format follows the extension (json, toml, md).
    pub fn export(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => self.to_markdown(),
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}
