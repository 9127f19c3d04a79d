use crate::bench::{BenchmarkSession, SchedulerState, StatusDisplay, Tick};
use crate::renderer::timer::Timer;
use crate::renderer::HeadlessDisplay;
use crate::scene::Pass;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(30);

/// Single threaded host loop: scheduler timer first, then display refreshes
/// at a fixed period until the next transition is due.
pub struct HostLoop<T: Timer> {
    timer: T,
    refresh_period: Duration,
    screenshots: Option<PathBuf>,
}

impl<T: Timer> HostLoop<T> {
    pub fn new(timer: T, refresh_period: Duration) -> Self {
        Self {
            timer,
            refresh_period: refresh_period.max(Duration::from_millis(1)),
            screenshots: None,
        }
    }

    /// Save the last frame of every pass as PNG into `dir`.
    pub fn with_screenshots(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshots = Some(dir.into());
        self
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Drive `session` to completion and return the weighted FPS.
    pub fn run(
        &mut self,
        session: &mut BenchmarkSession,
        display: &mut HeadlessDisplay,
        status: &mut dyn StatusDisplay,
    ) -> Result<u32> {
        if let Some(dir) = &self.screenshots {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create screenshot directory: {}", dir.display()))?;
        }

        let mut tick = session.start(display, status)?;
        let mut next_refresh = self.timer.now();

        loop {
            let deadline = match tick {
                Tick::Finished { weighted_fps } => return Ok(weighted_fps),
                Tick::Rearm(delay) => self.timer.now() + delay,
            };

            while next_refresh < deadline {
                self.timer.sleep_until(next_refresh);
                let report = display.refresh(self.timer.now());
                if !report.is_empty() {
                    session.on_frame_rendered(report.millis, report.pixels)?;
                }

                next_refresh += self.refresh_period;
                // Late frames are not made up for.
                next_refresh = next_refresh.max(self.timer.now());
            }

            self.timer.sleep_until(deadline);
            self.capture(session, display)?;
            tick = session.step(display, status)?;
        }
    }

    fn capture(&self, session: &BenchmarkSession, display: &HeadlessDisplay) -> Result<()> {
        let Some(dir) = &self.screenshots else {
            return Ok(());
        };
        let SchedulerState::Running { index, pass } = session.state() else {
            return Ok(());
        };
        let Some((scene, _)) = session.active() else {
            return Ok(());
        };

        let suffix = match pass {
            Pass::Normal => "",
            Pass::Opa => "_opa",
        };
        let path = dir.join(format!("{:02}_{}{}.png", index + 1, slug(scene.name()), suffix));
        display.frame().save_png(&path)?;
        tracing::debug!(path = %path.display(), "saved screenshot");
        Ok(())
    }
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
