use crate::bench::{BenchmarkSession, StatusDisplay};
use crate::renderer::{HeadlessDisplay, HostLoop, NativeTimer, Timer, VirtualTimer};
use crate::report::BenchmarkReport;
use crate::scene::DisplayMetrics;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a run needs after config and CLI flags are merged.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub metrics: DisplayMetrics,
    pub refresh_period: Duration,
    pub virtual_clock: bool,
    pub screenshots: Option<PathBuf>,
}

/// Prints status changes as progress lines.
pub struct ConsoleStatus;

impl StatusDisplay for ConsoleStatus {
    fn set_title(&mut self, text: &str) {
        println!("▶ {}", text);
    }

    fn set_subtitle(&mut self, text: &str) {
        if !text.is_empty() {
            println!("  ✓ {}", text);
        }
    }
}

pub struct BenchmarkContext;

impl BenchmarkContext {
    pub fn run(settings: &RunSettings) -> Result<BenchmarkReport> {
        let metrics = settings.metrics;
        let mut session = BenchmarkSession::builtin(metrics);
        let mut display = HeadlessDisplay::new(metrics.width, metrics.height);
        let mut status = ConsoleStatus;

        println!(
            "\n🏁 Running {} scenes on {}x{} @ {} dpi ({} clock)\n",
            session.registry().len(),
            metrics.width,
            metrics.height,
            metrics.dpi,
            if settings.virtual_clock { "virtual" } else { "wall" }
        );

        if settings.virtual_clock {
            Self::drive(VirtualTimer::new(), settings, &mut session, &mut display, &mut status)?;
        } else {
            Self::drive(NativeTimer::new(), settings, &mut session, &mut display, &mut status)?;
        }

        let report = BenchmarkReport::from_session(&session)?;
        Self::print_summary(&report);
        Ok(report)
    }

    fn drive<T: Timer>(
        timer: T,
        settings: &RunSettings,
        session: &mut BenchmarkSession,
        display: &mut HeadlessDisplay,
        status: &mut dyn StatusDisplay,
    ) -> Result<u32> {
        let mut host = HostLoop::new(timer, settings.refresh_period);
        if let Some(dir) = &settings.screenshots {
            host = host.with_screenshots(dir.clone());
        }
        host.run(session, display, status)
    }

    fn print_summary(report: &BenchmarkReport) {
        println!("\n📊 Results:");
        for scene in &report.scenes {
            println!(
                "  {:<28} {:>5} FPS   {:>5} FPS + opa   (weight {})",
                scene.name, scene.normal.fps, scene.opa.fps, scene.weight
            );
        }
        if let Some(slowest) = report.slowest() {
            println!("\n🐢 Slowest scene: {} ({} FPS)", slowest.name, slowest.normal.fps);
        }
        println!("\n⚡ Weighted FPS: {}", report.weighted_fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_run_produces_full_report() {
        let settings = RunSettings {
            metrics: DisplayMetrics::new(160, 100, 60).unwrap(),
            refresh_period: Duration::from_millis(30),
            virtual_clock: true,
            screenshots: None,
        };

        let report = BenchmarkContext::run(&settings).unwrap();

        assert_eq!(report.scenes.len(), 35);
        assert_eq!(report.display.width, 160);
        assert!(report
            .scenes
            .iter()
            .all(|scene| scene.normal.pixels > 0 && scene.opa.pixels > 0));
    }
}
