use crate::bench::score;
use crate::bench::status::StatusDisplay;
use crate::error::{BenchError, BenchResult};
use crate::rng::RandomSequencer;
use crate::scene::style::SCENE_TIME_MS;
use crate::scene::{DisplayMetrics, Pass, RenderSurface, Scene, SceneRegistry};
use std::time::Duration;

/// How long each pass is measured before the next transition.
pub const SCENE_TIME: Duration = Duration::from_millis(SCENE_TIME_MS as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    NotStarted,
    Running { index: usize, pass: Pass },
    Finished { weighted_fps: u32 },
}

/// What the host should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Call [`BenchmarkSession::step`] again after this delay.
    Rearm(Duration),
    /// The run is over; no further transitions happen.
    Finished { weighted_fps: u32 },
}

/// One benchmark run: the scene registry, the scheduler position and the
/// random sequencer used to lay out scenes.
///
/// The host calls [`start`](Self::start) once, then [`step`](Self::step)
/// whenever the delay returned in [`Tick::Rearm`] has passed. In between, it
/// forwards every display refresh to
/// [`on_frame_rendered`](Self::on_frame_rendered). All three must be called
/// from the same thread of control.
#[derive(Debug, Clone)]
pub struct BenchmarkSession {
    registry: SceneRegistry,
    metrics: DisplayMetrics,
    rng: RandomSequencer,
    state: SchedulerState,
}

impl BenchmarkSession {
    pub fn new(registry: SceneRegistry, metrics: DisplayMetrics) -> Self {
        Self {
            registry,
            metrics,
            rng: RandomSequencer::new(),
            state: SchedulerState::NotStarted,
        }
    }

    /// Session over the scenes compiled into this build.
    pub fn builtin(metrics: DisplayMetrics) -> Self {
        Self::new(SceneRegistry::builtin(), metrics)
    }

    /// Run the first transition by hand.
    pub fn start(
        &mut self,
        surface: &mut dyn RenderSurface,
        status: &mut dyn StatusDisplay,
    ) -> BenchResult<Tick> {
        if self.state != SchedulerState::NotStarted {
            return Err(BenchError::AlreadyStarted);
        }
        self.transition(surface, status)
    }

    /// Timer driven transition: finalize the current pass and start the next.
    pub fn step(
        &mut self,
        surface: &mut dyn RenderSurface,
        status: &mut dyn StatusDisplay,
    ) -> BenchResult<Tick> {
        match self.state {
            SchedulerState::NotStarted => Err(BenchError::NotStarted),
            SchedulerState::Finished { .. } => Err(BenchError::Finished),
            SchedulerState::Running { .. } => self.transition(surface, status),
        }
    }

    /// Accumulate one display refresh into the active pass.
    pub fn on_frame_rendered(&mut self, millis: u32, pixels: u32) -> BenchResult<()> {
        let SchedulerState::Running { index, pass } = self.state else {
            return Err(BenchError::NoActiveScene);
        };
        let scene = self
            .registry
            .get_mut(index)
            .ok_or(BenchError::NoActiveScene)?;
        scene.metrics_mut(pass).record(millis, pixels);
        Ok(())
    }

    fn transition(
        &mut self,
        surface: &mut dyn RenderSurface,
        status: &mut dyn StatusDisplay,
    ) -> BenchResult<Tick> {
        surface.clear();

        let (index, pass) = match self.state {
            SchedulerState::NotStarted => (0, Pass::Normal),
            SchedulerState::Running { index, pass } => {
                self.finalize(index, pass);
                match pass {
                    Pass::Normal => (index, Pass::Opa),
                    Pass::Opa => (index + 1, Pass::Normal),
                }
            }
            SchedulerState::Finished { .. } => return Err(BenchError::Finished),
        };

        let Some(scene) = self.registry.get(index) else {
            return Ok(self.finish(status));
        };

        // 1-based over passes: the last pass reads "2n/2n".
        status.set_title(&format!(
            "{}/{}: {}{}",
            index * 2 + usize::from(pass == Pass::Opa) + 1,
            self.registry.len() * 2,
            scene.name(),
            pass.suffix()
        ));
        status.set_subtitle(&self.previous_result(index, pass));

        tracing::debug!(scene = scene.name(), %pass, index, "starting pass");

        let kind = scene.kind();
        self.rng.reset();
        kind.populate(surface, pass, &mut self.rng, &self.metrics);
        self.state = SchedulerState::Running { index, pass };

        Ok(Tick::Rearm(SCENE_TIME))
    }

    fn finalize(&mut self, index: usize, pass: Pass) {
        let area = self.metrics.area();
        let Some(scene) = self.registry.get_mut(index) else {
            return;
        };

        let metrics = scene.metrics_mut(pass);
        if metrics.millis == 0 {
            metrics.millis = 1;
        }
        metrics.fps = score::pass_fps(metrics, area);

        tracing::info!(
            scene = scene.name(),
            %pass,
            fps = scene.metrics(pass).fps,
            pixels = scene.metrics(pass).pixels,
            millis = scene.metrics(pass).millis,
            "pass finished"
        );
    }

    /// Subtitle text: the result of the pass that ran just before.
    fn previous_result(&self, index: usize, pass: Pass) -> String {
        match pass {
            Pass::Opa => self
                .registry
                .get(index)
                .map(|scene| format!("Result of \"{}\": {} FPS", scene.name(), scene.normal.fps))
                .unwrap_or_default(),
            Pass::Normal => index
                .checked_sub(1)
                .and_then(|prev| self.registry.get(prev))
                .map(|scene| {
                    format!(
                        "Result of \"{}{}\": {} FPS",
                        scene.name(),
                        Pass::Opa.suffix(),
                        scene.opa.fps
                    )
                })
                .unwrap_or_default(),
        }
    }

    fn finish(&mut self, status: &mut dyn StatusDisplay) -> Tick {
        let weighted_fps = score::weighted_fps(&self.registry);
        status.set_title(&format!("Weighted FPS: {weighted_fps}"));
        status.set_subtitle("");

        tracing::info!(weighted_fps, scenes = self.registry.len(), "benchmark finished");

        self.state = SchedulerState::Finished { weighted_fps };
        Tick::Finished { weighted_fps }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Scene currently receiving measurements.
    pub fn active(&self) -> Option<(&Scene, Pass)> {
        match self.state {
            SchedulerState::Running { index, pass } => {
                self.registry.get(index).map(|scene| (scene, pass))
            }
            _ => None,
        }
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &DisplayMetrics {
        &self.metrics
    }

    pub fn weighted_fps(&self) -> Option<u32> {
        match self.state {
            SchedulerState::Finished { weighted_fps } => Some(weighted_fps),
            _ => None,
        }
    }
}
