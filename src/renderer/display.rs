use crate::renderer::area::join_areas;
use crate::renderer::texture::TextureSet;
use crate::renderer::{Area, Compositor, FrameBuffer};
use crate::scene::{Primitive, RenderSurface};
use std::time::{Duration, Instant};

pub const BACKGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Render cost of one refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whole milliseconds newly accumulated since the previous report.
    pub millis: u32,
    /// Pixels redrawn.
    pub pixels: u32,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.pixels == 0
    }
}

#[derive(Debug, Clone)]
struct Placed {
    primitive: Primitive,
    started_at: Option<Duration>,
    drawn: Option<Area>,
    y: i32,
}

/// Off-screen display with dirty area tracking.
///
/// Only areas invalidated since the previous refresh are redrawn, which is
/// what the benchmark measures.
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    frame: FrameBuffer,
    textures: TextureSet,
    objects: Vec<Placed>,
    invalid: Vec<Area>,
    render_time: Duration,
    reported_ms: u128,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = FrameBuffer::new(width, height);
        frame.clear(BACKGROUND);
        Self {
            invalid: vec![frame.bounds()],
            frame,
            textures: TextureSet::new(),
            objects: Vec::new(),
            render_time: Duration::ZERO,
            reported_ms: 0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn invalidate(&mut self, area: Area) {
        if let Some(area) = area.intersect(&self.frame.bounds()) {
            self.invalid.push(area);
        }
    }

    /// Advance animations to `now`, redraw what changed and report the cost.
    ///
    /// Milliseconds are taken from the cumulative render time so sub
    /// millisecond frames still add up across refreshes.
    pub fn refresh(&mut self, now: Duration) -> FrameReport {
        let started = Instant::now();

        let mut moved = Vec::new();
        for placed in &mut self.objects {
            let start = *placed.started_at.get_or_insert(now);
            let elapsed = now.saturating_sub(start).as_millis() as u64;
            placed.y = placed.primitive.y_at(elapsed);

            let bounds = Compositor::primitive_bounds(&placed.primitive, placed.y);
            if placed.drawn != Some(bounds) {
                moved.extend(placed.drawn);
                moved.push(bounds);
                placed.drawn = Some(bounds);
            }
        }
        for area in moved {
            self.invalidate(area);
        }

        let areas = join_areas(std::mem::take(&mut self.invalid));
        let mut pixels: u64 = 0;
        for area in &areas {
            self.frame.fill_area(area, BACKGROUND);
            for placed in &self.objects {
                let Some(drawn) = placed.drawn else {
                    continue;
                };
                if drawn.intersect(area).is_some() {
                    Compositor::draw_primitive(
                        &mut self.frame,
                        area,
                        &placed.primitive,
                        placed.y,
                        &self.textures,
                    );
                }
            }
            pixels += area.size();
        }

        self.render_time += started.elapsed();
        // Empty reports are dropped by the host, so they carry no milliseconds.
        let millis = if pixels == 0 {
            0
        } else {
            let total_ms = self.render_time.as_millis();
            let millis = total_ms - self.reported_ms;
            self.reported_ms = total_ms;
            millis
        };

        if !areas.is_empty() {
            tracing::trace!(areas = areas.len(), pixels, millis = millis as u64, "refresh");
        }

        FrameReport {
            millis: millis.min(u32::MAX as u128) as u32,
            pixels: pixels.min(u32::MAX as u64) as u32,
        }
    }
}

impl RenderSurface for HeadlessDisplay {
    fn size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn clear(&mut self) {
        self.objects.clear();
        self.invalid.clear();
        self.invalid.push(self.frame.bounds());
    }

    fn add(&mut self, primitive: Primitive) {
        self.objects.push(Placed {
            y: primitive.anim.from,
            primitive,
            started_at: None,
            drawn: None,
        });
    }
}
