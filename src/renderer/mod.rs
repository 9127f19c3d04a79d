pub mod area;
pub mod compositor;
pub mod display;
pub mod event_loop;
pub mod frame_buffer;
pub mod texture;
pub mod timer;

pub use area::Area;
pub use compositor::Compositor;
pub use display::{FrameReport, HeadlessDisplay};
pub use event_loop::{HostLoop, DEFAULT_REFRESH_PERIOD};
pub use frame_buffer::FrameBuffer;
pub use timer::{NativeTimer, Timer, VirtualTimer};
