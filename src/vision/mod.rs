pub mod capture;
pub mod frame;
pub mod sink;
pub mod streamer;

pub use capture::{FrameSource, ScreenSource};
pub use sink::{ActiveSessionSink, FrameSink};
pub use streamer::VisionStreamer;
