//! External media tooling - ffprobe/ffmpeg invocation and output handling.

pub mod cmd;
pub mod probe;
pub mod repack;

pub use cmd::{ProbeRunner, RealProbeRunner, RealRepackRunner, RepackRunner};
pub use probe::{video_orientation, ProbeError};
pub use repack::{repack_for_faststart, RepackError};
