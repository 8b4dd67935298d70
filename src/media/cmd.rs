use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Runs ffprobe against a local file and returns its raw output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run_ffprobe(&self, path: &Path) -> io::Result<Output>;
}

/// Runs ffmpeg to rewrite a container with metadata up front.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepackRunner: Send + Sync {
    async fn run_ffmpeg_faststart(&self, input: &Path, output: &Path) -> io::Result<Output>;
}

/// Invokes the real `ffprobe` binary, bounded by a timeout.
pub struct RealProbeRunner {
    timeout: Duration,
}

impl RealProbeRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeRunner for RealProbeRunner {
    async fn run_ffprobe(&self, path: &Path) -> io::Result<Output> {
        let mut command = Command::new("ffprobe");
        command
            .arg("-v")
            .arg("error")
            .arg("-print_format")
            .arg("json")
            .arg("-show_streams")
            .arg(path)
            .kill_on_drop(true);
        run_bounded(command, self.timeout, "ffprobe").await
    }
}

/// Invokes the real `ffmpeg` binary, bounded by a timeout.
pub struct RealRepackRunner {
    timeout: Duration,
}

impl RealRepackRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl RepackRunner for RealRepackRunner {
    async fn run_ffmpeg_faststart(&self, input: &Path, output: &Path) -> io::Result<Output> {
        let mut command = Command::new("ffmpeg");
        command
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-c")
            .arg("copy")
            .arg("-movflags")
            .arg("faststart")
            .arg("-f")
            .arg("mp4")
            .arg(output)
            .kill_on_drop(true);
        run_bounded(command, self.timeout, "ffmpeg").await
    }
}

/// Run a command to completion or kill it when the timeout expires.
/// `kill_on_drop` ensures the child does not outlive a timed-out request.
async fn run_bounded(mut command: Command, timeout: Duration, tool: &str) -> io::Result<Output> {
    match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("{} did not finish within {}s", tool, timeout.as_secs()),
        )),
    }
}
