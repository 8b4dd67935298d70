use super::cmd::RepackRunner;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepackError {
    #[error("failed to run ffmpeg: {0}")]
    Io(#[from] std::io::Error),
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Rewrite the container so the moov atom precedes sample data, enabling
/// progressive playback. Produces a sibling file and returns its path; any
/// pre-existing output is overwritten. The caller owns cleanup of both files.
pub async fn repack_for_faststart(
    runner: &dyn RepackRunner,
    input: &Path,
) -> Result<PathBuf, RepackError> {
    let output_path = faststart_output_path(input);
    let output = runner.run_ffmpeg_faststart(input, &output_path).await?;
    if !output.status.success() {
        return Err(RepackError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output_path)
}

fn faststart_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".faststart.mp4");
    input.with_file_name(name)
}
