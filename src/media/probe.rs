use super::cmd::ProbeRunner;
use crate::domain::Orientation;
use serde::Deserialize;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

/// The parts of ffprobe's `-print_format json -show_streams` output we read.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    // Audio streams carry no dimensions; zero classifies as unclassified.
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run ffprobe: {0}")]
    Io(#[from] std::io::Error),
    #[error("ffprobe exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("could not parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Probe a local media file and classify its orientation from the first
/// stream's dimensions. Single attempt, no retry.
pub async fn video_orientation(
    runner: &dyn ProbeRunner,
    path: &Path,
) -> Result<Orientation, ProbeError> {
    let output = runner.run_ffprobe(path).await?;
    if !output.status.success() {
        return Err(ProbeError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let data: ProbeOutput = serde_json::from_slice(&output.stdout)?;
    match data.streams.first() {
        Some(stream) => Ok(Orientation::from_dimensions(stream.width, stream.height)),
        None => Ok(Orientation::Unclassified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::cmd::MockProbeRunner;
    use std::os::unix::process::ExitStatusExt;
    use std::process::Output;

    fn output(raw_status: i32, stdout: &str, stderr: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(raw_status),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    fn runner_yielding(raw_status: i32, stdout: &'static str, stderr: &'static str) -> MockProbeRunner {
        let mut runner = MockProbeRunner::new();
        runner
            .expect_run_ffprobe()
            .returning(move |_| Ok(output(raw_status, stdout, stderr)));
        runner
    }

    #[tokio::test]
    async fn wide_stream_classifies_wide() {
        let runner = runner_yielding(
            0,
            r#"{"streams":[{"width":1920,"height":1080,"codec_type":"video"}]}"#,
            "",
        );
        let orientation = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(orientation, Orientation::Wide);
    }

    #[tokio::test]
    async fn tall_stream_classifies_tall() {
        let runner = runner_yielding(0, r#"{"streams":[{"width":1080,"height":1920}]}"#, "");
        let orientation = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(orientation, Orientation::Tall);
    }

    #[tokio::test]
    async fn no_streams_is_unclassified() {
        let runner = runner_yielding(0, r#"{"streams":[]}"#, "");
        let orientation = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(orientation, Orientation::Unclassified);
    }

    #[tokio::test]
    async fn missing_streams_key_is_unclassified() {
        let runner = runner_yielding(0, r#"{}"#, "");
        let orientation = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(orientation, Orientation::Unclassified);
    }

    #[tokio::test]
    async fn dimensionless_stream_is_unclassified() {
        let runner = runner_yielding(0, r#"{"streams":[{"codec_type":"audio"}]}"#, "");
        let orientation = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(orientation, Orientation::Unclassified);
    }

    #[tokio::test]
    async fn rerunning_the_same_probe_is_idempotent() {
        let mut runner = MockProbeRunner::new();
        runner
            .expect_run_ffprobe()
            .times(2)
            .returning(|_| Ok(output(0, r#"{"streams":[{"width":1920,"height":1080}]}"#, "")));
        let first = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        let second = video_orientation(&runner, Path::new("in.mp4")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error_with_stderr() {
        // Raw wait status 256 == exit code 1.
        let runner = runner_yielding(256, "", "in.mp4: Invalid data found");
        let err = video_orientation(&runner, Path::new("in.mp4")).await.unwrap_err();
        match err {
            ProbeError::Failed { stderr, .. } => assert!(stderr.contains("Invalid data")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn garbage_output_is_a_parse_error() {
        let runner = runner_yielding(0, "not json", "");
        let err = video_orientation(&runner, Path::new("in.mp4")).await.unwrap_err();
        assert!(matches!(err, ProbeError::Parse(_)));
    }

    #[tokio::test]
    async fn spawn_failure_is_an_io_error() {
        let mut runner = MockProbeRunner::new();
        runner
            .expect_run_ffprobe()
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no ffprobe")));
        let err = video_orientation(&runner, Path::new("in.mp4")).await.unwrap_err();
        assert!(matches!(err, ProbeError::Io(_)));
    }
}
