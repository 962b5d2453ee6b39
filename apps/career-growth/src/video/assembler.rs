//! Video Assembler — per-slide still-image clips concatenated into one MP4.
//!
//! `FfmpegAssembler` shells out to ffmpeg twice per run shape:
//! 1. one encode per slide: looped PNG for exactly the audio duration + AAC track
//! 2. one stream-copy concat of all clips, in slide order, via the concat demuxer
//!
//! Intermediate clips live in a `TempDir`. The final file is written next to the
//! output path and renamed over it only after ffmpeg succeeds, so a failed run
//! never leaves a partial video behind.

use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;
use tempfile::{Builder, NamedTempFile};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::video::encoder::MaterializedClip;

/// Output frame rate of every roadmap video.
pub const FRAME_RATE: u32 = 24;

/// rw-r--r--, what a plain `File::create` yields under the usual umask.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Longest ffmpeg stderr excerpt carried into an error message.
const STDERR_TAIL_CHARS: usize = 600;

/// The assembly boundary. `clips` arrive in slide order.
#[async_trait]
pub trait VideoAssembler: Send + Sync {
    async fn assemble(&self, clips: &[MaterializedClip], output: &Path) -> Result<(), AppError>;
}

/// Assembler backed by the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegAssembler {
    ffmpeg: OsString,
    fps: u32,
}

impl FfmpegAssembler {
    pub fn new(ffmpeg: impl Into<OsString>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            fps: FRAME_RATE,
        }
    }

    async fn run(&self, args: Vec<OsString>, step: &str) -> Result<(), AppError> {
        debug!(step, "Running ffmpeg");
        let output = Command::new(&self.ffmpeg)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                AppError::Assembly(format!(
                    "failed to launch {}: {e}",
                    self.ffmpeg.to_string_lossy()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Assembly(format!(
                "ffmpeg {step} failed ({}): {}",
                output.status,
                stderr_tail(&stderr)
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VideoAssembler for FfmpegAssembler {
    async fn assemble(&self, clips: &[MaterializedClip], output: &Path) -> Result<(), AppError> {
        if clips.is_empty() {
            return Err(AppError::Assembly("no clips to assemble".to_string()));
        }

        let work = tempfile::tempdir()?;
        let mut clip_paths = Vec::with_capacity(clips.len());

        for clip in clips {
            let clip_path = work.path().join(format!("clip-{:02}.mp4", clip.index));
            self.run(
                clip_args(clip, &clip_path, self.fps),
                &format!("clip {}", clip.index + 1),
            )
            .await?;
            clip_paths.push(clip_path);
        }

        let list_path = work.path().join("concat.txt");
        let list: String = clip_paths.iter().map(|p| concat_entry(p)).collect();
        tokio::fs::write(&list_path, list).await?;

        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let staged = Builder::new()
            .prefix(".career-video-")
            .suffix(".mp4")
            .tempfile_in(parent)?;

        self.run(concat_args(&list_path, staged.path()), "concat")
            .await?;

        publish(staged, output)?;
        info!(
            clips = clips.len(),
            "Video written to {}",
            output.display()
        );
        Ok(())
    }
}

/// Gives the staged file ordinary permissions and renames it over `output`.
///
/// Temp files are created owner-only; the finished video should not be.
pub(crate) fn publish(staged: NamedTempFile, output: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_MODE))?;
    }
    staged.persist(output).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

/// ffmpeg arguments for one still-image clip lasting exactly `clip.duration`.
pub(crate) fn clip_args(clip: &MaterializedClip, out: &Path, fps: u32) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-loop", "1"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push("-framerate".into());
    args.push(fps.to_string().into());
    args.push("-i".into());
    args.push(clip.image_path().into());
    args.push("-i".into());
    args.push(clip.audio_path().into());
    args.push("-t".into());
    args.push(format!("{:.3}", clip.duration.as_secs_f64()).into());
    for flag in [
        "-c:v", "libx264", "-tune", "stillimage", "-pix_fmt", "yuv420p", "-c:a", "aac", "-ar",
        "44100", "-ac", "2",
    ] {
        args.push(flag.into());
    }
    args.push("-r".into());
    args.push(fps.to_string().into());
    args.push(out.into());
    args
}

/// ffmpeg arguments for a stream-copy concat of the clips listed in `list`.
pub(crate) fn concat_args(list: &Path, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-y", "-hide_banner", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(list.into());
    args.push("-c".into());
    args.push("copy".into());
    // The staged output has a hidden temp name; name the container explicitly.
    args.push("-f".into());
    args.push("mp4".into());
    args.push(out.into());
    args
}

/// One concat-demuxer line. Single quotes inside the path are escaped as `'\''`.
pub(crate) fn concat_entry(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', r"'\''");
    format!("file '{escaped}'\n")
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    let count = trimmed.chars().count();
    if count <= STDERR_TAIL_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().skip(count - STDERR_TAIL_CHARS).collect()
    }
}
