//! Slide Encoder — materializes in-memory slide assets as scoped temp files.
//!
//! The assembler works on file paths, not buffers. Each file is a `NamedTempFile`
//! owned by its `MaterializedClip` and deleted when the clip is dropped, whichever
//! way the run ends.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use tempfile::{Builder, NamedTempFile};

use crate::errors::AppError;
use crate::speech::{normalize_wav, wav_duration};

/// Rendered image + synthesized audio for one slide.
#[derive(Debug, Clone)]
pub struct SlideAssets {
    /// Zero-based position in the script.
    pub index: usize,
    /// PNG bytes.
    pub image: Vec<u8>,
    /// WAV bytes.
    pub audio: Bytes,
}

/// A slide's assets on disk, ready for assembly.
#[derive(Debug)]
pub struct MaterializedClip {
    pub index: usize,
    /// Display time of the still image; equals the audio length.
    pub duration: Duration,
    image: NamedTempFile,
    audio: NamedTempFile,
}

impl MaterializedClip {
    pub fn image_path(&self) -> &Path {
        self.image.path()
    }

    pub fn audio_path(&self) -> &Path {
        self.audio.path()
    }
}

/// Writes `assets` to two temp files under `dir` (system temp dir when `None`).
///
/// The clip duration is read from the WAV header before anything touches disk.
/// Placeholder header lengths are patched, so the file on disk matches that duration.
pub fn encode_slide(
    assets: SlideAssets,
    dir: Option<&Path>,
) -> Result<MaterializedClip, AppError> {
    let wav = normalize_wav(&assets.audio);
    let duration = wav_duration(&wav)?;

    let image = write_temp(&assets.image, assets.index, ".png", dir)?;
    let audio = write_temp(&wav, assets.index, ".wav", dir)?;

    Ok(MaterializedClip {
        index: assets.index,
        duration,
        image,
        audio,
    })
}

fn write_temp(
    bytes: &[u8],
    index: usize,
    suffix: &str,
    dir: Option<&Path>,
) -> Result<NamedTempFile, AppError> {
    let prefix = format!("slide-{index:02}-");
    let mut builder = Builder::new();
    builder.prefix(&prefix).suffix(suffix);

    let mut file = match dir {
        Some(d) => builder.tempfile_in(d)?,
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
