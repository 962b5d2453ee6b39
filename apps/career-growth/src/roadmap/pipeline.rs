//! Roadmap Video Pipeline — career title in, MP4 out.
//!
//! Flow: generate_script → per slide, concurrently: {render (spawn_blocking),
//!       synthesize} → encode_slide → assemble (slide order).
//!
//! Every collaborator is injected so tests can swap in stubs. Temp files belong to
//! `MaterializedClip`s and are dropped on every exit path.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::render::SlideRenderer;
use crate::roadmap::script::{generate_script, Slide};
use crate::speech::SpeechSynthesizer;
use crate::video::{encode_slide, MaterializedClip, SlideAssets, VideoAssembler};

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RoadmapReport {
    pub career: String,
    pub slide_count: usize,
    pub total_duration: Duration,
    pub output: PathBuf,
}

pub struct RoadmapPipeline {
    llm: Arc<dyn CompletionClient>,
    speech: Arc<dyn SpeechSynthesizer>,
    renderer: Arc<SlideRenderer>,
    assembler: Arc<dyn VideoAssembler>,
    /// Where slide temp files go; system temp dir when `None`.
    temp_dir: Option<PathBuf>,
}

impl RoadmapPipeline {
    pub fn new(
        llm: Arc<dyn CompletionClient>,
        speech: Arc<dyn SpeechSynthesizer>,
        renderer: SlideRenderer,
        assembler: Arc<dyn VideoAssembler>,
    ) -> Self {
        Self {
            llm,
            speech,
            renderer: Arc::new(renderer),
            assembler,
            temp_dir: None,
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Runs the whole pipeline for `career` and writes the video to `output`,
    /// replacing any existing file.
    pub async fn run(&self, career: &str, output: &Path) -> Result<RoadmapReport, AppError> {
        let slides = generate_script(career, self.llm.as_ref()).await?;
        info!(career, slides = slides.len(), "Slide script validated");

        let clips = try_join_all(
            slides
                .iter()
                .enumerate()
                .map(|(index, slide)| self.produce_clip(index, slide)),
        )
        .await?;
        info!(clips = clips.len(), "Slide assets materialized");

        let total_duration: Duration = clips.iter().map(|c| c.duration).sum();
        self.assembler.assemble(&clips, output).await?;

        Ok(RoadmapReport {
            career: career.to_string(),
            slide_count: clips.len(),
            total_duration,
            output: output.to_path_buf(),
        })
    }

    /// Renders and narrates one slide concurrently, then writes both to temp files.
    async fn produce_clip(&self, index: usize, slide: &Slide) -> Result<MaterializedClip, AppError> {
        let renderer = Arc::clone(&self.renderer);
        let to_render = slide.clone();
        let render = async move {
            tokio::task::spawn_blocking(move || renderer.render(&to_render))
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("render task for slide {index} failed: {e}"))
                })?
                .map_err(AppError::from)
        };
        let narrate = async {
            self.speech
                .synthesize(&slide.voiceover)
                .await
                .map_err(AppError::from)
        };

        let (image, audio) = tokio::try_join!(render, narrate)?;
        encode_slide(SlideAssets { index, image, audio }, self.temp_dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::advisor::pipeline::tests::StubCompletion;
    use crate::roadmap::script::tests::six_slides_json;
    use crate::speech::tests::silent_wav;
    use crate::speech::SpeechError;

    /// Speech stub: the n-th call gets (0.5 + 0.25·n)s of audio and finishes
    /// later the earlier it started, so completion order is reversed.
    struct StubSpeech {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    impl StubSpeech {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Some(call),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for StubSpeech {
        async fn synthesize(&self, _text: &str) -> Result<Bytes, SpeechError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10 * (6 - n.min(6)) as u64)).await;
            if self.fail_on == Some(n) {
                return Err(SpeechError::Api {
                    status: 503,
                    message: "synthesis unavailable".to_string(),
                });
            }
            Ok(Bytes::from(silent_wav(0.5 + 0.25 * n as f64, 8_000)))
        }
    }

    /// What the assembler saw for one clip.
    #[derive(Debug, Clone)]
    struct SeenClip {
        index: usize,
        duration: Duration,
        image_dims: (u32, u32),
        image_path: PathBuf,
        audio_path: PathBuf,
    }

    #[derive(Default)]
    struct RecordingAssembler {
        seen: Mutex<Vec<SeenClip>>,
    }

    #[async_trait]
    impl VideoAssembler for RecordingAssembler {
        async fn assemble(&self, clips: &[MaterializedClip], output: &Path) -> Result<(), AppError> {
            let mut seen = self.seen.lock().unwrap();
            for clip in clips {
                let png = std::fs::read(clip.image_path())?;
                let image = image::load_from_memory(&png).map_err(|e| anyhow::anyhow!(e))?;
                assert!(clip.audio_path().exists());
                seen.push(SeenClip {
                    index: clip.index,
                    duration: clip.duration,
                    image_dims: (image.width(), image.height()),
                    image_path: clip.image_path().to_path_buf(),
                    audio_path: clip.audio_path().to_path_buf(),
                });
            }
            std::fs::write(output, format!("{} clips", clips.len()))?;
            Ok(())
        }
    }

    fn pipeline(
        reply: &str,
        speech: StubSpeech,
        assembler: Arc<RecordingAssembler>,
        temp: &Path,
    ) -> RoadmapPipeline {
        RoadmapPipeline::new(
            Arc::new(StubCompletion::new(reply)),
            Arc::new(speech),
            SlideRenderer::builtin(),
            assembler,
        )
        .with_temp_dir(temp)
    }

    #[tokio::test]
    async fn test_six_slides_become_six_ordered_clips() {
        let scratch = tempfile::tempdir().unwrap();
        let output = scratch.path().join("career_overview.mp4");
        let temp = tempfile::tempdir().unwrap();
        let assembler = Arc::new(RecordingAssembler::default());

        let report = pipeline(
            &six_slides_json(),
            StubSpeech::new(),
            Arc::clone(&assembler),
            temp.path(),
        )
        .run("Data Science", &output)
        .await
        .unwrap();

        assert_eq!(report.slide_count, 6);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "6 clips");

        let seen = assembler.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 6);
        let order: Vec<usize> = seen.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);

        for (i, clip) in seen.iter().enumerate() {
            assert_eq!(clip.image_dims, (1280, 720));
            let expected = 0.5 + 0.25 * i as f64;
            assert!((clip.duration.as_secs_f64() - expected).abs() < 1e-3);
        }
        let expected_total: f64 = (0..6).map(|i| 0.5 + 0.25 * i as f64).sum();
        assert!((report.total_duration.as_secs_f64() - expected_total).abs() < 1e-2);

        for clip in &seen {
            assert!(!clip.image_path.exists(), "image temp file leaked");
            assert!(!clip.audio_path.exists(), "audio temp file leaked");
        }
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_not_json_fails_without_output() {
        let scratch = tempfile::tempdir().unwrap();
        let output = scratch.path().join("career_overview.mp4");
        let temp = tempfile::tempdir().unwrap();
        let assembler = Arc::new(RecordingAssembler::default());
        let speech = StubSpeech::new();

        let p = pipeline("not json", speech, Arc::clone(&assembler), temp.path());
        let err = p.run("Data Science", &output).await.unwrap_err();

        assert!(matches!(err, AppError::Contract(_)));
        assert!(!output.exists());
        assert!(assembler.seen.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_five_slides_is_an_error_not_a_short_video() {
        let mut slides: Vec<serde_json::Value> = serde_json::from_str(&six_slides_json()).unwrap();
        slides.pop();
        let reply = serde_json::to_string(&slides).unwrap();

        let scratch = tempfile::tempdir().unwrap();
        let output = scratch.path().join("career_overview.mp4");
        let temp = tempfile::tempdir().unwrap();
        let assembler = Arc::new(RecordingAssembler::default());

        let err = pipeline(&reply, StubSpeech::new(), Arc::clone(&assembler), temp.path())
            .run("Data Science", &output)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Contract(_)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_synthesis_failure_cleans_temp_files() {
        let scratch = tempfile::tempdir().unwrap();
        let output = scratch.path().join("career_overview.mp4");
        let temp = tempfile::tempdir().unwrap();
        let assembler = Arc::new(RecordingAssembler::default());

        let err = pipeline(
            &six_slides_json(),
            StubSpeech::failing_on(3),
            Arc::clone(&assembler),
            temp.path(),
        )
        .run("Data Science", &output)
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Speech(_)));
        assert!(!output.exists());
        assert!(assembler.seen.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
