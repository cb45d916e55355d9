use anyhow::Context;
use scene_core::hud::{SinkRegistry, TextSink};
use scene_core::model::{ModelData, ModelState};
use scene_core::overlay::OverlayVariant;
use scene_core::{FrameRenderer, ManualClock, Scene, SceneConfig, SceneError, SceneFrame};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const FRAME_RATE: f64 = 60.0;
const DEFAULT_SECONDS: f64 = 60.0;

struct Args {
    seconds: f64,
    model: Option<PathBuf>,
    seed: Option<u64>,
    overlay: Option<OverlayVariant>,
}

/// Run length in seconds; must be finite and non-negative.
fn parse_seconds(arg: Option<&str>) -> anyhow::Result<f64> {
    let Some(s) = arg else {
        return Ok(DEFAULT_SECONDS);
    };
    let seconds = s
        .parse::<f64>()
        .with_context(|| format!("invalid seconds '{}'", s))?;
    anyhow::ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "seconds must be a finite, non-negative number, got '{}'",
        s
    );
    Ok(seconds)
}

fn parse_args() -> anyhow::Result<Args> {
    let mut argv = std::env::args().skip(1);
    let seconds = parse_seconds(argv.next().as_deref())?;
    let model = argv.next().map(PathBuf::from);
    let seed = match std::env::var("SCENE_SEED") {
        Ok(s) => Some(s.parse::<u64>().with_context(|| format!("invalid SCENE_SEED '{}'", s))?),
        Err(_) => None,
    };
    let overlay = match std::env::var("SCENE_OVERLAY") {
        Ok(s) => Some(
            OverlayVariant::parse(&s).ok_or_else(|| anyhow::anyhow!("unknown SCENE_OVERLAY '{}'", s))?,
        ),
        Err(_) => None,
    };
    Ok(Args {
        seconds,
        model,
        seed,
        overlay,
    })
}

/// Stands in for a GPU: counts frames and traces what would be drawn.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
    skull_frames: u64,
    overlay_frames: u64,
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), SceneError> {
        self.frames += 1;
        if frame.model.is_some() {
            self.skull_frames += 1;
        }
        if frame.overlay.material.opacity > 0.0 {
            self.overlay_frames += 1;
        }
        log::trace!(
            "[gpu] t={:.3} particles={} overlay_opacity={:.3} glitch_active={}",
            frame.time,
            frame.particles.len(),
            frame.overlay.material.opacity,
            frame.post.glitch().active()
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("[gpu] resize {}x{}", width, height);
    }
}

struct LogSink {
    tag: String,
}

impl TextSink for LogSink {
    fn set_text(&mut self, text: &str) -> Result<(), SceneError> {
        log::trace!("[hud] {} <- {}", self.tag, text);
        Ok(())
    }
}

struct LogRegistry;

impl SinkRegistry for LogRegistry {
    fn lookup(&mut self, tag: &str) -> Option<Box<dyn TextSink>> {
        Some(Box::new(LogSink {
            tag: tag.to_string(),
        }))
    }
}

fn load_model(path: &Path) -> Result<ModelData, SceneError> {
    let name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| SceneError::asset_load(&name, e))?;
    ModelData::from_glb_bytes(&name, &bytes)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let mut config = SceneConfig {
        seed: args.seed,
        ..SceneConfig::default()
    };
    if let Some(v) = args.overlay {
        config.overlay = v;
    }
    if let Some(path) = &args.model {
        config.model_path = path.display().to_string();
    }

    let mut scene = Scene::from_config(config, &mut LogRegistry);
    if let Some(path) = &args.model {
        scene.model_slot().resolve(load_model(path));
    }

    let clock = ManualClock::new();
    let mut renderer = LogRenderer::default();
    renderer.resize(1280, 720);
    scene.resize(1280, 720);

    let frames = (args.seconds * FRAME_RATE).round().max(0.0) as u64;
    let mut transitions = 0usize;
    let mut hud_updates = 0usize;
    let mut settled: HashMap<&'static str, String> = HashMap::new();

    for _ in 0..frames {
        clock.advance(1.0 / FRAME_RATE);
        let report = scene.frame(&clock, glam::Vec2::ZERO, &mut renderer);
        hud_updates += report.hud_updates;
        if let Some(change) = report.transition {
            transitions += 1;
            log::info!(
                "[overlay] t={:.2}s {} -> {}",
                report.sample.elapsed,
                change.from.name(),
                change.to.name()
            );
        }
        for stage in &report.stage_failures {
            log::warn!("[frame] t={:.2}s stage '{}' failed", report.sample.elapsed, stage);
        }

        let hud = scene.hud();
        for tag in hud.tags() {
            if hud.is_scrambled(tag) {
                continue;
            }
            let Some(text) = hud.shown(tag) else { continue };
            if settled.get(tag).map(String::as_str) != Some(text) {
                log::info!("[hud] t={:.2}s {} = {}", report.sample.elapsed, tag, text);
                settled.insert(tag, text.to_string());
            }
        }
    }

    let model = match scene.model_slot().state() {
        ModelState::Pending => "not loaded".to_string(),
        ModelState::Loaded(data) => format!("loaded ({} triangles)", data.triangle_count()),
        ModelState::Failed(reason) => format!("failed: {}", reason),
    };
    log::info!(
        "summary: frames={} rendered={} transitions={} hud_updates={} skull_frames={} overlay_frames={} model={}",
        scene.frame_count(),
        renderer.frames,
        transitions,
        hud_updates,
        renderer.skull_frames,
        renderer.overlay_frames,
        model
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_default_when_missing() {
        assert_eq!(parse_seconds(None).unwrap(), DEFAULT_SECONDS);
        assert_eq!(parse_seconds(Some("2.5")).unwrap(), 2.5);
        assert_eq!(parse_seconds(Some("0")).unwrap(), 0.0);
    }

    #[test]
    fn seconds_reject_non_finite_and_negative() {
        for bad in ["inf", "-inf", "NaN", "infinity", "-1", "abc"] {
            assert!(parse_seconds(Some(bad)).is_err(), "{} accepted", bad);
        }
    }
}
