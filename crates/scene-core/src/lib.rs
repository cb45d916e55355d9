pub mod camera;
pub mod config;
pub mod constants;
pub mod cube;
pub mod error;
pub mod frame;
pub mod hud;
pub mod interaction;
pub mod model;
pub mod overlay;
pub mod particles;
pub mod post;
pub mod render;
pub mod rng;
pub mod time;

pub use config::SceneConfig;
pub use error::SceneError;
pub use frame::{FrameReport, Scene};
pub use render::{FrameRenderer, SceneFrame};
pub use rng::{RandomSource, ReplayRandom, SeededRandom};
pub use time::{FrameClock, InstantClock, ManualClock, TimeSample};
