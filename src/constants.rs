// Browser-side tuning constants.
//
// Shared scene tuning lives in `scene_core::constants`; this file only holds
// what the page, the canvas and the GPU materials need.
// Page wiring
pub const CANVAS_ID: &str = "app-canvas";
pub const STAT_ATTRIBUTE: &str = "data-stat";
pub const OVERLAY_QUERY_KEY: &str = "overlay";

// Canvas backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Materials (linear rgb)
pub const SKULL_TINT: [f32; 3] = [1.0, 1.0, 1.0];
pub const CRYSTAL_TINT: [f32; 3] = [0.533, 0.533, 0.6]; // 0x888899

// Particle sprites: `size` is in scene units scaled by this factor
pub const PARTICLE_WORLD_SCALE: f32 = 4.0;
