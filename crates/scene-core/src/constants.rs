// Shared visual tuning constants used by both web and native frontends.

// Overlay fade
pub const OVERLAY_FADE_SPEED: f32 = 0.4; // opacity units per second
pub const OVERLAY_MAX_OPACITY: f32 = 0.6;

// Cube
pub const CUBE_SIZE: f32 = 3.0;
pub const CUBE_SPIN_PER_FRAME: [f32; 3] = [0.0008, 0.001, 0.0004]; // radians, x/y/z

// Particle field
pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_SPREAD: f32 = 12.0; // x and z extent
pub const PARTICLE_HEIGHT: f32 = 10.0; // y extent
pub const PARTICLE_DRIFT_XZ: f32 = 0.002; // full width of the horizontal velocity range
pub const PARTICLE_RISE_MIN: f32 = 0.001;
pub const PARTICLE_RISE_SPAN: f32 = 0.003;
pub const PARTICLE_WAVE_AMPLITUDE: f32 = 0.001;
pub const PARTICLE_SIZE_MIN: f32 = 0.01;
pub const PARTICLE_SIZE_SPAN: f32 = 0.03;
pub const PARTICLE_OPACITY_MIN: f32 = 0.2;
pub const PARTICLE_OPACITY_SPAN: f32 = 0.4;

// Pointer-driven orientation
pub const ORIENTATION_SMOOTHING: f32 = 0.08; // fraction of the remaining gap closed per frame
pub const POINTER_TARGET_SCALE: f32 = 0.5;
pub const TOUCH_DRAG_GAIN: f32 = 2.0;
pub const TOUCH_TARGET_LIMIT: f32 = 0.8;

// Model
pub const MODEL_PATH: &str = "/assets/models/skull.glb";
pub const MODEL_SCALE: f32 = 2.0;

// HUD
pub const HUD_SCRAMBLE_MS: f64 = 50.0;
pub const HUD_INTERVAL_JITTER_MS: f64 = 2000.0;
pub const HUD_SCRAMBLE_ALPHABET: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?0123456789";
pub const HUD_SEPARATORS: [char; 3] = [' ', '.', '%'];

// Glitch trigger
pub const GLITCH_ROLLS_PER_SEC: f32 = 3.0;
pub const GLITCH_SWAP_THRESHOLD: f32 = 0.9;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 65.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CLEAR_COLOR: [f32; 3] = [0.02, 0.02, 0.02]; // 0x050505

// Light rig: position, rgb, intensity
pub const POINT_LIGHTS: [([f32; 3], [f32; 3], f32); 3] = [
    ([2.0, 1.5, 2.0], [1.0, 0.0, 1.0], 15.0),  // magenta
    ([-2.0, 1.0, 2.0], [1.0, 0.4, 0.0], 12.0), // orange
    ([0.0, -1.5, 2.5], [0.0, 1.0, 1.0], 14.0), // cyan
];
pub const AMBIENT_LIGHT: [f32; 3] = [0.0667, 0.0667, 0.0667];
pub const AMBIENT_INTENSITY: f32 = 0.5;

// Diagnostics
pub const DIAGNOSTIC_FRAME: u64 = 60;
