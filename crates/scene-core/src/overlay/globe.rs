use super::{DurationRange, OverlayTiming, WireframeOverlay};
use glam::{Mat4, Vec3};

const GLOBE_RADIUS: f32 = 4.5;
const GLOBE_YAW_PER_SEC: f32 = 0.08;
const GLOBE_TILT: f32 = 0.15;
const GLOBE_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);

// Coarse continent outlines as [longitude, latitude] in degrees.
const NORTH_AMERICA: &[[f32; 2]] = &[
    [-168.0, 65.0], [-166.0, 60.0], [-140.0, 60.0], [-130.0, 55.0], [-125.0, 48.0],
    [-124.0, 40.0], [-117.0, 32.0], [-105.0, 25.0], [-97.0, 25.0], [-90.0, 21.0],
    [-87.0, 18.0], [-83.0, 10.0], [-80.0, 8.0], [-77.0, 8.0], [-73.0, 11.0],
    [-62.0, 10.0], [-60.0, 14.0], [-65.0, 18.0], [-72.0, 18.0], [-75.0, 20.0],
    [-80.0, 25.0], [-81.0, 30.0], [-75.0, 35.0], [-70.0, 41.0], [-67.0, 44.0],
    [-66.0, 50.0], [-55.0, 50.0], [-55.0, 52.0], [-60.0, 56.0], [-65.0, 60.0],
    [-75.0, 62.0], [-80.0, 65.0], [-90.0, 70.0], [-110.0, 72.0], [-130.0, 70.0],
    [-145.0, 70.0], [-165.0, 68.0], [-168.0, 65.0],
];
const SOUTH_AMERICA: &[[f32; 2]] = &[
    [-80.0, 8.0], [-77.0, 4.0], [-80.0, -2.0], [-81.0, -6.0], [-75.0, -15.0],
    [-70.0, -18.0], [-70.0, -25.0], [-65.0, -35.0], [-68.0, -52.0], [-72.0, -55.0],
    [-68.0, -55.0], [-64.0, -50.0], [-58.0, -40.0], [-48.0, -28.0], [-46.0, -24.0],
    [-40.0, -22.0], [-38.0, -15.0], [-35.0, -8.0], [-35.0, -2.0], [-50.0, 2.0],
    [-55.0, 5.0], [-60.0, 8.0], [-65.0, 10.0], [-73.0, 11.0], [-77.0, 8.0], [-80.0, 8.0],
];
const EUROPE: &[[f32; 2]] = &[
    [-10.0, 36.0], [-5.0, 36.0], [0.0, 38.0], [5.0, 43.0], [3.0, 46.0],
    [-2.0, 48.0], [2.0, 51.0], [5.0, 54.0], [8.0, 55.0], [12.0, 55.0],
    [15.0, 55.0], [18.0, 55.0], [24.0, 60.0], [28.0, 70.0], [20.0, 70.0],
    [10.0, 65.0], [5.0, 62.0], [-5.0, 58.0], [-10.0, 52.0], [-10.0, 45.0], [-10.0, 36.0],
];
const AFRICA: &[[f32; 2]] = &[
    [-17.0, 15.0], [-15.0, 10.0], [-5.0, 5.0], [10.0, 2.0], [12.0, -5.0],
    [15.0, -12.0], [20.0, -18.0], [27.0, -28.0], [32.0, -34.0], [28.0, -32.0],
    [25.0, -30.0], [18.0, -28.0], [12.0, -18.0], [15.0, -5.0], [20.0, 2.0],
    [30.0, 5.0], [42.0, 10.0], [50.0, 12.0], [43.0, 12.0], [35.0, 20.0],
    [32.0, 32.0], [25.0, 32.0], [10.0, 37.0], [-5.0, 36.0], [-10.0, 30.0],
    [-17.0, 25.0], [-17.0, 15.0],
];
const ASIA: &[[f32; 2]] = &[
    [28.0, 70.0], [50.0, 70.0], [70.0, 72.0], [100.0, 75.0], [130.0, 72.0],
    [140.0, 70.0], [160.0, 65.0], [170.0, 60.0], [165.0, 55.0], [145.0, 45.0],
    [140.0, 35.0], [130.0, 30.0], [122.0, 25.0], [120.0, 22.0], [110.0, 20.0],
    [105.0, 10.0], [100.0, 5.0], [95.0, 6.0], [92.0, 22.0], [88.0, 22.0],
    [82.0, 15.0], [77.0, 8.0], [72.0, 20.0], [68.0, 24.0], [62.0, 25.0],
    [55.0, 25.0], [50.0, 30.0], [40.0, 35.0], [35.0, 35.0], [28.0, 42.0],
    [28.0, 70.0],
];
const AUSTRALIA: &[[f32; 2]] = &[
    [115.0, -22.0], [120.0, -18.0], [130.0, -14.0], [142.0, -12.0], [150.0, -22.0],
    [153.0, -28.0], [150.0, -35.0], [145.0, -38.0], [138.0, -35.0], [130.0, -32.0],
    [122.0, -34.0], [115.0, -34.0], [115.0, -22.0],
];

const CONTINENTS: [&[[f32; 2]]; 6] = [
    NORTH_AMERICA,
    SOUTH_AMERICA,
    EUROPE,
    AFRICA,
    ASIA,
    AUSTRALIA,
];

const GRID_LATITUDES: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
const GRID_LONGITUDES: [f32; 6] = [-120.0, -60.0, 0.0, 60.0, 120.0, 180.0];

/// Map latitude/longitude in degrees onto a sphere of `radius`.
pub fn lat_long_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

fn grid_paths() -> Vec<Vec<[f32; 2]>> {
    let mut paths = Vec::with_capacity(GRID_LATITUDES.len() + GRID_LONGITUDES.len());
    for lat in GRID_LATITUDES {
        paths.push((0..=24).map(|k| [-180.0 + 15.0 * k as f32, lat]).collect());
    }
    for lon in GRID_LONGITUDES {
        paths.push((0..=15).map(|k| [lon, -75.0 + 10.0 * k as f32]).collect());
    }
    paths
}

fn push_polyline(out: &mut Vec<Vec3>, path: &[[f32; 2]], radius: f32) {
    for pair in path.windows(2) {
        out.push(lat_long_to_vec3(pair[0][1], pair[0][0], radius));
        out.push(lat_long_to_vec3(pair[1][1], pair[1][0], radius));
    }
}

/// Line segments for the continent outlines and lat/long grid.
pub fn globe_segments(radius: f32) -> Vec<Vec3> {
    let mut out = Vec::new();
    for path in CONTINENTS {
        push_polyline(&mut out, path, radius);
    }
    for path in grid_paths() {
        push_polyline(&mut out, &path, radius);
    }
    out
}

/// Slowly turning wireframe Earth with a fixed axial tilt.
pub struct GlobeOverlay {
    segments: Vec<Vec3>,
    yaw: f32,
}

impl GlobeOverlay {
    pub fn new() -> Self {
        Self {
            segments: globe_segments(GLOBE_RADIUS),
            yaw: 0.0,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

impl Default for GlobeOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl WireframeOverlay for GlobeOverlay {
    fn name(&self) -> &'static str {
        "globe"
    }

    fn timing(&self) -> OverlayTiming {
        OverlayTiming {
            initial: DurationRange::new(8.0, 20.0),
            visible: DurationRange::new(4.0, 7.0),
            hidden: DurationRange::new(12.0, 30.0),
        }
    }

    fn advance(&mut self, dt: f32, _elapsed: f32) {
        self.yaw += dt * GLOBE_YAW_PER_SEC;
    }

    fn segments(&self) -> &[Vec3] {
        &self.segments
    }

    fn transform(&self) -> Mat4 {
        Mat4::from_rotation_x(GLOBE_TILT) * Mat4::from_rotation_y(self.yaw)
    }

    fn color(&self) -> Vec3 {
        GLOBE_COLOR
    }
}
