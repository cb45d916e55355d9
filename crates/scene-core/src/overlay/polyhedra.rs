use super::{DurationRange, OverlayTiming, WireframeOverlay};
use glam::{Mat4, Quat, Vec3};

const CLUSTER_COLOR: Vec3 = Vec3::new(1.0, 0.0, 1.0);
const CLUSTER_YAW_PER_SEC: f32 = 0.12;
const CLUSTER_PITCH_PER_SEC: f32 = 0.05;

struct Body {
    edges: Vec<[Vec3; 2]>,
    offset: Vec3,
    scale: f32,
    spin_axis: Vec3,
    spin_rate: f32,
}

fn icosahedron_edges() -> Vec<[Vec3; 2]> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let verts = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|v| v.normalize());
    // Neighbouring vertices of a unit icosahedron sit exactly one edge apart.
    let edge = verts[0].distance(verts[1]);
    edges_by_length(&verts, edge)
}

fn octahedron_edges() -> Vec<[Vec3; 2]> {
    let verts = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];
    edges_by_length(&verts, 2.0_f32.sqrt())
}

fn tetrahedron_edges() -> Vec<[Vec3; 2]> {
    let verts = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
    ]
    .map(|v| v.normalize());
    let edge = verts[0].distance(verts[1]);
    edges_by_length(&verts, edge)
}

fn edges_by_length(verts: &[Vec3], edge: f32) -> Vec<[Vec3; 2]> {
    let mut out = Vec::new();
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            if (verts[i].distance(verts[j]) - edge).abs() < 1e-3 {
                out.push([verts[i], verts[j]]);
            }
        }
    }
    out
}

/// Cluster of edge-only platonic solids, each spinning on its own axis.
pub struct PolyhedraOverlay {
    bodies: Vec<Body>,
    segments: Vec<Vec3>,
    yaw: f32,
    pitch: f32,
    elapsed: f32,
    revision: u64,
}

impl PolyhedraOverlay {
    pub fn new() -> Self {
        let bodies = vec![
            Body {
                edges: icosahedron_edges(),
                offset: Vec3::ZERO,
                scale: 3.2,
                spin_axis: Vec3::new(0.3, 1.0, 0.1).normalize(),
                spin_rate: 0.15,
            },
            Body {
                edges: octahedron_edges(),
                offset: Vec3::new(2.6, 1.2, -1.0),
                scale: 1.1,
                spin_axis: Vec3::new(1.0, 0.2, 0.0).normalize(),
                spin_rate: -0.35,
            },
            Body {
                edges: tetrahedron_edges(),
                offset: Vec3::new(-2.4, -1.4, 0.8),
                scale: 0.9,
                spin_axis: Vec3::new(0.0, 0.4, 1.0).normalize(),
                spin_rate: 0.5,
            },
        ];
        let mut overlay = Self {
            bodies,
            segments: Vec::new(),
            yaw: 0.0,
            pitch: 0.0,
            elapsed: 0.0,
            revision: 0,
        };
        overlay.rebuild_segments();
        overlay
    }

    fn rebuild_segments(&mut self) {
        self.segments.clear();
        for body in &self.bodies {
            let spin = Quat::from_axis_angle(body.spin_axis, body.spin_rate * self.elapsed);
            for [a, b] in &body.edges {
                self.segments.push(body.offset + spin * (*a * body.scale));
                self.segments.push(body.offset + spin * (*b * body.scale));
            }
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PolyhedraOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl WireframeOverlay for PolyhedraOverlay {
    fn name(&self) -> &'static str {
        "polyhedra"
    }

    fn timing(&self) -> OverlayTiming {
        OverlayTiming {
            initial: DurationRange::new(10.0, 30.0),
            visible: DurationRange::new(3.0, 5.0),
            hidden: DurationRange::new(10.0, 25.0),
        }
    }

    fn advance(&mut self, dt: f32, elapsed: f32) {
        self.yaw += dt * CLUSTER_YAW_PER_SEC;
        self.pitch += dt * CLUSTER_PITCH_PER_SEC;
        self.elapsed = elapsed;
        self.rebuild_segments();
        self.revision += 1;
    }

    fn segments(&self) -> &[Vec3] {
        &self.segments
    }

    fn geometry_revision(&self) -> u64 {
        self.revision
    }

    fn transform(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch) * Mat4::from_rotation_y(self.yaw)
    }

    fn color(&self) -> Vec3 {
        CLUSTER_COLOR
    }
}
