//! Loaded model geometry and the single-resolution slot it is published in.

use crate::error::SceneError;
use anyhow::{anyhow, bail, Context};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use gltf::mesh::util::ReadIndices;
use std::cell::RefCell;
use std::rc::Rc;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh with all primitives merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl ModelData {
    /// Parse a binary glTF (`.glb`) or self-contained `.gltf` and recompute
    /// smooth normals.
    pub fn from_glb_bytes(path: &str, bytes: &[u8]) -> Result<Self, SceneError> {
        Self::parse(bytes).map_err(|e| SceneError::asset_load(path, format!("{:#}", e)))
    }

    fn parse(bytes: &[u8]) -> anyhow::Result<Self> {
        let (doc, buffers, _images) = gltf::import_slice(bytes).context("invalid glTF data")?;

        let mut data = ModelData::default();
        for mesh in doc.meshes() {
            for prim in mesh.primitives() {
                if prim.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
                let Some(positions) = reader.read_positions() else {
                    continue;
                };
                let start = data.vertices.len() as u32;
                let before = data.vertices.len();
                data.vertices.extend(positions.map(|p| ModelVertex {
                    position: p,
                    normal: [0.0; 3],
                }));
                let count = (data.vertices.len() - before) as u32;
                let local: Vec<u32> = match reader.read_indices() {
                    Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                    Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                    Some(ReadIndices::U32(it)) => it.collect(),
                    None => (0..count).collect(),
                };
                if let Some(bad) = local.iter().find(|&&i| i >= count) {
                    return Err(anyhow!(
                        "index {} out of range for primitive with {} vertices",
                        bad,
                        count
                    ));
                }
                data.indices.extend(local.into_iter().map(|i| start + i));
            }
        }

        if data.vertices.is_empty() || data.indices.len() < 3 {
            bail!("no triangle geometry found");
        }
        data.indices.truncate(data.indices.len() - data.indices.len() % 3);
        data.recompute_normals();
        Ok(data)
    }

    /// Area-weighted vertex normals from the triangle list.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            // Cross product length is twice the area.
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned box of all vertex positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Flat-shaded cube of edge length `size`, centred on the origin.
pub fn cube_mesh(size: f32) -> ModelData {
    let h = size / 2.0;
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Y, -Vec3::Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (-Vec3::Y, Vec3::Z, -Vec3::X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::X, -Vec3::Y),
    ];
    let mut data = ModelData::default();
    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + u * su + v * sv) * h;
            data.vertices.push(ModelVertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    data
}

#[derive(Clone, Debug)]
pub enum ModelState {
    Pending,
    Loaded(Rc<ModelData>),
    Failed(String),
}

/// Shared cell the asset loader publishes into exactly once.
///
/// The frame loop only ever sees `Pending`, `Loaded` or `Failed`; a load that
/// never finishes simply leaves the slot pending.
#[derive(Clone)]
pub struct ModelSlot {
    path: Rc<str>,
    state: Rc<RefCell<ModelState>>,
}

impl ModelSlot {
    pub fn new(path: &str) -> Self {
        Self {
            path: Rc::from(path),
            state: Rc::new(RefCell::new(ModelState::Pending)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Publish the load result. Returns false if the slot was already
    /// resolved, in which case `result` is dropped.
    pub fn resolve(&self, result: Result<ModelData, SceneError>) -> bool {
        let mut state = self.state.borrow_mut();
        if !matches!(*state, ModelState::Pending) {
            log::warn!("[model] {} already resolved, ignoring late result", self.path);
            return false;
        }
        *state = match result {
            Ok(data) => {
                log::info!(
                    "[model] loaded {}: {} vertices, {} triangles",
                    self.path,
                    data.vertices.len(),
                    data.triangle_count()
                );
                ModelState::Loaded(Rc::new(data))
            }
            Err(e) => {
                log::error!("[model] {}", e);
                ModelState::Failed(e.to_string())
            }
        };
        true
    }

    pub fn get(&self) -> Option<Rc<ModelData>> {
        match &*self.state.borrow() {
            ModelState::Loaded(data) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> ModelState {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), ModelState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_has_outward_normals() {
        let cube = cube_mesh(2.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        for v in &cube.vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn recompute_normals_on_single_triangle() {
        let mut m = ModelData {
            vertices: vec![
                ModelVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0; 3],
                },
                ModelVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0; 3],
                },
                ModelVertex {
                    position: [0.0, 1.0, 0.0],
                    normal: [0.0; 3],
                },
            ],
            indices: vec![0, 1, 2],
        };
        m.recompute_normals();
        for v in &m.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
