use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::{CRYSTAL_TINT, PARTICLE_WORLD_SCALE, SKULL_TINT};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use scene_core::model::{cube_mesh, ModelData, ModelVertex};
use scene_core::SceneFrame;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct LightPacked {
    pos: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    lights: [LightPacked; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ParticleInstance {
    pos: [f32; 3],
    size: f32,
    opacity: f32,
}

struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, label: &str, data: &ModelData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: data.indices.len() as u32,
        }
    }
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, model: Mat4, tint: [f32; 3], params: [f32; 4]) {
        let u = ObjectUniforms {
            model: model.to_cols_array_2d(),
            tint: [tint[0], tint[1], tint[2], 1.0],
            params,
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&u));
    }
}

struct LineBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    revision: u64,
}

/// Everything drawn into the HDR target before post-processing.
pub(crate) struct ScenePass {
    scene_buffer: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,

    skull_pipeline: wgpu::RenderPipeline,
    crystal_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    cube: MeshBuffers,
    skull: Option<MeshBuffers>,
    overlay: Option<LineBuffer>,
    quad: wgpu::Buffer,
    particles: wgpu::Buffer,
    particle_capacity: usize,

    cube_obj: ObjectSlot,
    skull_obj: ObjectSlot,
    overlay_obj: ObjectSlot,
    particle_obj: ObjectSlot,

    clear_color: wgpu::Color,
}

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const LINE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32];

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent::OVER,
};

struct PipelineSpec<'a> {
    label: &'a str,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth_write: bool,
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(spec.vs),
            buffers: spec.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(spec.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl ScenePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        clear: [f32; 3],
    ) -> Self {
        let vis = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_entry(0, vis)],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_entry(0, vis)],
        });
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&scene_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        };
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRS,
        };
        let particle_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &QUAD_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];

        let skull_pipeline = make_scene_pipeline(
            device,
            &layout,
            shader,
            PipelineSpec {
                label: "skull",
                vs: "vs_mesh",
                fs: "fs_skull",
                buffers: std::slice::from_ref(&mesh_layout),
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let crystal_pipeline = make_scene_pipeline(
            device,
            &layout,
            shader,
            PipelineSpec {
                label: "crystal",
                vs: "vs_mesh",
                fs: "fs_crystal",
                buffers: std::slice::from_ref(&mesh_layout),
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
            },
        );
        let line_pipeline = make_scene_pipeline(
            device,
            &layout,
            shader,
            PipelineSpec {
                label: "overlay_lines",
                vs: "vs_line",
                fs: "fs_line",
                buffers: std::slice::from_ref(&line_layout),
                topology: wgpu::PrimitiveTopology::LineList,
                blend: ADDITIVE,
                depth_write: false,
            },
        );
        let particle_pipeline = make_scene_pipeline(
            device,
            &layout,
            shader,
            PipelineSpec {
                label: "particles",
                vs: "vs_particle",
                fs: "fs_particle",
                buffers: &particle_layouts,
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: ADDITIVE,
                depth_write: false,
            },
        );

        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_quad"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let particle_capacity = 256;
        let particles = Self::particle_buffer(device, particle_capacity);

        Self {
            scene_buffer,
            scene_bg,
            cube_obj: ObjectSlot::new(device, &object_bgl, "cube_obj"),
            skull_obj: ObjectSlot::new(device, &object_bgl, "skull_obj"),
            overlay_obj: ObjectSlot::new(device, &object_bgl, "overlay_obj"),
            particle_obj: ObjectSlot::new(device, &object_bgl, "particle_obj"),
            skull_pipeline,
            crystal_pipeline,
            line_pipeline,
            particle_pipeline,
            // Unit sized; the cube's model matrix carries its scale.
            cube: MeshBuffers::upload(device, "cube_mesh", &cube_mesh(1.0)),
            skull: None,
            overlay: None,
            quad,
            particles,
            particle_capacity,
            clear_color: wgpu::Color {
                r: clear[0] as f64,
                g: clear[1] as f64,
                b: clear[2] as f64,
                a: 1.0,
            },
        }
    }

    fn particle_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instances"),
            size: (std::mem::size_of::<ParticleInstance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload this frame's data. Every buffer is written at most once per
    /// frame, before the single submit.
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &SceneFrame<'_>,
        aspect: f32,
    ) {
        let view = frame.camera.view();
        let proj = frame.camera.projection(aspect);
        let lights = frame.lights.points.map(|l| LightPacked {
            pos: l.position.extend(1.0).to_array(),
            color: l.color.extend(l.intensity).to_array(),
        });
        let su = SceneUniforms {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: frame.camera.eye.extend(frame.time).to_array(),
            ambient: frame.lights.ambient.extend(frame.particle_time).to_array(),
            lights,
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&su));

        self.cube_obj
            .write(queue, frame.cube, CRYSTAL_TINT, [1.0, 0.0, 0.0, 0.0]);

        if let Some(model) = &frame.model {
            if self.skull.is_none() {
                self.skull = Some(MeshBuffers::upload(device, "skull_mesh", model.data));
                log::info!("[gpu] skull mesh uploaded ({} indices)", model.data.indices.len());
            }
            self.skull_obj
                .write(queue, model.transform, SKULL_TINT, [1.0, 0.0, 0.0, 0.0]);
        }

        let ov = &frame.overlay;
        let count = ov.segments.len() as u32;
        match &mut self.overlay {
            Some(lines) if lines.count == count => {
                if lines.revision != ov.revision {
                    queue.write_buffer(&lines.buffer, 0, bytemuck::cast_slice(ov.segments));
                    lines.revision = ov.revision;
                }
            }
            _ if count > 0 => {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("overlay_lines"),
                    contents: bytemuck::cast_slice(ov.segments),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });
                self.overlay = Some(LineBuffer {
                    buffer,
                    count,
                    revision: ov.revision,
                });
            }
            _ => {}
        }
        self.overlay_obj.write(
            queue,
            ov.transform,
            ov.material.color.to_array(),
            [ov.material.opacity, 0.0, 0.0, 0.0],
        );

        if frame.particles.len() > self.particle_capacity {
            self.particle_capacity = frame.particles.len().next_power_of_two();
            self.particles = Self::particle_buffer(device, self.particle_capacity);
        }
        let instances: Vec<ParticleInstance> = frame
            .particles
            .iter()
            .zip(frame.looks)
            .map(|(p, look)| ParticleInstance {
                pos: p.position.to_array(),
                size: look.size,
                opacity: look.opacity,
            })
            .collect();
        queue.write_buffer(&self.particles, 0, bytemuck::cast_slice(&instances));
        self.particle_obj.write(
            queue,
            Mat4::IDENTITY,
            [1.0, 1.0, 1.0],
            [1.0, PARTICLE_WORLD_SCALE, 0.0, 0.0],
        );
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        frame: &SceneFrame<'_>,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.scene_bg, &[]);

        // Opaque first so the glass and additive layers depth-test against it.
        if let (Some(_), Some(skull)) = (&frame.model, &self.skull) {
            rpass.set_pipeline(&self.skull_pipeline);
            rpass.set_bind_group(1, &self.skull_obj.bind_group, &[]);
            rpass.set_vertex_buffer(0, skull.vertices.slice(..));
            rpass.set_index_buffer(skull.indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..skull.index_count, 0, 0..1);
        }

        rpass.set_pipeline(&self.crystal_pipeline);
        rpass.set_bind_group(1, &self.cube_obj.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.cube.vertices.slice(..));
        rpass.set_index_buffer(self.cube.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.cube.index_count, 0, 0..1);

        let n = frame.particles.len().min(self.particle_capacity) as u32;
        if n > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(1, &self.particle_obj.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad.slice(..));
            rpass.set_vertex_buffer(1, self.particles.slice(..));
            rpass.draw(0..6, 0..n);
        }

        if let Some(lines) = &self.overlay {
            if frame.overlay.material.opacity > 0.0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(1, &self.overlay_obj.bind_group, &[]);
                rpass.set_vertex_buffer(0, lines.buffer.slice(..));
                rpass.draw(0..lines.count, 0..1);
            }
        }
    }
}
