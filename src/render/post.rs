use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;
use scene_core::post::{PostStageKind, PostUniforms};

pub(crate) struct PostPipelines {
    pub(crate) bright: wgpu::RenderPipeline,
    pub(crate) blur_h: wgpu::RenderPipeline,
    pub(crate) blur_v: wgpu::RenderPipeline,
    pub(crate) bloom_composite: wgpu::RenderPipeline,
    pub(crate) dof: wgpu::RenderPipeline,
    pub(crate) chromatic: wgpu::RenderPipeline,
    pub(crate) vignette: wgpu::RenderPipeline,
    pub(crate) glitch: wgpu::RenderPipeline,
    pub(crate) grain: wgpu::RenderPipeline,
    pub(crate) output: wgpu::RenderPipeline,
}

impl PostPipelines {
    /// Pipeline for stages that are one HDR → HDR pass.
    pub(crate) fn single_pass(&self, kind: PostStageKind) -> Option<&wgpu::RenderPipeline> {
        match kind {
            PostStageKind::DepthOfField => Some(&self.dof),
            PostStageKind::ChromaticAberration => Some(&self.chromatic),
            PostStageKind::Vignette => Some(&self.vignette),
            PostStageKind::Glitch => Some(&self.glitch),
            PostStageKind::FilmGrain => Some(&self.grain),
            _ => None,
        }
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // src + sampler + uniforms + depth
    pub(crate) bgl1: wgpu::BindGroupLayout, // aux + sampler
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) pipelines: PostPipelines,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let float = wgpu::TextureSampleType::Float { filterable: true };
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0, float),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            helpers::texture_entry(3, wgpu::TextureSampleType::Depth),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_entry(0, float), helpers::sampler_entry(1)],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_single"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_composite"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let make = |layout: &wgpu::PipelineLayout, entry: &str, format| {
        helpers::make_post_pipeline(device, layout, shader, entry, format)
    };
    let pipelines = PostPipelines {
        bright: make(&pl_single, "fs_bright", HDR_FORMAT),
        blur_h: make(&pl_single, "fs_blur_h", HDR_FORMAT),
        blur_v: make(&pl_single, "fs_blur_v", HDR_FORMAT),
        bloom_composite: make(&pl_composite, "fs_bloom_composite", HDR_FORMAT),
        dof: make(&pl_single, "fs_dof", HDR_FORMAT),
        chromatic: make(&pl_single, "fs_chromatic", HDR_FORMAT),
        vignette: make(&pl_single, "fs_vignette", HDR_FORMAT),
        glitch: make(&pl_single, "fs_glitch", HDR_FORMAT),
        grain: make(&pl_single, "fs_grain", HDR_FORMAT),
        output: make(&pl_single, "fs_output", swap_format),
    };

    PostResources {
        bgl0,
        bgl1,
        uniform_buffer,
        sampler,
        pipelines,
    }
}

/// Bind groups keyed by the texture a pass reads.
pub(crate) struct PostBindGroups {
    pub(crate) from_hdr: [wgpu::BindGroup; 2],
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_aux: wgpu::BindGroup,
}

pub(crate) fn create_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    targets: &RenderTargets,
) -> PostBindGroups {
    let src = |label: &str, view: &wgpu::TextureView| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &post.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&post.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: post.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(targets.depth_view()),
                },
            ],
        })
    };
    let bloom_aux = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_aux"),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a.1),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&post.sampler),
            },
        ],
    });
    PostBindGroups {
        from_hdr: [
            src("bg_from_hdr_0", targets.hdr_view(0)),
            src("bg_from_hdr_1", targets.hdr_view(1)),
        ],
        from_bloom_a: src("bg_from_bloom_a", &targets.bloom_a.1),
        from_bloom_b: src("bg_from_bloom_b", &targets.bloom_b.1),
        bloom_aux,
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
