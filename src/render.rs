use scene_core::post::PostStageKind;
use scene_core::{FrameRenderer, SceneError, SceneFrame};
use web_sys as web;

mod helpers;
mod post;
mod scene_pass;
mod targets;
use post::PostBindGroups;
use scene_pass::ScenePass;
use targets::RenderTargets;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePass,
    targets: RenderTargets,
    post: post::PostResources,
    bind_groups: PostBindGroups,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, clear: [f32; 3]) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });

        let scene = ScenePass::new(&device, &scene_shader, clear);
        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, format);
        let bind_groups = post::create_bind_groups(&device, &post, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            post,
            bind_groups,
            width,
            height,
        })
    }

    fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Bind groups reference the target views, so rebuild both
            self.targets.recreate(&self.device, width, height);
            self.bind_groups = post::create_bind_groups(&self.device, &self.post, &self.targets);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    fn encode_post(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame: &SceneFrame<'_>,
        swap_view: &wgpu::TextureView,
    ) {
        let pipes = &self.post.pipelines;
        let bgs = &self.bind_groups;
        // Index of the HDR target holding the latest image.
        let mut cur = 0usize;

        for stage in frame.post.stages() {
            match stage.kind {
                PostStageKind::Render => {
                    self.scene.encode(
                        encoder,
                        self.targets.hdr_view(0),
                        self.targets.depth_view(),
                        frame,
                    );
                    cur = 0;
                }
                PostStageKind::Bloom => {
                    post::blit(
                        encoder,
                        "bright_pass",
                        &self.targets.bloom_a.1,
                        &pipes.bright,
                        &bgs.from_hdr[cur],
                        None,
                    );
                    post::blit(
                        encoder,
                        "blur_h",
                        &self.targets.bloom_b.1,
                        &pipes.blur_h,
                        &bgs.from_bloom_a,
                        None,
                    );
                    post::blit(
                        encoder,
                        "blur_v",
                        &self.targets.bloom_a.1,
                        &pipes.blur_v,
                        &bgs.from_bloom_b,
                        None,
                    );
                    post::blit(
                        encoder,
                        "bloom_composite",
                        self.targets.hdr_view(1 - cur),
                        &pipes.bloom_composite,
                        &bgs.from_hdr[cur],
                        Some(&bgs.bloom_aux),
                    );
                    cur = 1 - cur;
                }
                PostStageKind::Output => {
                    post::blit(encoder, "output", swap_view, &pipes.output, &bgs.from_hdr[cur], None);
                }
                kind => {
                    if let Some(pipeline) = pipes.single_pass(kind) {
                        post::blit(
                            encoder,
                            kind.name(),
                            self.targets.hdr_view(1 - cur),
                            pipeline,
                            &bgs.from_hdr[cur],
                            None,
                        );
                        cur = 1 - cur;
                    }
                }
            }
        }
    }
}

impl FrameRenderer for GpuState<'_> {
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), SceneError> {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let uniforms = frame.post.uniforms(frame.camera);
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.scene.prepare(&self.device, &self.queue, frame, aspect);

        let output = self
            .surface
            .get_current_texture()
            .map_err(|e| SceneError::Render(format!("{:?}", e)))?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.encode_post(&mut encoder, frame, &view);
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resize_if_needed(width, height);
    }
}
