use super::helpers;

/// Offscreen targets for the scene and post chain.
///
/// - `hdr` is a pair of full-resolution Rgba16Float buffers; post stages read
///   one and write the other.
/// - `depth` is written by the scene pass and sampled by depth of field.
/// - `bloom_*` are half-resolution buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr: [(wgpu::Texture, wgpu::TextureView); 2],
    pub(crate) depth: (wgpu::Texture, wgpu::TextureView),
    pub(crate) bloom_a: (wgpu::Texture, wgpu::TextureView),
    pub(crate) bloom_b: (wgpu::Texture, wgpu::TextureView),
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (bw, bh) = bloom_size(width, height);
        Self {
            hdr: [
                helpers::create_hdr_target(device, "hdr_0", width, height),
                helpers::create_hdr_target(device, "hdr_1", width, height),
            ],
            depth: helpers::create_depth_target(device, width, height),
            bloom_a: helpers::create_hdr_target(device, "bloom_a", bw, bh),
            bloom_b: helpers::create_hdr_target(device, "bloom_b", bw, bh),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    pub(crate) fn hdr_view(&self, i: usize) -> &wgpu::TextureView {
        &self.hdr[i & 1].1
    }

    pub(crate) fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.1
    }
}

fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
