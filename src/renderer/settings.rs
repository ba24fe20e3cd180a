/// Renderer configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub vsync: bool,
    pub clear_color: wgpu::Color,
    pub depth_format: wgpu::TextureFormat,
    pub power_preference: wgpu::PowerPreference,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            // Neutral grey background
            clear_color: wgpu::Color {
                r: 0.251,
                g: 0.251,
                b: 0.251,
                a: 1.0,
            },
            depth_format: wgpu::TextureFormat::Depth32Float,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}
