#[cfg(any(test, target_os = "android"))]
use glutin::{
    config::{Api, ColorBufferType, ConfigTemplate, ConfigTemplateBuilder},
    context::{ContextApi, Version},
};

/// Pixel format and context requirements of an OpenGL view surface.
///
/// The default is what every moui view uses: RGBA8888 color, a 24-bit depth
/// buffer with an 8-bit stencil buffer, a translucent surface, and an
/// OpenGL ES 2.0 context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub red_size: u8,
    pub green_size: u8,
    pub blue_size: u8,
    pub alpha_size: u8,
    pub depth_size: u8,
    pub stencil_size: u8,
    pub translucent: bool,
    pub gles_version: (u8, u8),
}

impl SurfaceConfig {
    /// The older allocation policy: a 16-bit depth buffer and no stencil.
    pub const fn legacy() -> Self {
        Self {
            depth_size: 16,
            stencil_size: 0,
            ..Self::DEFAULT
        }
    }

    const DEFAULT: Self = Self {
        red_size: 8,
        green_size: 8,
        blue_size: 8,
        alpha_size: 8,
        depth_size: 24,
        stencil_size: 8,
        translucent: true,
        gles_version: (2, 0),
    };

    // Both conversions are only needed where EGL is.
    #[cfg(any(test, target_os = "android"))]
    pub(crate) fn config_template(&self) -> ConfigTemplate {
        ConfigTemplateBuilder::new()
            .with_api(Api::GLES2)
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: self.red_size,
                g_size: self.green_size,
                b_size: self.blue_size,
            })
            .with_alpha_size(self.alpha_size)
            .with_depth_size(self.depth_size)
            .with_stencil_size(self.stencil_size)
            .with_transparency(self.translucent)
            .build()
    }

    #[cfg(any(test, target_os = "android"))]
    pub(crate) fn context_api(&self) -> ContextApi {
        let (major, minor) = self.gles_version;
        ContextApi::Gles(Some(Version::new(major, minor)))
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
