//! OpenGL ES drawing surfaces.

mod config;
#[cfg(target_os = "android")]
pub(crate) mod egl;
mod renderer;
mod view;

pub use config::SurfaceConfig;
pub use renderer::{OpenGLRenderer, RenderRequest, SurfaceState, Viewport};
pub use view::OpenGLView;
