//! Software rendering of the habitat

pub mod pixel_renderer;
pub mod scene;

pub use pixel_renderer::{FrameCamera, PixelRenderer};
pub use scene::render_habitat;
