//! # Rendering
//!
//! The backend seam used by scene assembly, an in-memory backend, and a CPU
//! preview renderer for scenes built against it.
//!
//! ## Organization
//!
//! - **Backend**: [`RenderBackend`] trait, opaque handles and resource descriptors
//! - **Headless**: slot-map backend that records everything it is given
//! - **Camera**: look-at perspective camera and primary rays
//! - **Preview**: ray caster producing an [`ImageData`](crate::assets::ImageData)

pub mod backend;
pub mod bounds;
pub mod camera;
pub mod headless;
pub mod preview;

pub use backend::{
    BackendResult, CustomShading, GeometryData, GeometryHandle, RenderBackend, RenderError, ShadingDescriptor,
    ShadingHandle, SurfaceHandle, TextureHandle, VisualHandle,
};
pub use bounds::Aabb;
pub use camera::{Camera, Ray};
pub use headless::{HeadlessBackend, Surface, Visual};
pub use preview::render_preview;
