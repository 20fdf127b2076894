//! Turning 3D geometry into raster images.
//!
//! This module constitutes the rendering pipeline of `simp`. Every
//! primitive passes through the same stages, in order:
//!
//! 1. [Transforming][xform] into camera space with the current transform
//!    and the inverse of the [camera][cam] transform.
//! 2. [Rejecting][clip] primitives outside the depth range, and culling
//!    polygons that face away from the camera.
//! 3. [Shading][shader] the vertices with one of the lighting methods of
//!    the current [illumination][light].
//! 4. Projecting onto the screen and [rasterizing][raster] into fragments.
//! 5. [Compositing][target] each shaded fragment into the render target
//!    with a depth test.
//!
//! The [scene engine](crate::scene::Engine) drives the stages, one
//! primitive at a time.

pub use cam::Camera;
pub use ctx::{Config, LineMode};
pub use light::{Fog, Illumination, Light, Material};
pub use shader::{Attrib, FragmentShader, Lighting, Shader};
pub use stats::{Frags, Prims, Stats};
pub use target::{Framebuf, Surface, ZBuffer};
pub use xform::Transforms;

pub mod cam;
pub mod clip;
pub mod ctx;
pub mod light;
pub mod raster;
pub mod shader;
pub mod stats;
pub mod target;
pub mod xform;
