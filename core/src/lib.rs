//! Core functionality of the `simp` project.
//!
//! `simp` is a software 3D renderer driven by a stream of scene commands.
//! The commands build up a transform stack, a camera, lights, and meshes;
//! each primitive is transformed into camera space, culled, shaded with
//! flat, Gouraud, or Phong lighting, rasterized, and composited into a
//! pixel surface with a depth buffer.
//!
//! Includes a small math library with vectors, 4×4 matrices, and colors;
//! basic geometry primitives and an arena-based mesh; the rendering
//! pipeline; and the scene [`Engine`][scene::Engine] that interprets the
//! commands.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring I/O or timekeeping, and uses the
//!   floating-point functions of `std`. Enabled by default.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! One of `std`, `libm`, or `mm` must be enabled.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

#[cfg(not(feature = "fp"))]
compile_error!("one of the features `std`, `libm`, or `mm` is required");

pub mod geom;
pub mod math;
pub mod render;
pub mod scene;
pub mod util;

pub mod prelude {
    pub use crate::math::{
        color::{Color, gray, rgb},
        mat::{Axis, Mat4x4},
        vec::{Vec3, Vec4, pt3, vec3, vec4},
    };

    pub use crate::geom::{FaceRef, Vertex, vertex};

    pub use crate::render::{
        ctx::{Config, LineMode},
        shader::Lighting,
        target::Surface,
    };

    pub use crate::scene::{CmdVertex, Command, Engine, FillMode};

    pub use crate::util::{buf::Buf2, rect::Rect};
}
