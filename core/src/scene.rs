//! Scene command interpretation.
//!
//! A scene is a stream of [`Command`]s, as decoded from a scene file by
//! an external parser. The [`Engine`] executes the commands in order,
//! maintaining the transform stack, the camera, the lighting environment,
//! and the mesh tables, and draws each primitive into a [`Surface`] as
//! soon as it is complete.
//!
//! [`Surface`]: crate::render::target::Surface

use crate::geom::IndexError;

pub use cmd::{CmdVertex, Command, FillMode};
pub use engine::Engine;

pub mod cmd;
pub mod engine;

/// Errors that abort the rendering of a scene.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transform in effect at a camera command has no inverse.
    #[error("camera transform is singular")]
    SingularCamera,
    /// A face referred to a nonexistent vertex or normal.
    #[error(transparent)]
    Index(#[from] IndexError),
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
