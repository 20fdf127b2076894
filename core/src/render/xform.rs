//! The current transform and its scope stack.

use alloc::vec::Vec;

use crate::math::mat::{Axis, Mat4x4, rotate, scale, translate};
use crate::math::vec::Vec3;

/// The current transformation matrix (CTM) and a stack of saved CTMs.
///
/// Every transform is applied by right-multiplication, `ctm = ctm * m`,
/// so that transforms issued later in a scene are applied to geometry
/// first. Opening a scope saves the CTM, and closing it restores the saved
/// matrix.
#[derive(Clone, Debug, Default)]
pub struct Transforms {
    ctm: Mat4x4,
    stack: Vec<Mat4x4>,
}

impl Transforms {
    /// Returns a new identity transform with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current transformation matrix.
    #[inline]
    pub fn ctm(&self) -> &Mat4x4 {
        &self.ctm
    }

    /// Returns the number of open scopes.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Saves the current transform.
    pub fn push(&mut self) {
        self.stack.push(self.ctm);
    }

    /// Restores the most recently saved transform.
    ///
    /// Returns `false` and leaves `self` unchanged if there is no saved
    /// transform to restore.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some(m) => {
                self.ctm = m;
                true
            }
            None => {
                log::debug!("scope close with no open scope, ignored");
                false
            }
        }
    }

    /// Multiplies the current transform from the right by `m`.
    pub fn apply(&mut self, m: &Mat4x4) {
        self.ctm = self.ctm.compose(m);
    }

    pub fn scale(&mut self, s: Vec3) {
        self.apply(&scale(s));
    }

    pub fn translate(&mut self, t: Vec3) {
        self.apply(&translate(t));
    }

    /// Rotates by `degs` degrees about `axis`. See [`rotate`] for the
    /// sign convention.
    pub fn rotate(&mut self, axis: Axis, degs: f32) {
        self.apply(&rotate(axis, degs));
    }
}
