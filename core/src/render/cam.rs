//! Cameras and camera transforms.

use core::ops::Range;

use crate::math::mat::{Mat4x4, perspective, viewport};
use crate::math::vec::{Vec3, Vec4, pt3};
use crate::util::rect::Rect;

/// A camera: a view-plane window and a depth range, placed in the world
/// by the transform in effect when the camera was declared.
///
/// The camera looks down the positive z axis of its own coordinate space.
/// A point `p` in camera space is visible if `near <= p.z <= far` and its
/// projection onto the plane z = 1 falls inside `xs` × `ys`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Horizontal bounds of the view-plane window.
    pub xs: Range<f32>,
    /// Vertical bounds of the view-plane window.
    pub ys: Range<f32>,
    /// Distance of the near plane.
    pub near: f32,
    /// Distance of the far plane.
    pub far: f32,
    /// World-to-camera transform.
    inverse: Mat4x4,
}

impl Camera {
    /// Returns a camera placed by `ctm`.
    ///
    /// Returns `None` if `ctm` is singular and thus has no inverse.
    pub fn new(
        xs: Range<f32>,
        ys: Range<f32>,
        near: f32,
        far: f32,
        ctm: &Mat4x4,
    ) -> Option<Self> {
        let inverse = ctm.inverse()?;
        Some(Self { xs, ys, near, far, inverse })
    }

    /// Returns the world-to-camera transform.
    #[inline]
    pub fn world_to_camera(&self) -> &Mat4x4 {
        &self.inverse
    }

    /// Returns the transform from model space to camera space, given the
    /// model-to-world transform `ctm`.
    pub fn model_to_camera(&self, ctm: &Mat4x4) -> Mat4x4 {
        self.inverse.compose(ctm)
    }

    /// Projects a camera-space point to the screen.
    ///
    /// Returns the pixel coordinates of the point in x and y, and its
    /// camera-space depth in z.
    pub fn to_screen(&self, rect: &Rect, p: &Vec3) -> Vec3 {
        let clip = perspective().apply(&p.to_pt()).project();
        viewport(self.xs.clone(), self.ys.clone(), rect)
            .apply(&clip)
            .xyz()
    }

    /// Returns the camera-space point that projects to the screen point
    /// `s`, using `s.z` as the camera-space depth.
    ///
    /// Returns `None` if the window or the rectangle is degenerate.
    pub fn from_screen(&self, rect: &Rect, s: &Vec3) -> Option<Vec4> {
        let vp = viewport(self.xs.clone(), self.ys.clone(), rect);
        let plane = vp.inverse()?.apply(&s.to_pt());
        let z = s.z();
        Some(pt3(plane.x() * z, plane.y() * z, z))
    }
}

impl Default for Camera {
    /// Returns a camera at the world origin with the window -1..1 on both
    /// axes and the depth range 1..1000.
    fn default() -> Self {
        Self {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 1.0,
            far: 1000.0,
            inverse: Mat4x4::IDENTITY,
        }
    }
}

/// Returns the camera-space position of the world origin transformed by
/// `ctm`, as seen by `cam`.
pub fn origin(cam: &Camera, ctm: &Mat4x4) -> Vec3 {
    cam.model_to_camera(ctm).apply(&pt3(0.0, 0.0, 0.0)).xyz()
}
