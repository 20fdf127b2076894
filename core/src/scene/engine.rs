//! The command interpreter.

use alloc::vec::Vec;
use core::mem;

use log::{debug, info, trace, warn};

use crate::geom::{Edge, MeshVertex, Tables, Vertex, plane_normal, vertex};
use crate::math::{color::Color, mat::Mat4x4, vec::Vec3, vec::Vec4};
use crate::render::{
    cam::{self, Camera},
    clip,
    ctx::{Config, LineMode},
    light::{Fog, Illumination, Light, Material},
    raster::{self, Frag},
    shader::{Attrib, FragmentShader, Lighting, Shader},
    stats::Stats,
    target::{Framebuf, Surface, ZBuffer},
    xform::Transforms,
};
use crate::util::rect::Rect;

use super::{Command, Error, FillMode, Result};

/// Executes scene commands, drawing into a surface of type `S`.
///
/// All scene state persists across calls to [`run`][Self::run] and
/// [`exec`][Self::exec]: the transform stack, the camera, the lights and
/// other lighting settings, and the mesh tables. Each primitive is drawn
/// as soon as the command completing it is executed, except for mesh
/// faces, which are drawn when the enclosing object file ends.
///
/// # Examples
/// ```
/// use simp_core::math::{pt3, vec3};
/// use simp_core::render::ctx::Config;
/// use simp_core::scene::{Command::*, Engine};
/// use simp_core::util::buf::Buf2;
///
/// let surf = Buf2::<u32>::new_default(32, 32);
/// let mut eng = Engine::new(surf, Config::default());
/// eng.run([
///     Translate(vec3(0.0, 0.0, 5.0)),
///     Polygon(vec![
///         pt3(-1.0, -1.0, 0.0).into(),
///         pt3(0.0, 1.0, 0.0).into(),
///         pt3(1.0, -1.0, 0.0).into(),
///     ]),
/// ])
/// .unwrap();
/// assert_eq!(eng.stats().prims.drawn, 1);
/// ```
pub struct Engine<S> {
    surface: S,
    config: Config,
    viewport: Rect,
    zbuf: ZBuffer,
    xforms: Transforms,
    camera: Camera,
    illum: Illumination,
    fog: Option<Fog>,
    lighting: Lighting,
    fill: FillMode,
    tables: Tables,
    /// Tables of the enclosing object files.
    saved: Vec<Tables>,
    stats: Stats,
}

/// A polygon vertex in camera space.
#[derive(Clone, Debug)]
struct PolyVertex {
    pos: Vec3,
    color: Color,
    normal: Option<Vec3>,
}

/// The state needed to draw primitives, borrowed from an engine.
struct Pass<'a, S> {
    fb: Framebuf<'a, S>,
    shader: Shader<'a>,
    camera: &'a Camera,
    viewport: Rect,
    config: &'a Config,
    fill: FillMode,
    stats: &'a mut Stats,
}

impl<S: Surface> Engine<S> {
    /// Creates an engine drawing into `surface`, with the default scene
    /// state.
    pub fn new(surface: S, config: Config) -> Self {
        let viewport = config.viewport_in(surface.width(), surface.height());
        let camera = Camera::default();
        let zbuf = ZBuffer::new(viewport, camera.near, camera.far);
        Self {
            surface,
            config,
            viewport,
            zbuf,
            xforms: Transforms::new(),
            camera,
            illum: Illumination::default(),
            fog: None,
            lighting: Lighting::default(),
            fill: FillMode::default(),
            tables: Tables::new(),
            saved: Vec::new(),
            stats: Stats::new(),
        }
    }

    /// Executes `cmds` in order as one frame.
    ///
    /// Once all commands are executed, draws any pending top-level mesh
    /// faces and presents the frame by calling
    /// [`Surface::update_screen`]. The stats of the frame are then
    /// available from [`stats`][Self::stats].
    ///
    /// # Errors
    /// If a command fails. The commands preceding it have been executed,
    /// and their output is left in the surface.
    pub fn run<I>(&mut self, cmds: I) -> Result<()>
    where
        I: IntoIterator<Item = Command>,
    {
        self.stats = Stats::start();
        for cmd in cmds {
            self.exec(&cmd)?;
        }
        if !self.saved.is_empty() {
            warn!("{} object file(s) left open", self.saved.len());
        }
        self.flush_faces();
        self.surface.update_screen();

        self.stats.finish();
        info!("frame done\n{}", self.stats);
        Ok(())
    }

    /// Executes a single command.
    ///
    /// # Errors
    /// [`Error::SingularCamera`] if `cmd` places a camera with a transform
    /// that cannot be inverted, and [`Error::Index`] if `cmd` is a face
    /// referring to a nonexistent vertex or normal.
    pub fn exec(&mut self, cmd: &Command) -> Result<()> {
        self.stats.cmds += 1;
        match cmd {
            Command::PushScope => self.xforms.push(),
            Command::PopScope => {
                self.xforms.pop();
            }
            Command::Scale(s) => self.xforms.scale(*s),
            Command::Translate(t) => self.xforms.translate(*t),
            Command::Rotate { axis, degs } => self.xforms.rotate(*axis, *degs),

            Command::Line([a, b]) => {
                let m = self.model_to_camera();
                let ends = [a, b].map(|v| (to_camera(&m, &v.pos), v.color()));
                self.pass().line(ends);
            }
            Command::Polygon(vs) => {
                let m = self.model_to_camera();
                let vs = vs
                    .iter()
                    .map(|v| PolyVertex {
                        pos: to_camera(&m, &v.pos),
                        color: v.color(),
                        normal: None,
                    })
                    .collect();
                self.pass().polygon(vs, None);
            }

            Command::Vertex { pos, color } => {
                let p = to_camera(&self.model_to_camera(), pos);
                let color = color.unwrap_or(Color::WHITE);
                self.tables.verts.push(MeshVertex::new(p.to_pt(), color));
            }
            Command::VertexNormal(n) => {
                let n = self.model_to_camera().apply_linear(n).normalize();
                self.tables.normals.push(n);
            }
            Command::Face(refs) => {
                if !self.tables.add_face(refs)? {
                    warn!("skipping face with {} vertices", refs.len());
                }
            }

            Command::Include(name) => {
                debug!("include {name:?}: contents already inlined");
            }
            Command::ObjBegin(name) => {
                debug!("begin object file {name:?}");
                self.saved.push(mem::take(&mut self.tables));
            }
            Command::ObjEnd => {
                self.flush_faces();
                match self.saved.pop() {
                    Some(outer) => self.tables = outer,
                    None => warn!("end of object file that was never begun"),
                }
            }

            Command::Camera { xs, ys, near, far } => {
                let ctm = self.xforms.ctm();
                let cam =
                    Camera::new(xs.clone(), ys.clone(), *near, *far, ctm)
                        .ok_or(Error::SingularCamera)?;
                debug!("camera {xs:?} × {ys:?}, depth {near}..={far}");
                self.zbuf.reset(*near, *far);
                self.camera = cam;
            }
            Command::Ambient(c) => {
                self.illum.ambient = Color::from_normalized(*c);
                debug!("ambient {:?}", self.illum.ambient);
            }
            Command::Depth { near, far, color } => {
                let color = Color::from_normalized(*color);
                self.fog = Some(Fog { near: *near, far: *far, color });
                debug!("fog {color:?}, depth {near}..{far}");
            }
            Command::Surface { ks, exp } => {
                self.illum.material = Material { ks: *ks, exp: *exp };
            }
            Command::Light { color, a, b } => {
                let light = Light {
                    pos: cam::origin(&self.camera, self.xforms.ctm()),
                    color: Color::from_normalized(*color),
                    a: *a,
                    b: *b,
                };
                debug!("light {light:?}");
                self.illum.lights.push(light);
            }
            Command::Lighting(l) => {
                debug!("lighting {l:?}");
                self.lighting = *l;
            }
            Command::Fill(f) => {
                debug!("fill {f:?}");
                self.fill = *f;
            }
        }
        Ok(())
    }

    /// Returns the surface drawn into.
    pub fn surface(&self) -> &S {
        &self.surface
    }
    /// Returns the surface drawn into.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
    /// Consumes `self`, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Returns the stats of the most recent [`run`][Self::run], or of the
    /// commands executed since.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
    pub fn transforms(&self) -> &Transforms {
        &self.xforms
    }
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn zbuffer(&self) -> &ZBuffer {
        &self.zbuf
    }
    pub fn illumination(&self) -> &Illumination {
        &self.illum
    }

    fn model_to_camera(&self) -> Mat4x4 {
        self.camera.model_to_camera(self.xforms.ctm())
    }

    /// Draws the faces of the current mesh and removes them from its
    /// tables. The vertices and normals are kept.
    fn flush_faces(&mut self) {
        if self.tables.faces.is_empty() {
            return;
        }
        self.tables.accumulate_normals();
        let faces = mem::take(&mut self.tables.faces);
        let verts = &self.tables.verts;
        let polys: Vec<_> = faces
            .iter()
            .map(|f| {
                let vs = f.verts.iter().map(|&i| PolyVertex {
                    pos: verts[i].pos.xyz(),
                    color: verts[i].color,
                    normal: verts[i].normal(),
                });
                (vs.collect(), f.normal)
            })
            .collect();

        debug!("drawing {} mesh faces", polys.len());
        let mut pass = self.pass();
        for (vs, normal) in polys {
            pass.polygon(vs, Some(normal));
        }
    }

    fn pass(&mut self) -> Pass<'_, S> {
        let Self {
            surface,
            config,
            viewport,
            zbuf,
            camera,
            illum,
            fog,
            lighting,
            fill,
            stats,
            ..
        } = self;
        Pass {
            fb: Framebuf { color: surface, depth: zbuf },
            shader: Shader { lighting: *lighting, illum, fog: *fog },
            camera,
            viewport: *viewport,
            config,
            fill: *fill,
            stats,
        }
    }
}

impl<S: Surface> Pass<'_, S> {
    /// Draws a convex polygon given in camera space.
    ///
    /// If `normal` is `None`, the face normal is computed from the first
    /// three vertices.
    fn polygon(&mut self, verts: Vec<PolyVertex>, normal: Option<Vec3>) {
        self.stats.prims.submitted += 1;
        let pts: Vec<Vec3> = verts.iter().map(|v| v.pos).collect();
        let &[a, b, c, ..] = pts.as_slice() else {
            warn!("skipping polygon with {} vertices", pts.len());
            self.stats.prims.degenerate += 1;
            return;
        };
        if !clip::in_depth_range(&pts, self.camera.near, self.camera.far) {
            trace!("rejected polygon outside depth range: {pts:?}");
            self.stats.prims.out_of_depth += 1;
            return;
        }
        if self.config.face_cull && clip::is_backface(&pts) {
            trace!("culled back-facing polygon: {pts:?}");
            self.stats.prims.culled += 1;
            return;
        }
        let normal = normal.unwrap_or_else(|| plane_normal(a, b, c));

        let mut attribs: Vec<_> = verts
            .into_iter()
            .map(|v| Attrib {
                color: v.color,
                normal: v.normal,
                pos: Some(v.pos),
            })
            .collect();
        self.shader.shade_polygon(&mut attribs, normal);

        let vp = self.viewport;
        let mut screen: Vec<_> = pts
            .iter()
            .zip(attribs)
            .map(|(p, a)| vertex(self.camera.to_screen(&vp, p), a))
            .collect();
        raster::sort_polar(&mut screen);

        self.stats.prims.drawn += 1;
        match self.fill {
            FillMode::Filled => {
                for tri in raster::fan(&screen) {
                    raster::tri_fill(tri, &vp, |f| self.write(f));
                }
            }
            FillMode::Wireframe => {
                for e in raster::edges(&screen) {
                    self.edge(e);
                }
            }
        }
    }

    /// Draws a line segment given in camera space.
    fn line(&mut self, [(p0, c0), (p1, c1)]: [(Vec3, Color); 2]) {
        self.stats.prims.submitted += 1;
        if !clip::in_depth_range([&p0, &p1], self.camera.near, self.camera.far)
        {
            trace!("rejected line outside depth range: {p0:?}, {p1:?}");
            self.stats.prims.out_of_depth += 1;
            return;
        }
        let mut attribs = [Attrib::new(c0, p0), Attrib::new(c1, p1)];
        self.shader.shade_line(&mut attribs);

        let vp = self.viewport;
        let [a0, a1] = attribs;
        let v0 = vertex(self.camera.to_screen(&vp, &p0), a0);
        let v1 = vertex(self.camera.to_screen(&vp, &p1), a1);
        self.stats.prims.drawn += 1;
        self.edge(Edge([v0, v1]));
    }

    /// Rasterizes a screen-space edge with the configured line algorithm.
    fn edge(&mut self, e: Edge<Vertex<Vec3, Attrib>>) {
        let vp = self.viewport;
        let mode = self.config.line_mode;
        match mode {
            LineMode::Dda => raster::line(e, &vp, |f| self.write(f)),
            LineMode::Bresenham => {
                raster::line_bresenham(e, &vp, |f| self.write(f));
            }
            LineMode::Smooth => {
                raster::line_smooth(e, &vp, |f, cov| self.blend(f, cov));
            }
        }
    }

    fn write(&mut self, frag: Frag<Attrib>) {
        let c = self.shader.shade_fragment(&frag);
        let written = self.fb.write(&frag.pos, c);
        self.count_frag(written);
    }

    fn blend(&mut self, frag: Frag<Attrib>, coverage: f32) {
        let c = self.shader.shade_fragment(&frag);
        let written = self.fb.blend(&frag.pos, c, coverage);
        self.count_frag(written);
    }

    fn count_frag(&mut self, written: bool) {
        let frags = &mut self.stats.frags;
        frags.rasterized += 1;
        if written {
            frags.written += 1;
        } else {
            frags.occluded += 1;
        }
    }
}

/// Transforms the homogeneous point `p` by `m` and divides the result
/// by w, unless w is zero.
fn to_camera(m: &Mat4x4, p: &Vec4) -> Vec3 {
    let q = m.apply(p);
    if q.w() == 0.0 { q.xyz() } else { q.xyz() / q.w() }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use crate::assert_approx_eq;
    use crate::geom::FaceRef;
    use crate::math::color::gray;
    use crate::math::mat::Axis;
    use crate::math::vec::{pt3, vec3, vec4};
    use crate::scene::CmdVertex;
    use crate::util::buf::Buf2;

    use super::*;

    fn engine(w: usize, h: usize) -> Engine<Buf2<u32>> {
        Engine::new(Buf2::new_default(w, h), Config::default())
    }

    #[test]
    fn homogeneous_points_are_divided_by_w() {
        let m = Mat4x4::IDENTITY;
        let p = to_camera(&m, &vec4(2.0, 4.0, 6.0, 2.0));
        assert_eq!(p, vec3(1.0, 2.0, 3.0));
        let p = to_camera(&m, &pt3(2.0, 4.0, 6.0));
        assert_eq!(p, vec3(2.0, 4.0, 6.0));
    }

    #[test]
    fn scope_underflow_is_noop() {
        let mut eng = engine(4, 4);
        eng.exec(&Command::Translate(vec3(1.0, 2.0, 3.0))).unwrap();
        eng.exec(&Command::PopScope).unwrap();
        eng.exec(&Command::PopScope).unwrap();
        assert_eq!(eng.transforms().depth(), 0);
        let p = eng.transforms().ctm().apply(&pt3(0.0, 0.0, 0.0));
        assert_eq!(p, pt3(1.0, 2.0, 3.0));
    }

    #[test]
    fn singular_camera_is_an_error() {
        let mut eng = engine(4, 4);
        eng.exec(&Command::Scale(vec3(0.0, 1.0, 1.0))).unwrap();
        let res = eng.exec(&Command::Camera {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 1.0,
            far: 10.0,
        });
        assert!(matches!(res, Err(Error::SingularCamera)));
        assert_eq!(eng.camera(), &Camera::default());
    }

    #[test]
    fn camera_resets_zbuffer() {
        let mut eng = engine(4, 4);
        eng.exec(&Command::Camera {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 2.0,
            far: 50.0,
        })
        .unwrap();
        assert_eq!(eng.zbuffer().get(0, 0), Some(51.0));
        assert_eq!(eng.camera().near, 2.0);
    }

    #[test]
    fn light_is_placed_at_transformed_origin() {
        let mut eng = engine(4, 4);
        eng.run([
            Command::Translate(vec3(1.0, 2.0, 3.0)),
            Command::Light { color: vec3(1.0, 1.0, 1.0), a: 1.0, b: 0.0 },
        ])
        .unwrap();
        let lights = &eng.illumination().lights;
        assert_eq!(lights.len(), 1);
        assert_approx_eq!(lights[0].pos, vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn settings_persist_until_overridden() {
        let mut eng = engine(4, 4);
        eng.run([
            Command::Ambient(vec3(0.5, 0.5, 0.5)),
            Command::Surface { ks: 0.1, exp: 2.0 },
            Command::Lighting(Lighting::Gouraud),
            Command::Fill(FillMode::Wireframe),
        ])
        .unwrap();
        eng.run([]).unwrap();
        assert_eq!(eng.illumination().ambient, gray(128));
        assert_eq!(eng.illumination().material.exp, 2.0);
        assert_eq!(eng.lighting, Lighting::Gouraud);
        assert_eq!(eng.fill, FillMode::Wireframe);
    }

    #[test]
    fn vertices_are_transformed_at_declaration() {
        let mut eng = engine(4, 4);
        eng.run([
            Command::Translate(vec3(0.0, 0.0, 5.0)),
            Command::Vertex { pos: pt3(1.0, 0.0, 0.0), color: None },
            Command::Rotate { axis: Axis::Z, degs: 90.0 },
            Command::VertexNormal(vec3(2.0, 0.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(eng.tables.verts[0].pos, pt3(1.0, 0.0, 5.0));
        assert_eq!(eng.tables.verts[0].color, Color::WHITE);
        assert_approx_eq!(eng.tables.normals[0], vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn object_files_restore_outer_tables() {
        let mut eng = engine(4, 4);
        let v = |x| Command::Vertex { pos: pt3(x, 0.0, 5.0), color: None };
        eng.run([
            v(1.0),
            Command::ObjBegin(String::from("inner.obj")),
            v(2.0),
            v(3.0),
        ])
        .unwrap();
        assert_eq!(eng.tables.verts.len(), 2);
        assert_eq!(eng.saved.len(), 1);

        eng.run([Command::ObjEnd]).unwrap();
        assert_eq!(eng.tables.verts.len(), 1);
        assert!(eng.saved.is_empty());
    }

    #[test]
    fn out_of_bounds_face_is_an_error() {
        let mut eng = engine(4, 4);
        let res = eng.run([
            Command::Vertex { pos: pt3(0.0, 0.0, 5.0), color: None },
            Command::Face(vec![FaceRef::vertex(1), FaceRef::vertex(2)]),
        ]);
        assert!(matches!(res, Err(Error::Index(_))));
    }

    #[test]
    fn degenerate_primitives_are_skipped() {
        let mut eng = engine(8, 8);
        let p = |x, y| CmdVertex::new(pt3(x, y, 5.0));
        eng.run([
            Command::Polygon(vec![p(0.0, 0.0), p(1.0, 1.0)]),
            Command::Polygon(vec![p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0)]),
        ])
        .unwrap();
        let stats = eng.stats();
        assert_eq!(stats.prims.submitted, 2);
        assert_eq!(stats.prims.degenerate, 1);
        // Collinear vertices pass culling but cover no pixels
        assert_eq!(stats.prims.drawn, 1);
        assert_eq!(stats.frags.rasterized, 0);
    }

    #[test]
    fn run_counts_commands_of_latest_run() {
        let mut eng = engine(4, 4);
        eng.run([Command::PushScope, Command::PopScope]).unwrap();
        assert_eq!(eng.stats().cmds, 2);
        eng.run([Command::PushScope]).unwrap();
        assert_eq!(eng.stats().cmds, 1);
    }

    #[test]
    fn stats_record_where_primitives_went() {
        let mut eng = engine(20, 20);
        let square = |z: f32| {
            [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)]
                .map(|(x, y)| CmdVertex::new(pt3(x, y, z)))
                .to_vec()
        };
        let mut back = square(5.0);
        back.reverse();
        let behind_near = Command::Line([
            CmdVertex::new(pt3(0.0, 0.0, 0.5)),
            CmdVertex::new(pt3(0.0, 0.0, 5.0)),
        ]);
        eng.run([
            Command::Polygon(square(5.0)),
            // Hidden behind the first one
            Command::Polygon(square(10.0)),
            Command::Polygon(back),
            behind_near,
        ])
        .unwrap();

        let Stats { prims, frags, .. } = eng.stats();
        assert_eq!(prims.submitted, 4);
        assert_eq!(prims.drawn, 2);
        assert_eq!(prims.culled, 1);
        assert_eq!(prims.out_of_depth, 1);
        assert_eq!(prims.degenerate, 0);
        assert_eq!(prims.drawn + prims.discarded(), prims.submitted);

        assert!(frags.written > 0);
        assert!(frags.occluded > 0);
        assert_eq!(frags.written + frags.occluded, frags.rasterized);
    }
}
