use simp_core::assert_approx_eq;
use simp_core::geom::FaceRef;
use simp_core::math::{Axis, Color, gray, pt3, rgb, vec3};
use simp_core::render::ctx::{Config, LineMode};
use simp_core::render::shader::Lighting;
use simp_core::render::target::Surface as _;
use simp_core::scene::{CmdVertex, Command, Command::*, Engine, Error, FillMode};
use simp_core::util::{buf::Buf2, rect::Rect};

const W: usize = 20;

fn engine() -> Engine<Buf2<u32>> {
    Engine::new(Buf2::new_default(W, W), Config::default())
}

fn pixel(eng: &Engine<Buf2<u32>>, x: usize, y: usize) -> Color {
    Color::from_argb_u32(eng.surface().get_pixel(x, y))
}

fn blank(eng: &Engine<Buf2<u32>>) -> bool {
    eng.surface().data().iter().all(|&p| p == 0)
}

/// A triangle facing the camera, centered on the view axis at depth `z`.
///
/// Covers the middle 80% of the view at any depth.
fn tri(z: f32, c: Color) -> Command {
    let s = 0.8 * z;
    Polygon(vec![
        CmdVertex::colored(pt3(-s, -s, z), c),
        CmdVertex::colored(pt3(0.0, s, z), c),
        CmdVertex::colored(pt3(s, -s, z), c),
    ])
}

/// A square facing the camera at depth 5, spanning pixels 8..=12.
fn square(c: Color) -> Command {
    let v = |x, y| CmdVertex::colored(pt3(x, y, 5.0), c);
    Polygon(vec![v(-1.0, -1.0), v(-1.0, 1.0), v(1.0, 1.0), v(1.0, -1.0)])
}

fn assert_near(c: Color, expected: [u8; 3]) {
    for (a, b) in c.0.into_iter().zip(expected) {
        assert!(a.abs_diff(b) <= 1, "{c:?} not near {expected:?}");
    }
}

#[test]
fn ambient_filters_unlit_color() {
    let mut eng = engine();
    eng.run([
        Camera {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 1.0,
            far: 100.0,
        },
        Ambient(vec3(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0)),
        tri(50.0, Color::WHITE),
    ])
    .unwrap();

    assert_eq!(pixel(&eng, 10, 10), gray(128));
    assert_eq!(eng.stats().prims.drawn, 1);
}

#[test]
fn white_ambient_is_identity() {
    let c = rgb(12, 200, 99);
    for lighting in [Lighting::Flat, Lighting::Gouraud, Lighting::Phong] {
        let mut eng = engine();
        eng.run([Command::Lighting(lighting), tri(5.0, c)]).unwrap();
        assert_eq!(pixel(&eng, 10, 10), c, "{lighting:?}");
    }
}

#[test]
fn nearest_wins_regardless_of_order() {
    let near = tri(5.0, rgb(255, 0, 0));
    let far = tri(10.0, rgb(0, 0, 255));

    for cmds in [[near.clone(), far.clone()], [far, near]] {
        let mut eng = engine();
        eng.run(cmds).unwrap();
        assert_eq!(pixel(&eng, 10, 10), rgb(255, 0, 0));
    }
}

#[test]
fn back_faces_are_not_drawn() {
    let c = Color::WHITE;
    let back = Polygon(vec![
        CmdVertex::colored(pt3(-4.0, -4.0, 5.0), c),
        CmdVertex::colored(pt3(4.0, -4.0, 5.0), c),
        CmdVertex::colored(pt3(0.0, 4.0, 5.0), c),
    ]);

    let mut eng = engine();
    eng.run([back.clone()]).unwrap();
    assert!(blank(&eng));
    assert_eq!(eng.stats().prims.submitted, 1);
    assert_eq!(eng.stats().prims.culled, 1);
    assert_eq!(eng.stats().frags.rasterized, 0);

    let cfg = Config { face_cull: false, ..Config::default() };
    let mut eng = Engine::new(Buf2::new_default(W, W), cfg);
    eng.run([back]).unwrap();
    assert_eq!(pixel(&eng, 10, 10), c);
}

#[test]
fn primitives_crossing_depth_range_are_rejected() {
    let mut eng = engine();
    eng.run([
        Camera {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 1.0,
            far: 20.0,
        },
        tri(30.0, Color::WHITE),
        Line([
            CmdVertex::new(pt3(0.0, 0.0, 0.5)),
            CmdVertex::new(pt3(0.0, 0.0, 10.0)),
        ]),
    ])
    .unwrap();
    assert!(blank(&eng));
    assert_eq!(eng.stats().prims.submitted, 2);
    assert_eq!(eng.stats().prims.out_of_depth, 2);
    assert_eq!(eng.stats().prims.drawn, 0);
}

#[test]
fn fog_halfway_blends_halfway() {
    let mut eng = engine();
    eng.run([
        Depth { near: 10.0, far: 20.0, color: vec3(0.0, 0.0, 0.0) },
        tri(15.0, Color::WHITE),
    ])
    .unwrap();
    assert_near(pixel(&eng, 10, 10), [128, 128, 128]);
}

#[test]
fn flat_polygon_gets_average_of_corners() {
    let v = |x, y, c| CmdVertex::colored(pt3(x, y, 5.0), c);
    let mut eng = engine();
    eng.run([Polygon(vec![
        v(-1.0, -1.0, rgb(255, 0, 0)),
        v(-1.0, 1.0, rgb(0, 255, 0)),
        v(1.0, 1.0, rgb(0, 0, 255)),
        v(1.0, -1.0, Color::WHITE),
    ])])
    .unwrap();

    let center = pixel(&eng, 10, 10);
    assert_near(center, [128, 128, 128]);
    assert_eq!(pixel(&eng, 9, 11), center);
}

#[test]
fn polygon_vertices_may_come_in_any_order() {
    let v = |x, y| CmdVertex::new(pt3(x, y, 5.0));
    let mut eng = engine();
    // A bow tie if drawn in the given order
    eng.run([Polygon(vec![
        v(-1.0, -1.0),
        v(-1.0, 1.0),
        v(1.0, -1.0),
        v(1.0, 1.0),
    ])])
    .unwrap();
    for (x, y) in [(10, 9), (10, 11), (9, 10), (11, 10)] {
        assert_eq!(pixel(&eng, x, y), Color::WHITE, "at {x}, {y}");
    }
}

#[test]
fn wireframe_draws_only_edges() {
    for line_mode in [LineMode::Dda, LineMode::Bresenham] {
        let cfg = Config { line_mode, ..Config::default() };
        let mut eng = Engine::new(Buf2::new_default(W, W), cfg);
        eng.run([Fill(FillMode::Wireframe), square(Color::WHITE)])
            .unwrap();

        assert_eq!(pixel(&eng, 10, 10), Color::BLACK);
        for (x, y) in [(8, 10), (12, 10), (10, 8), (10, 12)] {
            assert_eq!(pixel(&eng, x, y), Color::WHITE, "at {x}, {y}");
        }
    }
}

#[test]
fn smooth_lines_blend_with_surface() {
    let cfg = Config { line_mode: LineMode::Smooth, ..Config::default() };
    let mut eng = Engine::new(Buf2::new_default(W, W), cfg);
    eng.run([Line([
        CmdVertex::new(pt3(-1.0, 0.0, 5.0)),
        CmdVertex::new(pt3(1.0, 0.0, 5.0)),
    ])])
    .unwrap();

    assert_eq!(pixel(&eng, 10, 10), Color::WHITE);
    assert_eq!(pixel(&eng, 10, 12), Color::BLACK);
    // Smooth lines do not occlude anything
    assert_eq!(eng.zbuffer().get(10, 10), Some(1001.0));
}

#[test]
fn lines_receive_only_ambient_light() {
    let mut eng = engine();
    eng.run([
        Ambient(vec3(0.5, 0.5, 0.5)),
        Light { color: vec3(1.0, 1.0, 1.0), a: 1.0, b: 0.0 },
        Line([
            CmdVertex::new(pt3(-1.0, 0.0, 5.0)),
            CmdVertex::new(pt3(1.0, 0.0, 5.0)),
        ]),
    ])
    .unwrap();
    assert_eq!(pixel(&eng, 10, 10), gray(128));
}

#[test]
fn phong_lights_each_pixel() {
    let mut eng = engine();
    eng.run([
        Ambient(vec3(0.0, 0.0, 0.0)),
        Surface { ks: 0.0, exp: 1.0 },
        Light { color: vec3(1.0, 1.0, 1.0), a: 1.0, b: 0.0 },
        Command::Lighting(Lighting::Phong),
        square(Color::WHITE),
    ])
    .unwrap();

    let center = pixel(&eng, 10, 10);
    let corner = pixel(&eng, 8, 8);
    assert!(center.r() >= 250, "{center:?}");
    assert!(corner.r() < center.r(), "{corner:?} vs {center:?}");
}

#[test]
fn mesh_faces_are_drawn_at_end_of_object() {
    let v = |x, y| Vertex { pos: pt3(x, y, 5.0), color: None };
    let cmds = [
        ObjBegin("square.obj".into()),
        v(-1.0, -1.0),
        v(-1.0, 1.0),
        v(1.0, 1.0),
        v(1.0, -1.0),
        Face([-4, -3, -2, -1].map(FaceRef::vertex).to_vec()),
    ];

    let mut eng = engine();
    for cmd in &cmds {
        eng.exec(cmd).unwrap();
    }
    assert_eq!(pixel(&eng, 10, 10), Color::BLACK);

    eng.exec(&ObjEnd).unwrap();
    assert_eq!(pixel(&eng, 10, 10), Color::WHITE);
}

#[test]
fn top_level_faces_are_drawn_at_end_of_run() {
    let v = |x, y| Vertex { pos: pt3(x, y, 5.0), color: Some(gray(77)) };
    let mut eng = engine();
    eng.run([
        v(-1.0, -1.0),
        v(-1.0, 1.0),
        v(1.0, 1.0),
        Face([1, 2, 3].map(FaceRef::vertex).to_vec()),
    ])
    .unwrap();
    assert_eq!(pixel(&eng, 9, 9), gray(77));
    assert_eq!(eng.stats().prims.drawn, 1);
}

#[test]
fn mesh_index_out_of_bounds_is_fatal() {
    let mut eng = engine();
    let res = eng.run([
        Vertex { pos: pt3(0.0, 0.0, 5.0), color: None },
        Face([1, 2, -3].map(FaceRef::vertex).to_vec()),
    ]);
    assert!(matches!(res, Err(Error::Index(_))));
}

#[test]
fn singular_camera_aborts_scene() {
    let mut eng = engine();
    let res = eng.run([
        square(Color::WHITE),
        Scale(vec3(1.0, 0.0, 1.0)),
        Camera {
            xs: -1.0..1.0,
            ys: -1.0..1.0,
            near: 1.0,
            far: 10.0,
        },
        tri(5.0, rgb(255, 0, 0)),
    ]);
    assert!(matches!(res, Err(Error::SingularCamera)));
    // Drawn before the failure
    assert_eq!(pixel(&eng, 10, 10), Color::WHITE);
}

#[test]
fn scope_underflow_is_harmless() {
    let mut eng = engine();
    eng.run([PopScope, PopScope, square(Color::WHITE)]).unwrap();
    assert_eq!(pixel(&eng, 10, 10), Color::WHITE);
}

#[test]
fn scoped_transforms_are_restored() {
    let mut eng = engine();
    eng.run([
        PushScope,
        Translate(vec3(100.0, 0.0, 0.0)),
        PopScope,
        square(Color::WHITE),
    ])
    .unwrap();
    assert_eq!(pixel(&eng, 10, 10), Color::WHITE);
}

#[test]
fn rotation_sign_is_clockwise() {
    let mut eng = engine();
    eng.exec(&Rotate { axis: Axis::Z, degs: 90.0 }).unwrap();
    let p = eng.transforms().ctm().apply(&pt3(1.0, 0.0, 0.0));
    assert_approx_eq!(p, pt3(0.0, -1.0, 0.0));

    for _ in 0..3 {
        eng.exec(&Rotate { axis: Axis::Z, degs: 90.0 }).unwrap();
    }
    let p = eng.transforms().ctm().apply(&pt3(1.0, 2.0, 0.0));
    assert_approx_eq!(p, pt3(1.0, 2.0, 0.0), eps = 1e-5);
}

#[test]
fn screen_round_trip_recovers_world_point() {
    let mut eng = engine();
    eng.run([
        Translate(vec3(1.0, -2.0, 3.0)),
        Rotate { axis: Axis::Y, degs: 30.0 },
        Camera {
            xs: -2.0..1.0,
            ys: -1.0..1.5,
            near: 1.0,
            far: 100.0,
        },
    ])
    .unwrap();
    let ctm = *eng.transforms().ctm();
    let cam = eng.camera();
    let rect = Rect::of_size(W, W);

    let world = pt3(3.0, 1.0, 20.0);
    let p = cam.world_to_camera().apply(&world).xyz();
    let s = cam.to_screen(&rect, &p);
    let back = cam.from_screen(&rect, &s).unwrap();
    assert_approx_eq!(ctm.apply(&back), world, eps = 1e-3);
}

#[test]
fn viewport_limits_drawing() {
    let cfg = Config {
        viewport: Some(Rect::from((10..20, 0..10))),
        ..Config::default()
    };
    let mut eng = Engine::new(Buf2::new_default(W, W), cfg);
    eng.run([tri(5.0, Color::WHITE)]).unwrap();

    assert_eq!(pixel(&eng, 5, 5), Color::BLACK);
    assert_eq!(pixel(&eng, 15, 15), Color::BLACK);
    assert_eq!(pixel(&eng, 15, 5), Color::WHITE);
}
