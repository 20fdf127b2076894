use std::ops::ControlFlow::{Break, Continue};

use simp::geom::FaceRef;
use simp::math::{Axis, pt3, rgb, vec3};
use simp::render::{ctx::Config, shader::Lighting::Gouraud};
use simp::scene::{Command, Command::*, Engine};

use simp_front::{dims::SVGA_800_600, minifb::Window};

/// Corners of a cube, indexed by the bits of (x > 0, y > 0, z > 0).
fn corners() -> impl Iterator<Item = Command> {
    (0..8).map(|i| {
        let [x, y, z] =
            [1, 2, 4].map(|bit| if i & bit == 0 { -1.0 } else { 1.0 });
        let c = [x, y, z].map(|a| if a < 0.0 { 64 } else { 255 });
        Vertex {
            pos: pt3(x, y, z),
            color: Some(rgb(c[0], c[1], c[2])),
        }
    })
}

/// Outward-wound faces of a cube.
fn faces() -> impl Iterator<Item = Command> {
    [
        [1, 3, 4, 2],
        [5, 6, 8, 7],
        [1, 5, 7, 3],
        [2, 4, 8, 6],
        [1, 2, 6, 5],
        [3, 7, 8, 4],
    ]
    .into_iter()
    .map(|f| Face(f.map(FaceRef::vertex).to_vec()))
}

fn main() {
    env_logger::init();

    let mut win = Window::builder()
        .title("simp // cube")
        .dims(SVGA_800_600)
        .build()
        .expect("should create window");

    win.run(|frame| {
        let secs = frame.t.as_secs_f32();

        let mut cmds = vec![
            Camera {
                xs: -1.0..1.0,
                ys: -0.75..0.75,
                near: 1.0,
                far: 100.0,
            },
            Ambient(vec3(0.15, 0.15, 0.2)),
            Light { color: vec3(1.0, 1.0, 0.9), a: 0.5, b: 0.05 },
            Lighting(Gouraud),
            PushScope,
            Translate(vec3(0.0, 0.0, 6.0)),
            Rotate { axis: Axis::Y, degs: secs * 40.0 },
            Rotate { axis: Axis::X, degs: secs * 25.0 },
            ObjBegin("cube".into()),
        ];
        cmds.extend(corners());
        cmds.extend(faces());
        cmds.extend([ObjEnd, PopScope]);

        let mut eng = Engine::new(&mut *frame.win, Config::default());
        match eng.run(cmds) {
            Ok(()) => Continue(()),
            Err(e) => {
                log::error!("rendering failed: {e}");
                Break(())
            }
        }
    });
}
