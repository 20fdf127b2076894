use std::env;

use simp::math::{Axis, Color, pt3, rgb, vec3};
use simp::render::ctx::{Config, LineMode};
use simp::render::shader::Lighting::Phong;
use simp::scene::{CmdVertex, Command::*, Engine, FillMode, Result};
use simp::util::{buf::Buf2, pnm::save_ppm};

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "simp.ppm".into());
    let line_mode = match env::args().nth(2).as_deref() {
        Some("bresenham") => LineMode::Bresenham,
        Some("smooth") => LineMode::Smooth,
        _ => LineMode::Dda,
    };

    let v = |x, y, c| CmdVertex::colored(pt3(x, y, 0.0), c);
    let cmds = [
        Camera {
            xs: -1.0..1.0,
            ys: -0.75..0.75,
            near: 1.0,
            far: 50.0,
        },
        Ambient(vec3(0.3, 0.3, 0.3)),
        Light { color: vec3(1.0, 1.0, 1.0), a: 1.0, b: 0.02 },
        Depth { near: 12.0, far: 30.0, color: vec3(0.1, 0.1, 0.2) },
        Lighting(Phong),
        // A colored quad, slightly tilted
        PushScope,
        Translate(vec3(-0.8, 0.0, 4.0)),
        Rotate { axis: Axis::Y, degs: 20.0 },
        Polygon(vec![
            v(-1.0, -1.0, rgb(255, 0, 0)),
            v(-1.0, 1.0, rgb(0, 255, 0)),
            v(1.0, 1.0, rgb(0, 0, 255)),
            v(1.0, -1.0, Color::WHITE),
        ]),
        PopScope,
        // A triangle piercing the quad
        PushScope,
        Translate(vec3(0.0, 0.0, 4.5)),
        Rotate { axis: Axis::Y, degs: -50.0 },
        Polygon(vec![
            v(-1.5, -0.8, rgb(255, 200, 0)),
            v(0.0, 1.0, rgb(255, 200, 0)),
            v(1.5, -0.8, rgb(255, 200, 0)),
        ]),
        PopScope,
        // A receding wireframe fading into the fog
        Fill(FillMode::Wireframe),
        PushScope,
        Translate(vec3(1.5, -0.5, 8.0)),
        Polygon(vec![
            v(-1.0, -1.0, Color::WHITE),
            v(-1.0, 1.0, Color::WHITE),
            v(1.0, 1.0, Color::WHITE),
            v(1.0, -1.0, Color::WHITE),
        ]),
        Translate(vec3(0.0, 0.0, 12.0)),
        Line([
            CmdVertex::new(pt3(-3.0, -1.0, 0.0)),
            CmdVertex::new(pt3(3.0, 1.5, 0.0)),
        ]),
        PopScope,
    ];

    let surf = Buf2::<u32>::new_default(640, 480);
    let cfg = Config { line_mode, ..Config::default() };
    let mut eng = Engine::new(surf, cfg);
    eng.run(cmds)?;

    save_ppm(&path, &eng.into_surface())?;
    log::info!("wrote {path}");
    Ok(())
}
