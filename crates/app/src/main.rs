//! Entry point for Kiln3D.
//! Logging + CLI camera options.

use anyhow::{Context, Result};
use corelib::{CameraConfig, Projection};
use platform::RunConfig;

fn parse_f32(arg: &str, name: &str, value: &str) -> Option<f32> {
    match value.parse::<f32>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {name}: cannot parse '{value}' in '{arg}'");
            None
        }
    }
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

fn parse_camera_args(args: &[String]) -> CameraConfig {
    let mut config = CameraConfig::default();

    for arg in args {
        if let Some(v) = arg.strip_prefix("--fov=") {
            if let Some(deg) = parse_f32(arg, "fov", v) {
                config.fov = deg.to_radians();
            }
        } else if let Some(v) = arg.strip_prefix("--near=") {
            if let Some(near) = parse_f32(arg, "near", v) {
                config.near = near;
            }
        } else if let Some(v) = arg.strip_prefix("--far=") {
            if let Some(far) = parse_f32(arg, "far", v) {
                config.far = far;
            }
        } else if let Some(v) = arg.strip_prefix("--move-speed=") {
            if let Some(speed) = parse_f32(arg, "move-speed", v) {
                config.movement_speed = speed;
            }
        } else if let Some(v) = arg.strip_prefix("--look-speed=") {
            if let Some(speed) = parse_f32(arg, "look-speed", v) {
                config.mouse_look_speed = speed;
            }
        } else if arg == "--ortho" {
            config.projection = Projection::Orthographic { view_height: 10.0 };
        } else if let Some(v) = arg.strip_prefix("--ortho=") {
            if let Some(view_height) = parse_f32(arg, "ortho", v) {
                config.projection = Projection::Orthographic { view_height };
            }
        }
    }

    config
}

fn parse_run_config(args: &[String]) -> Result<RunConfig> {
    let (width, height) = parse_size_args(args);
    let camera = parse_camera_args(args);
    camera.validate().context("Invalid camera options")?;
    Ok(RunConfig {
        width,
        height,
        camera,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_run_config(&args)?;
    log::info!(
        "Starting Kiln3D. window_size={}x{}, projection={:?}, fov={:.1}deg, clip={}..{}",
        config.width,
        config.height,
        config.camera.projection,
        config.camera.fov.to_degrees(),
        config.camera.near,
        config.camera.far
    );

    platform::run(config)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
