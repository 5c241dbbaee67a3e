use clap::Parser;
use log::{info, warn};
use nalgebra::Vector3;
use std::path::Path;
use std::time::Instant;
use viewer3d::{RenderBackend, Viewer};
use viewer3d::io::args::Args;
use viewer3d::io::config_loader::{SceneConfig, TomlConfigLoader};
use viewer3d::material_system::Light;

const DEFAULT_OUTPUT: &str = "render.png";

/// Applies the `[camera]` and `[light]` sections to the scene.
fn configure_scene(viewer: &mut Viewer, config: &SceneConfig) -> Result<(), String> {
    let scene = viewer.scene_mut();
    if let Some(camera) = scene.camera_mut() {
        let section = &config.camera;
        if let Some(position) = section.position {
            camera.position = Vector3::from(position);
        }
        if let Some(target) = section.target {
            camera.target = Vector3::from(target);
        }
        if let Some(up) = section.up {
            camera.up = Vector3::from(up);
        }
        if let Some(fov) = section.fov {
            camera.set_fov_degrees(fov);
        }
        if let Some(near) = section.near {
            camera.near_plane = near;
        }
        if let Some(far) = section.far {
            camera.far_plane = far;
        }
        camera.update_view_matrix()?;
        camera.update_projection_matrix();
    }

    let defaults = Light::default();
    let light = Light::new(
        config.light.position.map(Vector3::from).unwrap_or(defaults.position),
        config.light.color.map(Vector3::from).unwrap_or(defaults.color),
    );
    match scene.lights.first_mut() {
        Some(first) => *first = light,
        None => {
            scene.add_light(light);
        }
    }
    Ok(())
}

/// Applies the `[object]` section to the active object: translate, rotate, scale.
fn place_object(viewer: &mut Viewer, config: &SceneConfig) -> Result<(), String> {
    let section = &config.object;
    if let Some([x, y, z]) = section.translate {
        viewer.move_by(x, y, z);
    }
    if let Some([x, y, z]) = section.rotate {
        viewer.rotate(x.to_radians(), y.to_radians(), z.to_radians());
    }
    if let Some([x, y, z]) = section.scale {
        viewer.scale(x, y, z)?;
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start_time = Instant::now();

    if let Some(path) = &args.example_config {
        TomlConfigLoader::create_example_config(path)?;
        info!("Example config written to '{}'", path);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => TomlConfigLoader::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    args.apply_to(&mut config)?;

    let obj_path = config
        .files
        .obj
        .clone()
        .ok_or_else(|| "No OBJ file given (use --obj or [files] obj)".to_string())?;

    let mut viewer = Viewer::new(config.output.width, config.output.height);
    viewer.renderer().set_settings(config.render.clone());
    if let Some(settings_path) = &config.files.settings {
        if let Err(e) = viewer.load_settings(settings_path) {
            warn!("{}; keeping configured render settings", e);
        }
    }

    configure_scene(&mut viewer, &config)?;

    let load_start = Instant::now();
    viewer.load_object(&obj_path)?;
    info!("Model loaded in {:?}", load_start.elapsed());
    place_object(&mut viewer, &config)?;
    viewer.log_summary();

    let image = viewer.update_model();

    let output = config.files.output.as_deref().unwrap_or(DEFAULT_OUTPUT);
    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create output directory '{}': {}", parent.display(), e))?;
        }
    }
    image
        .save(output)
        .map_err(|e| format!("Failed to save image '{}': {}", output, e))?;
    info!("Image saved to '{}'", output);

    if let Some(path) = &args.save_settings {
        viewer.save_settings(path)?;
    }

    info!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
