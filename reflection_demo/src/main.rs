//! Reflection demo application
//!
//! Builds the Field skybox with the mirrored sphere on the headless backend and
//! writes a CPU preview of the view from the configured camera.
//!
//! Usage: `reflection_demo [config.toml|config.ron]`

use std::error::Error;

use cubemap_engine::foundation::logging;
use cubemap_engine::prelude::*;

fn load_config() -> Result<ApplicationConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(&path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    logging::init_with_level(Some(&config.engine.log_level));
    log::info!("Starting reflection demo...");

    let mut backend = HeadlessBackend::new();
    let assembler = SceneAssembler::new(config.scene.clone())?;
    log::info!(
        "Loading '{}' from {} ({:?})",
        config.assets.image_name,
        config.assets.asset_root,
        config.assets.source
    );
    let scene = assembler.assemble_from_assets(&mut backend, &config.assets)?;
    for wall in &scene.walls {
        log::debug!("{} wall on {:?}", wall.label.name(), wall.face);
    }

    let mut camera = Camera::perspective(
        config.scene.camera_position,
        config.preview.fov_degrees,
        config.preview.aspect(),
        0.1,
        100.0,
    );
    camera.set_target(config.scene.camera_target);

    let sampler = config.scene.reflection_sampler();
    match sampler.lookup(&config.scene.camera_position, &Vec3::new(0.0, 0.0, config.scene.sphere_scale())) {
        Some(hit) => log::info!(
            "Sphere front point reflects the {:?} wall at uv ({:.3}, {:.3})",
            hit.face,
            hit.uv.x,
            hit.uv.y
        ),
        None => log::warn!("Sphere front point reflection left the cube"),
    }

    let image = render_preview(&backend, &camera, &config.preview)?;
    image.save_png(&config.preview.output_path)?;
    log::info!(
        "Wrote {}x{} preview to {}",
        image.width,
        image.height,
        config.preview.output_path
    );
    Ok(())
}
