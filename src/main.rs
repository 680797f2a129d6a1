use anyhow::{Context as _, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use meatball_gen::addon::PANEL_ID;
use meatball_gen::cli::Cli;
use meatball_gen::mesh::export::{save_obj, ObjObject};
use meatball_gen::summary::SceneSummary;
use meatball_gen::traits::{Context, SceneGraph};
use meatball_gen::{InMemoryScene, MeatballAddon, Registry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.placement_config()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}, policy {:?}", seed, config.policy);

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut scene = InMemoryScene::new();
    log::debug!("Generating into {}", scene.name());
    let mut registry = Registry::new();
    let addon = MeatballAddon::new(config);
    addon.init(&mut registry)?;

    for press in 1..=cli.presses {
        let mut ctx = Context::new(&mut scene, &mut rng);
        registry
            .press(PANEL_ID, 0, &mut ctx)
            .context(format!("Press {} failed", press))?;
    }

    for (handle, object) in scene.objects() {
        if !cli.quiet {
            println!(
                "{} '{}' at ({:.3}, {:.3}, {:.3}): {} vertices, {} faces",
                handle,
                object.name,
                object.location.x,
                object.location.y,
                object.location.z,
                object.mesh.vertex_count(),
                object.mesh.face_count()
            );
        }
    }

    if let Some(path) = &cli.obj {
        let objects: Vec<ObjObject> = scene
            .objects()
            .map(|(_, object)| ObjObject::new(&object.name, &object.mesh, object.location))
            .collect();
        save_obj(path, &objects)?;
    }

    if let Some(path) = &cli.summary {
        SceneSummary::capture(&scene, seed, cli.presses).save(path)?;
    }

    addon.shutdown(&mut registry)?;
    Ok(())
}
