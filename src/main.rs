//! Driving demo: one or more vehicles with follow and hood cameras.
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use busride::{
    init_logging, log_system_error, DrivePlugin, PresentationPlugin, SceneConfig, SceneSpec,
};
use clap::Parser;
use log::info;

/// Third-person vehicle driving demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene description (JSON); the built-in scene is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_scene(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    let scene = match path {
        Some(p) => SceneConfig::load(p)
            .with_context(|| format!("loading scene from {}", p.display()))?,
        None => SceneConfig::default(),
    };
    scene.validate().context("validating scene")?;
    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scene = load_scene(args.config.as_deref())?;
    let bindings = scene.axis_bindings()?;
    info!("starting with {} vehicle(s)", scene.vehicles.len());

    let mut app = App::new();
    app.set_error_handler(log_system_error);
    app.add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .insert_resource(bindings)
        .insert_resource(SceneSpec(scene))
        .add_plugins((DrivePlugin, PresentationPlugin))
        .run();
    Ok(())
}
