use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shapescriber::Config;
use shapescriber::draw::{Annotation, HeadlessSurface, LabelFont};
use shapescriber::input::AnnotationEngine;
use shapescriber::output::{AnnotationLayer, canvas_size, load_image};
use shapescriber::script::{Script, replay};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shapescriber")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SHAPESCRIBER_GIT_HASH"), ")"),
    about = "Vector annotation engine: draw, edit and style shapes over a background image"
)]
struct Cli {
    /// Use this config file instead of ~/.config/shapescriber/config.toml
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw committed annotations from a JSON file into a PNG
    Render {
        /// JSON array of annotations
        #[arg(long, short = 'a', value_name = "FILE")]
        annotations: PathBuf,
        /// PNG drawn underneath the annotations
        #[arg(long, short = 'b', value_name = "PNG")]
        background: Option<PathBuf>,
        /// PNG drawn over the background, still underneath the annotations
        #[arg(long, short = 'f', value_name = "PNG")]
        foreground: Option<PathBuf>,
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
    },
    /// Replay a scripted session and print the resulting annotations as JSON
    Replay {
        /// Session script (JSON)
        #[arg(long, short = 's', value_name = "FILE")]
        script: PathBuf,
        #[arg(long, short = 'b', value_name = "PNG")]
        background: Option<PathBuf>,
        #[arg(long, short = 'f', value_name = "PNG")]
        foreground: Option<PathBuf>,
        /// Also write the final frame as PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: Option<PathBuf>,
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
    },
    /// Write the documented default config to ~/.config/shapescriber/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Created {}", path.display());
            Ok(())
        }
        Command::Render {
            annotations,
            background,
            foreground,
            output,
            width,
            height,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let underlays = load_underlays(background.as_deref(), foreground.as_deref())?;
            render(&config, &annotations, &underlays, &output, width, height)
        }
        Command::Replay {
            script,
            background,
            foreground,
            output,
            width,
            height,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let script = Script::load(&script)?;
            let annotations = match output {
                Some(output) => {
                    let underlays = load_underlays(background.as_deref(), foreground.as_deref())?;
                    replay_to_png(&config, &script, &underlays, &output, width, height)?
                }
                None => {
                    let (width, height) = canvas_size(None, width, height);
                    let mut surface = HeadlessSurface::new(width as f64, height as f64);
                    replay(&script, &config, &mut surface)?
                }
            };
            println!("{}", serde_json::to_string_pretty(&annotations)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Background then foreground, whichever were given.
fn load_underlays(
    background: Option<&Path>,
    foreground: Option<&Path>,
) -> Result<Vec<cairo::ImageSurface>> {
    [background, foreground]
        .into_iter()
        .flatten()
        .map(load_image)
        .collect()
}

fn render(
    config: &Config,
    annotations_path: &Path,
    underlays: &[cairo::ImageSurface],
    output_path: &Path,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<()> {
    let source = fs::read_to_string(annotations_path)
        .with_context(|| format!("Failed to read {}", annotations_path.display()))?;
    let annotations: Vec<Annotation> = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse annotations from {}", annotations_path.display()))?;

    for annotation in annotations.iter().filter(|a| !a.is_well_formed()) {
        log::warn!(
            "Annotation {} has {} vertices, which does not fit a {:?}",
            annotation.id,
            annotation.coordinates.len(),
            annotation.kind
        );
    }

    let (width, height) = canvas_size(underlays.first(), width, height);
    let layer = AnnotationLayer::new(width, height)?;
    let font = LabelFont::from(&config.label);
    {
        let mut surface = layer.surface(&font);
        let mut engine = AnnotationEngine::new(config);
        engine.set_annotations(annotations);
        engine.render(&mut surface);
    }
    layer.write_png(underlays, output_path)
}

fn replay_to_png(
    config: &Config,
    script: &Script,
    underlays: &[cairo::ImageSurface],
    output_path: &Path,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<Vec<Annotation>> {
    let (width, height) = canvas_size(underlays.first(), width, height);
    let layer = AnnotationLayer::new(width, height)?;
    let font = LabelFont::from(&config.label);
    let annotations = {
        let mut surface = layer.surface(&font);
        replay(script, config, &mut surface)?
    };
    layer.write_png(underlays, output_path)?;
    Ok(annotations)
}
