//! Block Raster CLI
//!
//! Render block model definitions to PNG images.

use block_raster::{
    encode_png, export_raw, DirectorySource, DirectoryTextureSource, Projection, RenderConfig,
    RenderContext,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "block-raster")]
#[command(author, version, about = "Render block model definitions to images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a model to a PNG image
    Render {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output width in pixels
        #[arg(long, default_value = "64")]
        width: u32,

        /// Output height in pixels
        #[arg(long, default_value = "64")]
        height: u32,

        /// Projection mode
        #[arg(short, long, value_enum, default_value = "orthographic")]
        projection: ProjectionArg,

        /// Camera distance along z (perspective only)
        #[arg(long, default_value = "500")]
        camera_z: f32,

        /// Skip the model's display transform
        #[arg(long)]
        no_transform: bool,
    },

    /// Show the resolved definition of a model
    Inspect {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Directory containing definition documents (<id>.json)
    #[arg(long)]
    models: PathBuf,

    /// Directory containing textures (<path>.png)
    #[arg(long)]
    textures: PathBuf,

    /// Model identifier (e.g., "minecraft:block/stone" or "block/stone")
    #[arg(short, long)]
    model: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ProjectionArg {
    /// Drop depth, fixed x offset
    Orthographic,
    /// Divide by distance from the camera
    Perspective,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Orthographic => Projection::Orthographic,
            ProjectionArg::Perspective => Projection::Perspective,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            sources,
            output,
            width,
            height,
            projection,
            camera_z,
            no_transform,
        } => {
            let mut config = RenderConfig::default()
                .with_size(width, height)
                .with_projection(projection.into())
                .with_camera_z(camera_z);
            config.apply_transform = !no_transform;

            render_model(&sources, &output, config)?;
        }
        Commands::Inspect { sources } => {
            inspect_model(&sources)?;
        }
    }

    Ok(())
}

fn context(sources: &SourceArgs, config: RenderConfig) -> RenderContext<DirectorySource, DirectoryTextureSource> {
    RenderContext::with_config(
        DirectorySource::new(&sources.models),
        DirectoryTextureSource::new(&sources.textures),
        config,
    )
}

fn render_model(
    sources: &SourceArgs,
    output_path: &PathBuf,
    config: RenderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Rendering {} ({}x{}, {})",
        sources.model,
        config.width,
        config.height,
        config.projection
    );

    let mut ctx = context(sources, config);
    let model = ctx.build_model(&sources.model)?;
    log::info!(
        "  {} faces, {} textures loaded",
        model.faces.len(),
        ctx.cache().len()
    );

    let image = ctx.render_model(&model)?;

    let png_path = if output_path.extension().is_some() {
        output_path.clone()
    } else {
        output_path.with_extension("png")
    };
    let png_data = encode_png(&image)?;
    fs::write(&png_path, &png_data)?;

    log::info!("Exported PNG ({} bytes) to {:?}", png_data.len(), png_path);

    Ok(())
}

fn inspect_model(sources: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = context(sources, RenderConfig::default());

    let chain = ctx.store().ancestry(&sources.model)?;
    let model = ctx.build_model(&sources.model)?;
    let transform = model.transform();

    println!("Model: {}", sources.model);
    println!("  Parent chain: {}", chain.join(" -> "));
    println!("  Elements: {}", model.definition.elements.len());
    println!("  Faces: {}", model.faces.len());
    println!("  Transform:");
    println!("    translate: {:?}", transform.translate);
    println!("    rotate:    {:?}", transform.rotate);
    println!("    scale:     {:?}", transform.scale);

    println!("  Textures:");
    for (name, value) in &model.definition.textures {
        match block_raster::texture::resolve(name, &model.definition.textures) {
            Ok(path) if &path != value => println!("    {} = {} -> {}", name, value, path),
            Ok(_) => println!("    {} = {}", name, value),
            Err(e) => println!("    {} = {} (unresolved: {})", name, value, e),
        }
    }

    if let Some(bounds) = model.bounds() {
        println!(
            "  Bounds: {:?} .. {:?} (size {:?})",
            bounds.min,
            bounds.max,
            bounds.dimensions()
        );
    }

    let raw = export_raw(&model, ctx.cache());
    println!(
        "  Geometry: {} vertices, {} triangles, {} textures",
        raw.vertex_count(),
        raw.triangle_count(),
        raw.textures.len()
    );
    for texture in &raw.textures {
        println!(
            "    {} ({}x{}{})",
            texture.path,
            texture.width,
            texture.height,
            if texture.transparent { ", transparent" } else { "" }
        );
    }

    Ok(())
}
