use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snapbooth", version)]
struct Cli {
    /// Engine config JSON. `SNAPBOOTH_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a session description to a PNG.
    Compose(ComposeArgs),
    /// Apply tonal adjustments and an optional crop to one photo.
    Edit(EditArgs),
    /// List the filter catalog.
    Filters,
    /// List the layout templates.
    Layouts,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input session JSON. Photo paths resolve relative to it.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Brightness percentage (100 = unchanged).
    #[arg(long, default_value_t = 100.0)]
    brightness: f32,

    /// Contrast percentage (100 = unchanged).
    #[arg(long, default_value_t = 100.0)]
    contrast: f32,

    /// Saturation percentage (100 = unchanged).
    #[arg(long, default_value_t = 100.0)]
    saturation: f32,

    /// Exposure percentage (100 = unchanged).
    #[arg(long, default_value_t = 100.0)]
    exposure: f32,

    /// Shadows offset in [-50, 50].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    shadows: f32,

    /// Highlights offset in [-50, 50].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    highlights: f32,

    /// Crop box in percent of the source: `x,y,width,height`.
    #[arg(long, value_parser = parse_crop)]
    crop: Option<snapbooth::CropRect>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = snapbooth::BoothConfig::load(cli.config.as_deref())?;
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args, config),
        Command::Edit(args) => cmd_edit(args, config),
        Command::Filters => {
            for f in snapbooth::FilterId::ALL {
                println!("{:<10} {}", f.as_str(), f.label());
            }
            Ok(())
        }
        Command::Layouts => {
            for kind in snapbooth::LayoutKind::ALL {
                println!(
                    "{:<10} {} slots (max {})",
                    kind.as_str(),
                    kind.default_slots(),
                    kind.max_slots()
                );
            }
            Ok(())
        }
    }
}

fn cmd_compose(args: ComposeArgs, config: snapbooth::BoothConfig) -> anyhow::Result<()> {
    let spec = snapbooth::SessionSpec::from_path(&args.in_path)?;
    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut session = snapbooth::BoothSession::from_spec(&spec, assets_root, config)?;

    let png = session.export()?.png_bytes()?;
    write_output(&args.out, &png)?;
    tracing::info!(
        out = %args.out.display(),
        layout = session.layout().kind.as_str(),
        photos = session.photos().len(),
        "composite written"
    );
    Ok(())
}

fn cmd_edit(args: EditArgs, config: snapbooth::BoothConfig) -> anyhow::Result<()> {
    use snapbooth::Slider;

    let photo = snapbooth::Photo::from_path(&args.in_path)?;
    let mut editor = snapbooth::AdjustEditor::open(0, &config);
    editor.load(&photo)?;

    for (slider, value) in [
        (Slider::Brightness, args.brightness),
        (Slider::Contrast, args.contrast),
        (Slider::Saturation, args.saturation),
        (Slider::Exposure, args.exposure),
        (Slider::Shadows, args.shadows),
        (Slider::Highlights, args.highlights),
    ] {
        editor.set_slider(slider, value);
    }
    if let Some(crop) = args.crop {
        editor.set_mode(snapbooth::EditorMode::Crop);
        editor.set_crop(crop);
    }

    let edited = editor
        .save()?
        .context("editor source did not load")?;
    write_output(&args.out, edited.bytes())?;
    tracing::info!(out = %args.out.display(), mode = ?editor.mode(), "edited photo written");
    Ok(())
}

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write png '{}'", out.display()))
}

fn parse_crop(s: &str) -> Result<snapbooth::CropRect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("crop values must be numbers: {e}"))?;
    let [x, y, width, height] = parts[..] else {
        return Err(format!("expected x,y,width,height, got {} values", parts.len()));
    };
    let crop = snapbooth::CropRect {
        x,
        y,
        width,
        height,
    };
    if !crop.is_valid() {
        return Err(format!(
            "crop box must stay within 0..100 with sides >= {}",
            snapbooth::MIN_CROP_SIZE
        ));
    }
    Ok(crop)
}
