use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use icon_atlas_core::config::{Algorithm, SortOrder};
use icon_atlas_core::{
    PackerConfig, atlas_to_json, build_atlas_pages, pack, scaled_size, to_json,
};
use image::{ImageReader, RgbaImage};
use serde::Deserialize;
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "icon-atlas",
    about = "Pack icons into texture atlas pages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress=false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into atlas pages (PNG) plus JSON UV maps
    Pack(PackArgs),
    /// Layout-only export (no PNGs): compute placements and write JSON
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name_<page>.png / name.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file; its fields override the command-line values
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    /// Max page width
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    max_width: u32,
    /// Max page height
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    max_height: u32,
    /// Gap kept between icons
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    spacing: u32,
    /// Cut each page to the bounding box of its icons
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    trim: bool,
    /// Sort order: height_desc|area_desc|max_side_desc|width_desc|id_asc|none
    #[arg(long, default_value = "height_desc", help_heading = "Layout")]
    sort_order: String,
    /// Scale applied to image sizes before packing (e.g. display scale)
    #[arg(long, default_value_t = 1.0, help_heading = "Layout")]
    pixel_scale: f32,
    /// Algorithm: shelf | guillotine
    #[arg(long, value_parser = ["shelf", "guillotine"], default_value = "shelf", help_heading = "Algorithms")]
    algorithm: String,

    /// Print the merged configuration (after CLI/YAML) as JSON and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let show_progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Pack(args) => run_pack(args, show_progress, false),
        Commands::Layout(args) => run_pack(args, show_progress, true),
    }
}

fn run_pack(args: &PackArgs, show_progress: bool, layout_only: bool) -> anyhow::Result<()> {
    let mut cfg = PackerConfig {
        max_width: args.max_width,
        max_height: args.max_height,
        spacing: args.spacing,
        algorithm: args
            .algorithm
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown algorithm: {}", args.algorithm))?,
        sort_order: parse_sort_order(&args.sort_order)?,
        trim_to_bounding_box: args.trim,
        pixel_scale: args.pixel_scale,
    };
    if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.into_packer_config(cfg)?;
    }
    cfg.validate()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    let images = load_images_with_progress(&args.input, &paths, show_progress)?;
    info!(count = images.len(), "loaded input images");

    let sizes = images.iter().map(|(id, img)| {
        let (w, h) = img.dimensions();
        (id.clone(), scaled_size(w, h, cfg.pixel_scale))
    });
    let result = pack(sizes, &cfg)?;
    let stats = result.stats();
    info!(summary = %stats.summary(), "packed");

    if args.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
    let json_path = args.out_dir.join(format!("{}.json", args.name));

    let json = if layout_only {
        to_json(&result, &cfg)
    } else {
        let pages = build_atlas_pages(&result, &images, &cfg);
        let mut names = Vec::with_capacity(pages.len());
        for p in &pages {
            let file_name = format!("{}_{}.png", args.name, p.page.index);
            let png_path = args.out_dir.join(&file_name);
            p.rgba
                .save(&png_path)
                .with_context(|| format!("write {}", png_path.display()))?;
            info!(?png_path, id = p.page.index, "wrote page");
            names.push(file_name);
        }
        atlas_to_json(&pages, &names, &cfg)
    };
    fs::write(&json_path, serde_json::to_string_pretty(&json)?)
        .with_context(|| format!("write {}", json_path.display()))?;
    info!(?json_path, pages = result.pages.len(), "atlas written");
    println!("{}", stats.summary());
    Ok(())
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob {pat}"))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if exclude.is_some_and(|ex| ex.is_match(&s)) {
        return true;
    }
    if include.is_some_and(|inc| !inc.is_match(&s)) {
        return true;
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Identifier of an image: its path relative to the input root, without extension.
fn image_key(root: &Path, p: &Path) -> String {
    let rel = p.strip_prefix(root).unwrap_or(p);
    let rel = if rel.as_os_str().is_empty() {
        Path::new(p.file_name().unwrap_or_default())
    } else {
        rel
    };
    rel.with_extension("").to_string_lossy().replace('\\', "/")
}

fn load_images_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<HashMap<String, RgbaImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut map = HashMap::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        let key = image_key(root, p);
        let img = match load_image(p) {
            Ok(img) => img,
            Err(e) => {
                // keep the id so downstream lookups still resolve
                error!(?p, error = %e, "undecodable image, using 1x1 placeholder");
                RgbaImage::new(1, 1)
            }
        };
        insert_unique(&mut map, key, img, p)?;
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(map)
}

/// Two files mapping to one key (e.g. `a.png` and `a.jpg`) would shadow each other.
fn insert_unique(
    map: &mut HashMap<String, RgbaImage>,
    key: String,
    img: RgbaImage,
    path: &Path,
) -> anyhow::Result<()> {
    if map.contains_key(&key) {
        anyhow::bail!(
            "image key '{}' from {} collides with an earlier file; rename one of them",
            key,
            path.display()
        );
    }
    map.insert(key, img);
    Ok(())
}

fn load_image(p: &Path) -> anyhow::Result<RgbaImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_width: Option<u32>,
    max_height: Option<u32>,
    spacing: Option<u32>,
    algorithm: Option<String>,
    sort_order: Option<String>,
    trim_to_bounding_box: Option<bool>,
    pixel_scale: Option<f32>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.spacing {
            cfg.spacing = v;
        }
        if let Some(v) = self.algorithm {
            cfg.algorithm = v
                .parse::<Algorithm>()
                .map_err(|_| anyhow::anyhow!("unknown algorithm: {}", v))?;
        }
        if let Some(v) = self.sort_order {
            cfg.sort_order = parse_sort_order(&v)?;
        }
        if let Some(v) = self.trim_to_bounding_box {
            cfg.trim_to_bounding_box = v;
        }
        if let Some(v) = self.pixel_scale {
            cfg.pixel_scale = v;
        }
        Ok(cfg)
    }
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_cli_values() {
        let y: YamlConfig =
            serde_yaml::from_str("spacing: 3\nalgorithm: guillotine\ntrim_to_bounding_box: true\n")
                .expect("yaml");
        let cfg = y.into_packer_config(PackerConfig::default()).expect("cfg");
        assert_eq!(cfg.spacing, 3);
        assert_eq!(cfg.algorithm, Algorithm::Guillotine);
        assert!(cfg.trim_to_bounding_box);
        assert_eq!(cfg.max_width, 4096);
    }

    #[test]
    fn yaml_rejects_unknown_sort_order() {
        let y: YamlConfig = serde_yaml::from_str("sort_order: sideways\n").expect("yaml");
        assert!(y.into_packer_config(PackerConfig::default()).is_err());
    }

    #[test]
    fn keys_are_relative_without_extension() {
        let root = Path::new("icons");
        assert_eq!(image_key(root, Path::new("icons/poi/cafe.png")), "poi/cafe");
        assert_eq!(
            image_key(Path::new("icons/bus.png"), Path::new("icons/bus.png")),
            "bus"
        );
    }

    #[test]
    fn colliding_keys_are_an_error() {
        let mut map = HashMap::new();
        let root = Path::new("icons");
        let png = Path::new("icons/a.png");
        let jpg = Path::new("icons/a.jpg");
        insert_unique(&mut map, image_key(root, png), RgbaImage::new(2, 2), png).expect("first");
        let err = insert_unique(&mut map, image_key(root, jpg), RgbaImage::new(3, 3), jpg)
            .expect_err("collision");
        assert!(err.to_string().contains("icons/a.jpg"));
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"].dimensions(), (2, 2));
    }

    #[test]
    fn globs_filter_paths() {
        let inc = build_globset(&["**/*.png".to_string()]).expect("glob");
        let exc = build_globset(&["**/skip/**".to_string()]).expect("glob");
        assert!(!should_skip(Path::new("a/b.png"), inc.as_ref(), exc.as_ref()));
        assert!(should_skip(Path::new("a/skip/b.png"), inc.as_ref(), exc.as_ref()));
        assert!(should_skip(Path::new("a/b.jpg"), inc.as_ref(), exc.as_ref()));
    }
}
