//! Build a complete catalog from an initial gamelist and a directory of
//! scraped images.

use std::fs;
use std::path::{Path, PathBuf};

use gamelist_core::{GameNode, MATCH_THRESHOLD, normalize_name, score};
use gamelist_xml::{parse_gamelist_file, write_gamelist_file};

use crate::error::ImportError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const UNKNOWN: &str = "Unknown";
const EPOCH_DATE: &str = "19700101T000000";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateStats {
    pub games: usize,
    pub images_matched: usize,
}

/// An image file keyed by its normalized file stem.
struct ImageFile {
    path: PathBuf,
    normalized: String,
}

/// Write a complete catalog to `output`.
///
/// Each entry of `initial` keeps its name (or its file stem when unnamed)
/// and path, gains the best-matching image from `images_dir` when one
/// scores at least [`MATCH_THRESHOLD`], and gets `Unknown` developer,
/// publisher and genre and an epoch release date when those are missing.
pub fn generate_complete(
    initial: &Path,
    images_dir: &Path,
    output: &Path,
) -> Result<GenerateStats, ImportError> {
    let games = parse_gamelist_file(initial)?;
    let images = scan_images(images_dir)?;
    log::info!("Found {} images in {}", images.len(), images_dir.display());

    let output_dir = output.parent().unwrap_or(Path::new(""));
    let mut stats = GenerateStats::default();
    let mut nodes = Vec::with_capacity(games.len());

    for game in &games {
        let Some(name) = game_name(game) else {
            log::warn!("Skipping game with neither name nor path");
            continue;
        };
        let path = game
            .value("path")
            .map(str::to_string)
            .unwrap_or_else(|| format!("./roms/{name}.bin"));

        let mut node = GameNode::new()
            .with_field("name", &name)
            .with_field("path", &path);

        match best_image(&name, &images) {
            Some((image, similarity)) => {
                let relative = relative_image_path(&image.path, output_dir);
                log::debug!("Mapped {} to {} (similarity: {:.3})", name, relative, similarity);
                node.push_field("image", &relative);
                stats.images_matched += 1;
            }
            None => log::debug!("No image match for {}", name),
        }

        for tag in ["developer", "publisher", "genre"] {
            node.push_field(tag, game.value(tag).unwrap_or(UNKNOWN));
        }
        node.push_field("releasedate", game.value("releasedate").unwrap_or(EPOCH_DATE));
        nodes.push(node);
    }

    write_gamelist_file(output, &nodes)?;
    stats.games = nodes.len();
    log::info!("Generated {} with {} games", output.display(), stats.games);
    Ok(stats)
}

fn game_name(game: &GameNode) -> Option<String> {
    if let Some(name) = game.value("name").map(str::trim).filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }
    game.value("path")
        .and_then(|p| Path::new(p).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}

fn scan_images(dir: &Path) -> Result<Vec<ImageFile>, ImportError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        images.push(ImageFile {
            normalized: normalize_name(Some(&stem)),
            path,
        });
    }
    images.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// The highest-scoring image at or above the threshold; the first wins ties.
fn best_image<'a>(name: &str, images: &'a [ImageFile]) -> Option<(&'a ImageFile, f64)> {
    let target = normalize_name(Some(name));
    let mut best: Option<(&ImageFile, f64)> = None;
    for image in images {
        let s = score(&target, &image.normalized);
        if s >= MATCH_THRESHOLD && best.is_none_or(|(_, b)| s > b) {
            best = Some((image, s));
        }
    }
    best
}

/// `image` relative to the directory holding the output gamelist, in the
/// `./dir/file.png` form gamelists use.
fn relative_image_path(image: &Path, output_dir: &Path) -> String {
    let base = absolute(output_dir);
    let image = absolute(image);
    match pathdiff::diff_paths(&image, &base) {
        Some(rel) => {
            let rel = rel.to_string_lossy().replace('\\', "/");
            if rel.starts_with("..") {
                rel
            } else {
                format!("./{rel}")
            }
        }
        None => image.to_string_lossy().into_owned(),
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
