//! Finds the photo a camera was shot from.
//!
//! Search order is fixed so results are reproducible: files directly in the
//! base folder, then, for each entry of [`IMAGE_FOLDER_PATTERNS`] in order,
//! every folder below the base whose name contains that pattern (folders in
//! lexicographic order, files sorted within each). Only directory entries are
//! read while looking for those folders; files are listed in the base folder
//! and the matching folders alone.
//!
//! [`find_images`] and [`find_image`] rescan on every call. An import run
//! builds one [`ImageIndex`] and answers every camera from it.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use glob::glob;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const IMAGE_FOLDER_PATTERNS: [&str; 7] =
    ["drone", "image", "images", "photo", "photos", "dji", "dcim"];

/// Stem used to match a camera id against image files, lowercased.
pub fn camera_key(camera_id: &str) -> String {
    Path::new(camera_id)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| camera_id.to_lowercase())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn glob_sorted(pattern: &str) -> Vec<PathBuf> {
    let Ok(paths) = glob(pattern) else {
        log::warn!("bad search pattern {pattern}");
        return Vec::new();
    };
    let mut sorted_path: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
    sorted_path.sort();
    sorted_path
}

/// Every directory below `dir`, without following symlinks.
fn collect_sub_folders(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::trace!("cannot list {}: {e}", dir.display());
            return;
        }
    };
    for entry in entries.filter_map(Result::ok) {
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let path = entry.path();
            collect_sub_folders(&path, out);
            out.push(path);
        }
    }
}

/// Folders to search, in search order, starting with `base_dir` itself.
pub fn search_folders(base_dir: &Path) -> Vec<PathBuf> {
    let mut sub_folders = Vec::new();
    collect_sub_folders(base_dir, &mut sub_folders);
    sub_folders.sort();

    let mut seen = HashSet::new();
    let mut folders = vec![base_dir.to_path_buf()];
    seen.insert(base_dir.to_path_buf());
    for pattern in IMAGE_FOLDER_PATTERNS {
        for folder in &sub_folders {
            let name = folder
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if name.contains(pattern) && seen.insert(folder.clone()) {
                folders.push(folder.clone());
            }
        }
    }
    log::trace!("image search folders: {folders:?}");
    folders
}

/// Images below one base folder, grouped by lowercased stem in search order.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    by_stem: HashMap<String, Vec<PathBuf>>,
    len: usize,
}

impl ImageIndex {
    pub fn scan(base_dir: &Path) -> ImageIndex {
        let mut index = ImageIndex::default();
        for folder in search_folders(base_dir) {
            let escaped = glob::Pattern::escape(&folder.to_string_lossy());
            for path in glob_sorted(&format!("{escaped}/*")) {
                if !is_image(&path) || !path.is_file() {
                    continue;
                }
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                index
                    .by_stem
                    .entry(stem.to_string_lossy().to_lowercase())
                    .or_default()
                    .push(path);
                index.len += 1;
            }
        }
        log::debug!("indexed {} images below {}", index.len, base_dir.display());
        index
    }

    /// Number of candidate images found.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All images for `camera_id`, best candidate first.
    pub fn find_all(&self, camera_id: &str) -> &[PathBuf] {
        self.by_stem
            .get(&camera_key(camera_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First candidate of [`ImageIndex::find_all`].
    pub fn find(&self, camera_id: &str) -> Option<PathBuf> {
        let found = self.find_all(camera_id).first().cloned();
        match &found {
            Some(path) => log::debug!("found image for camera {camera_id}: {}", path.display()),
            None => log::debug!("no images found for camera {camera_id}"),
        }
        found
    }
}

/// All images for `camera_id`, best candidate first.
pub fn find_images(base_dir: &Path, camera_id: &str) -> Vec<PathBuf> {
    ImageIndex::scan(base_dir).find_all(camera_id).to_vec()
}

/// First candidate of [`find_images`], or `None` when nothing matches.
pub fn find_image(base_dir: &Path, camera_id: &str) -> Option<PathBuf> {
    ImageIndex::scan(base_dir).find(camera_id)
}
