//! Application layouts — template files found under `<view_path>/layouts/`.
//!
//! A file counts when its name looks like `<name>.html.<handler>` and does
//! not start with `_` (partials). Its identifier is the path relative to the
//! `layouts/` directory, cut at the first `.`: `layouts/admin/main.html.erb`
//! becomes `admin/main`.

use std::path::{Path, PathBuf};

use log::{debug, warn};


pub fn app_layouts_for_select<P: AsRef<Path>>(view_paths: &[P]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for view_path in view_paths {
        let root = view_path.as_ref().join("layouts");
        if !root.is_dir() {
            debug!("no layouts directory under {}", view_path.as_ref().display());
            continue;
        }
        let mut files = Vec::new();
        collect_files(&root, &mut files);
        out.extend(files.iter().filter_map(|f| layout_name(&root, f)));
    }
    out.sort();
    out.dedup();
    out
}


fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("skipping {}: {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}


/// Identifier for `file` relative to `root`, if it is a non-partial html template.
fn layout_name(root: &Path, file: &Path) -> Option<String> {
    let file_name = file.file_name()?.to_str()?;
    if file_name.starts_with('_') || !is_html_template(file_name) {
        return None;
    }
    let relative = file.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    joined.split('.').next().map(str::to_string)
}


/// `*.html.*`
fn is_html_template(file_name: &str) -> bool {
    matches!(file_name.find(".html."), Some(i) if i > 0)
}
