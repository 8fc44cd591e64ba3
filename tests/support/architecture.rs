//! Source scanning helpers for layering contract tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A matching source line: path relative to the crate root, 1-based line
/// number, and the line itself.
pub type Hit = (String, usize, String);

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));

    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            collect(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

/// Every `.rs` file under `relative_dir`, sorted.
pub fn rust_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Source lines before the first `#[cfg(test)]` of each file.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    read(path)
        .lines()
        .take_while(|line| !line.trim_start().starts_with("#[cfg(test)]"))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect()
}

/// Non-test lines under `relative_dir` containing any of `patterns`.
pub fn production_hits(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    rust_files(relative_dir)
        .into_iter()
        .flat_map(|file| {
            let name = relative_path(&file);
            production_lines(&file)
                .into_iter()
                .filter(|(_, line)| patterns.iter().any(|p| line.contains(p)))
                .map(move |(number, line)| (name.clone(), number, line))
        })
        .collect()
}

/// Lines of `mod.rs` files that are not module declarations, comments or
/// `cfg` attributes.
pub fn non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    rust_files(relative_dir)
        .into_iter()
        .filter(|file| file.file_name().and_then(|s| s.to_str()) == Some("mod.rs"))
        .flat_map(|file| {
            let name = relative_path(&file);
            read(&file)
                .lines()
                .enumerate()
                .filter(|(_, raw)| {
                    let line = raw.trim();
                    !(line.is_empty()
                        || line.starts_with("//")
                        || line.starts_with("#!")
                        || line.starts_with("pub mod ")
                        || line.starts_with("mod ")
                        || line.starts_with("#[cfg"))
                })
                .map(|(idx, raw)| (name.clone(), idx + 1, raw.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Public functions declared in `relative_file` that no other non-test
/// line under its directory calls as `module::name(`.
pub fn uncalled_pub_fns(relative_file: &str) -> Vec<String> {
    let path = root().join(relative_file);
    let module = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let dir = path.parent().map(relative_path).unwrap_or_default();

    let callers: Vec<String> = rust_files(&dir)
        .into_iter()
        .filter(|file| *file != path)
        .flat_map(|file| production_lines(&file).into_iter().map(|(_, line)| line))
        .collect();

    production_lines(&path)
        .into_iter()
        .filter_map(|(_, line)| {
            let rest = line.trim_start().strip_prefix("pub fn ")?;
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .filter(|name| {
            let call = format!("{module}::{name}(");
            !callers.iter().any(|line| line.contains(&call))
        })
        .collect()
}
