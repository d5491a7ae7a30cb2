#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

use mesh_prep::config::{Level, Pattern};

pub fn lvl(raw: u32) -> Level {
    Level::new(raw).unwrap()
}

pub fn pat(src: &str) -> Pattern {
    Pattern::new(src).unwrap()
}

const CUBE_FACES: [(&str, [[usize; 3]; 2]); 6] = [
    ("bottom", [[1, 3, 2], [1, 4, 3]]),
    ("top", [[5, 6, 7], [5, 7, 8]]),
    ("front", [[1, 2, 6], [1, 6, 5]]),
    ("back", [[3, 4, 8], [3, 8, 7]]),
    ("left", [[1, 5, 8], [1, 8, 4]]),
    ("right", [[2, 3, 7], [2, 7, 6]]),
];

/// Outward-oriented unit cube at `origin` as OBJ text.
///
/// With `per_face` every side becomes its own patch `<name>_<side>`;
/// otherwise the whole cube is the single patch `name`.
pub fn cube_obj(name: &str, origin: [f64; 3], per_face: bool) -> String {
    let mut obj = String::new();
    for [x, y, z] in [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ] {
        obj.push_str(&format!(
            "v {} {} {}\n",
            origin[0] + x,
            origin[1] + y,
            origin[2] + z
        ));
    }
    if !per_face {
        obj.push_str(&format!("g {name}\n"));
    }
    for (side, tris) in CUBE_FACES {
        if per_face {
            obj.push_str(&format!("g {name}_{side}\n"));
        }
        for [a, b, c] in tris {
            obj.push_str(&format!("f {a} {b} {c}\n"));
        }
    }
    obj
}

/// Writes `files` and `config.yml` into `dir`; returns the config path.
pub fn write_case(dir: &Path, files: &[(&str, String)], config: &str) -> PathBuf {
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
    let path = dir.join("config.yml");
    fs::write(&path, config).unwrap();
    path
}

/// Case configuration with the given geometry, regions and mesh controls
/// sections (already indented YAML list items, or empty).
pub fn config_yaml(geometry: &[&str], regions: &str, surfaces: &str, volumes: &str) -> String {
    fn section(body: &str) -> String {
        if body.is_empty() {
            " []\n".to_string()
        } else {
            format!("\n{body}")
        }
    }
    let geometry: String = geometry.iter().map(|g| format!("  - {g}\n")).collect();
    format!(
        "geometry:{}regions:{}mesh:\n  base_size: 0.5\n  buffer_cells: 4\n  feature_angle: 30\n  defaults:\n    target_level: 1\n    curvature_level: 1\n    feature_level: 2\n  surfaces:{}  volumes:{}",
        section(&geometry),
        section(regions),
        section(surfaces),
        section(volumes)
    )
}

/// All regular files below `dir`, sorted, relative to `dir`.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

/// Number of `l` elements in an exported edge file.
pub fn count_lines(path: &Path) -> usize {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| l.starts_with("l "))
        .count()
}
