use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_prep::classify::{ControlIndex, classify_features, classify_patches};
use mesh_prep::config::{Level, Mesh, MeshDefaults, MeshSurface, MeshVolume, Pattern, Region};
use mesh_prep::geometry::{Geometry, SurfaceMesh};

fn lvl(raw: u32) -> Level {
    Level::new(raw).expect("valid level")
}

fn pat(src: &str) -> Pattern {
    Pattern::new(src).expect("valid pattern")
}

/// Ridged `n x n` grid split into strips of `n / 8` rows, one patch per strip.
fn ridged_grid(n: usize) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::new();
    for j in 0..=n {
        for i in 0..=n {
            let z = if i % 2 == 0 { 0.0 } else { 0.5 };
            mesh.add_vertex([i as f64, j as f64, z]);
        }
    }
    let strip = (n / 8).max(1);
    let id = |i: usize, j: usize| j * (n + 1) + i;
    for j in 0..n {
        let name = if j / strip % 4 == 3 {
            format!("box_{}", j / strip)
        } else {
            format!("body_{}", j / strip)
        };
        let patch = mesh.add_patch(&name);
        for i in 0..n {
            mesh.add_face([id(i, j), id(i + 1, j), id(i + 1, j + 1)], patch)
                .expect("grid face");
            mesh.add_face([id(i, j), id(i + 1, j + 1), id(i, j + 1)], patch)
                .expect("grid face");
        }
    }
    mesh
}

fn mesh_controls() -> Mesh {
    let mut mesh = Mesh::new(0.5, 4, 30.0, MeshDefaults::new(lvl(1), lvl(1), lvl(2)));
    mesh.surfaces = vec![
        MeshSurface {
            feature_level: Some(lvl(4)),
            ..MeshSurface::new(pat("body_[02]"))
        },
        MeshSurface {
            feature_level: Some(lvl(3)),
            ..MeshSurface::new(pat("body_1"))
        },
    ];
    mesh.volumes = vec![MeshVolume::new(pat("box_.*"), lvl(3))];
    mesh
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let mesh = mesh_controls();
    let regions = vec![Region::fluid("air", pat("body_.*"), [0.0, 0.0, 10.0])];

    for &n in &[64usize, 256] {
        let geometry = ridged_grid(n);
        let index = ControlIndex::new(&mesh, &regions).expect("controls resolve");
        let classification = classify_patches(&geometry, &index).expect("all patches classify");

        group.bench_with_input(BenchmarkId::new("feature_edges", n), &n, |b, _| {
            b.iter(|| black_box(geometry.feature_edges(mesh.feature_angle_radians())));
        });

        group.bench_with_input(BenchmarkId::new("classify_patches", n), &n, |b, _| {
            b.iter(|| black_box(classify_patches(&geometry, &index).expect("classify")));
        });

        group.bench_with_input(BenchmarkId::new("classify_features", n), &n, |b, _| {
            b.iter(|| {
                let groups = classify_features(&geometry, mesh.feature_angle, &index, &classification)
                    .expect("features");
                black_box(groups);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
