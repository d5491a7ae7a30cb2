mod util;
use util::*;

use mesh_prep::classify::{ControlIndex, FeatureGroups, classify_features, classify_patches};
use mesh_prep::config::{Mesh, MeshDefaults, MeshSurface, MeshVolume, Region};
use mesh_prep::geometry::{Geometry, SurfaceMesh};
use mesh_prep::io::SurfaceReader;
use mesh_prep::io::wavefront::ObjReader;

fn cube(per_face: bool) -> SurfaceMesh {
    ObjReader
        .read(cube_obj("body", [0.0; 3], per_face).as_bytes())
        .unwrap()
}

fn classify(
    geometry: &SurfaceMesh,
    angle: f64,
    surfaces: Vec<MeshSurface>,
    volumes: Vec<MeshVolume>,
) -> FeatureGroups {
    let mut mesh = Mesh::new(0.5, 4, angle, MeshDefaults::new(lvl(1), lvl(1), lvl(2)));
    mesh.surfaces = surfaces;
    mesh.volumes = volumes;
    let regions = vec![Region::fluid("air", pat("body.*"), [0.0, 0.0, 10.0])];
    let index = ControlIndex::new(&mesh, &regions).unwrap();
    let classification = classify_patches(geometry, &index).unwrap();
    classify_features(geometry, angle, &index, &classification).unwrap()
}

fn sizes(groups: &FeatureGroups) -> Vec<(u32, usize)> {
    groups
        .iter()
        .map(|(level, edges)| (u32::from(*level), edges.len()))
        .collect()
}

#[test]
fn cube_edges_are_features_below_right_angle() {
    let geometry = cube(false);
    assert_eq!(geometry.feature_edges(30f64.to_radians()).len(), 12);
    assert_eq!(sizes(&classify(&geometry, 30.0, vec![], vec![])), vec![(2, 12)]);
    assert!(classify(&geometry, 100.0, vec![], vec![]).is_empty());
}

#[test]
fn edge_takes_strictest_bordering_level() {
    let geometry = cube(true);
    let surfaces = vec![
        MeshSurface {
            feature_level: Some(lvl(1)),
            ..MeshSurface::new(pat("body_top"))
        },
        MeshSurface {
            feature_level: Some(lvl(3)),
            ..MeshSurface::new(pat("body_front"))
        },
    ];
    let groups = classify(&geometry, 30.0, surfaces, vec![]);
    // Top edges border a default side, so nothing stays at level 1.
    assert_eq!(sizes(&groups), vec![(2, 8), (3, 4)]);
}

#[test]
fn volume_controlled_sides_do_not_contribute() {
    let geometry = cube(true);
    let volumes = vec![MeshVolume::new(pat("body_bottom"), lvl(5))];
    let groups = classify(&geometry, 30.0, vec![], volumes);
    assert_eq!(sizes(&groups), vec![(2, 12)]);

    let bottom = geometry.patch_index("body_bottom").unwrap();
    for &i in &groups[&lvl(2)] {
        assert_ne!(geometry.edge(i).unwrap().patch, bottom);
    }
}

#[test]
fn open_boundary_edges_are_features() {
    let mut geometry = SurfaceMesh::new();
    let a = geometry.add_vertex([0.0, 0.0, 0.0]);
    let b = geometry.add_vertex([1.0, 0.0, 0.0]);
    let c = geometry.add_vertex([0.0, 1.0, 0.0]);
    let patch = geometry.add_patch("body_plate");
    geometry.add_face([a, b, c], patch).unwrap();

    let groups = classify(&geometry, 30.0, vec![], vec![]);
    assert_eq!(groups[&lvl(2)], vec![0, 1, 2]);
}
