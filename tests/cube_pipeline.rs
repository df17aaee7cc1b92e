//! 立方体端到端测试
//!
//! 每个面 4 个独立顶点（共 24 个），每个角被 3 个面复制，模拟导入器在 UV 接缝处拆分顶点。

use mesh_viewer::geometry::{weld, DirtyAttributes, Mesh, Vertex};
use mesh_viewer::math::utils::deg_to_rad;
use mesh_viewer::math::{Vector2, Vector3};

/// 面法线与该面的 (U, V) 方向，满足 U × V = N
fn cube_faces() -> [(Vector3, Vector3, Vector3); 6] {
    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();
    [
        (x, -z, y),
        (-x, z, y),
        (y, x, -z),
        (-y, x, z),
        (z, x, y),
        (-z, -x, y),
    ]
}

fn cube_mesh() -> Mesh {
    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut triangles = Vec::new();

    for (n, u, v) in cube_faces() {
        let base = positions.len() as u32;
        for (su, sv) in [(-0.5_f32, -0.5_f32), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            positions.push(n * 0.5_f32 + u * su + v * sv);
        }
        uvs.extend([
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ]);
        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
    }

    Mesh::new("Cube", positions, triangles).with_uvs(uvs).unwrap()
}

fn assert_vec_eq(a: &Vector3, b: &Vector3) {
    assert!((a - b).norm() < 1e-5, "{:?} != {:?}", a, b);
}

#[test]
fn cube_corners_weld_into_groups_of_three() {
    let mut mesh = cube_mesh();
    mesh.calculate_welded_vertices();

    let welds = mesh.welded_vertices();
    assert_eq!(welds.len(), 24);
    for partners in welds.values() {
        assert_eq!(partners.len(), 2);
    }
    assert_eq!(weld::weld_groups(welds).len(), 8);
}

#[test]
fn hard_edges_survive_default_threshold() {
    let mut mesh = cube_mesh();
    mesh.process();

    // 相邻面夹角 90°，大于默认的 60° 阈值，法线保持平面法线
    for (face, (n, u, v)) in cube_faces().iter().enumerate() {
        for i in face * 4..face * 4 + 4 {
            assert_vec_eq(&mesh.normals[i], n);
            assert_vec_eq(&mesh.tangents[i], u);
            assert_vec_eq(&mesh.bitangents[i], v);
        }
    }
}

#[test]
fn wide_threshold_rounds_corners() {
    let mut mesh = cube_mesh();
    mesh.settings.seam_angle = deg_to_rad(100.0);
    mesh.process();

    for i in 0..mesh.vertex_count() {
        let corner = mesh.positions[i].normalize();
        assert_vec_eq(&mesh.normals[i], &corner);

        let (n, t, b) = (mesh.normals[i], mesh.tangents[i], mesh.bitangents[i]);
        assert!((t.norm() - 1.0).abs() < 1e-5);
        assert!(n.dot(&t).abs() < 1e-5);
        assert!(n.dot(&b).abs() < 1e-5);
        assert!(t.dot(&b).abs() < 1e-5);
    }
}

#[test]
fn processing_twice_is_stable() {
    let mut mesh = cube_mesh();
    mesh.process();
    let normals = mesh.normals.clone();
    let tangents = mesh.tangents.clone();
    let bitangents = mesh.bitangents.clone();

    mesh.process();

    assert_eq!(mesh.normals, normals);
    assert_eq!(mesh.tangents, tangents);
    assert_eq!(mesh.bitangents, bitangents);
}

#[test]
fn adjacency_covers_every_vertex() {
    let mut mesh = cube_mesh();
    mesh.build_triangle_adjacency();

    let lists = mesh.vertex_triangles();
    assert_eq!(lists.len(), 24);
    // 每个面的第 0、2 个顶点属于两个三角形，其余属于一个
    for face in 0..6 {
        let base = face * 4;
        assert_eq!(lists[base], vec![face * 2, face * 2 + 1]);
        assert_eq!(lists[base + 1], vec![face * 2]);
        assert_eq!(lists[base + 2], vec![face * 2, face * 2 + 1]);
        assert_eq!(lists[base + 3], vec![face * 2 + 1]);
    }
}

#[test]
fn upload_handoff() {
    let mut mesh = cube_mesh();
    mesh.process();

    let dirty = mesh.take_dirty();
    assert!(dirty.contains(
        DirtyAttributes::POSITIONS
            | DirtyAttributes::NORMALS
            | DirtyAttributes::TANGENT_FRAME
            | DirtyAttributes::TEXCOORDS
            | DirtyAttributes::INDICES
    ));
    assert!(mesh.take_dirty().is_empty());

    let vertices = mesh.interleave();
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    assert_eq!(bytes.len(), 24 * std::mem::size_of::<Vertex>());
    assert_eq!(mesh.index_data().len(), 36);

    // 只重算切线空间时，只有切线和副切线被标记
    mesh.calc_tangent_space();
    assert_eq!(mesh.take_dirty(), DirtyAttributes::TANGENT_FRAME);
}
