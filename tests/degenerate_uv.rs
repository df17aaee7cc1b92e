//! UV 退化与几何退化情况下的切线空间

use mesh_viewer::geometry::Mesh;
use mesh_viewer::math::{Vector2, Vector3};

fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}

fn assert_vec_eq(a: &Vector3, b: &Vector3) {
    assert!((a - b).norm() < 1e-5, "{:?} != {:?}", a, b);
}

fn flat_quad(uvs: Vec<Vector2>) -> Mesh {
    Mesh::new(
        "Quad",
        vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .with_uvs(uvs)
    .unwrap()
}

#[test]
fn collapsed_uvs_use_fallback_frame() {
    let mut mesh = flat_quad(vec![Vector2::new(0.25, 0.75); 4]);
    mesh.process();

    for i in 0..4 {
        assert_vec_eq(&mesh.normals[i], &v(0.0, 0.0, 1.0));
        assert_vec_eq(&mesh.tangents[i], &v(0.0, 1.0, 0.0));
        assert_vec_eq(&mesh.bitangents[i], &v(-1.0, 0.0, 0.0));
    }
}

#[test]
fn degenerate_triangle_does_not_pollute_shared_vertex() {
    // 三角形 0 的 UV 正常，三角形 1 的 UV 全部重合在顶点 0 上
    let mut mesh = Mesh::new(
        "Mixed",
        vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(-1.0, 0.0, 0.0),
            v(0.0, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 3, 4]],
    )
    .with_uvs(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(0.0, 0.0),
        Vector2::new(0.0, 0.0),
    ])
    .unwrap();

    mesh.process();

    assert_vec_eq(&mesh.tangents[0], &v(1.0, 0.0, 0.0));
    assert_vec_eq(&mesh.bitangents[0], &v(0.0, 1.0, 0.0));
    assert_vec_eq(&mesh.tangents[3], &v(0.0, 1.0, 0.0));
}

#[test]
fn zero_area_triangle_stays_finite() {
    let mut mesh = Mesh::new(
        "Sliver",
        vec![v(0.0, 0.0, 0.0), v(1.0, 1.0, 1.0), v(2.0, 2.0, 2.0)],
        vec![[0, 1, 2]],
    )
    .with_uvs(vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)])
    .unwrap();

    mesh.process();

    for buffer in [&mesh.normals, &mesh.tangents, &mesh.bitangents] {
        for vector in buffer {
            assert!(vector.iter().all(|c| c.is_finite()));
        }
    }
    assert_eq!(mesh.normals[0], Vector3::zeros());
}

#[test]
fn out_of_range_triangle_never_panics() {
    let mut mesh = flat_quad(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(0.0, 1.0),
    ]);
    mesh.triangles.push([1, 2, 40]);

    mesh.process();

    assert_eq!(mesh.out_of_range_triangles(), 1);
    assert_eq!(mesh.vertex_triangles()[2], vec![0, 1]);
    assert_vec_eq(&mesh.normals[1], &v(0.0, 0.0, 1.0));
    assert_vec_eq(&mesh.tangents[1], &v(1.0, 0.0, 0.0));
}
