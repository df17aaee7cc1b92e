//! 切线空间计算
//!
//! 使用 UV 坐标导数计算每个顶点的切线与副切线，用于法线贴图。
//!
//! # 算法
//!
//! 1. 对于每个三角形 (v1, v2, v3):
//!    - 边向量: e1 = p2 - p1, e2 = p3 - p1
//!    - UV 差: (s1, t1) = uv2 - uv1, (s2, t2) = uv3 - uv1
//!    - 手性符号: r = s1 * t2 - s2 * t1，只保留符号
//!    - 切线方向: (t2 * e1 - t1 * e2) * sign(r)，归一化
//!    - 副切线方向: (s1 * e2 - s2 * e1) * sign(r)，归一化
//!    - 累加到三个顶点
//!
//! 2. 对每个顶点：
//!    - 切线或副切线累加结果为零向量时，用法线分量轮换构造一个与法线正交的切线，
//!      副切线取 `normal × tangent`
//!    - 否则切线对法线做 Gram-Schmidt 正交化并归一化，
//!      副切线先对法线、再对新切线正交化并归一化
//!
//! 正交化顺序固定为先切线后副切线，交换顺序会改变切线空间的手性一致性。

use super::adjacency::triangle_in_range;
use super::mesh::Triangle;
use crate::math::{Vector2, Vector3, Vector3Ext};

/// 计算三角形的切线与副切线方向（已归一化）
///
/// UV 跨度为零的三角形返回两个零向量。
pub fn triangle_tangents(
    positions: [&Vector3; 3],
    uvs: [&Vector2; 3],
) -> (Vector3, Vector3) {
    let e1 = positions[1] - positions[0];
    let e2 = positions[2] - positions[0];

    let s1 = uvs[1].x - uvs[0].x;
    let s2 = uvs[2].x - uvs[0].x;
    let t1 = uvs[1].y - uvs[0].y;
    let t2 = uvs[2].y - uvs[0].y;

    // 只取行列式的符号，不除以其大小
    let r = s1 * t2 - s2 * t1;
    let handedness: f32 = if r >= 0.0 { 1.0 } else { -1.0 };

    let s_dir = (e1 * t2 - e2 * t1) * handedness;
    let t_dir = (e2 * s1 - e1 * s2) * handedness;

    (s_dir.normalize_or_zero(), t_dir.normalize_or_zero())
}

/// 构造与法线正交的备用切线
///
/// 轮换法线分量 `(y, z, x)` 后对法线正交化。轴对齐法线下轮换结果本身已经正交。
/// 三个分量接近相等时轮换结果与法线近乎平行，改用与法线最不平行的坐标轴叉乘。
/// 零法线返回零向量。
pub fn fallback_tangent(normal: &Vector3) -> Vector3 {
    let permuted = Vector3::new(normal.y, normal.z, normal.x);
    if let Some(tangent) = (permuted - normal * normal.dot(&permuted)).try_normalize(1e-6) {
        return tangent;
    }
    if normal.is_exact_zero() {
        return Vector3::zeros();
    }

    let abs = normal.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    normal.cross(&axis).normalize_or_zero()
}

/// 计算顶点的切线空间
///
/// 切线与副切线每次都从零开始重新累加。越界的三角形被跳过。
///
/// # 前置条件
///
/// - `normals` 已经计算完成（通常是平滑后的法线）
/// - `uvs`、`normals`、`tangents`、`bitangents` 与 `positions` 等长
pub fn compute_tangent_space(
    positions: &[Vector3],
    uvs: &[Vector2],
    triangles: &[Triangle],
    normals: &[Vector3],
    tangents: &mut [Vector3],
    bitangents: &mut [Vector3],
) {
    tangents.fill(Vector3::zeros());
    bitangents.fill(Vector3::zeros());

    let vertex_count = positions
        .len()
        .min(uvs.len())
        .min(tangents.len())
        .min(bitangents.len());

    for triangle in triangles {
        if !triangle_in_range(triangle, vertex_count) {
            continue;
        }

        let [i1, i2, i3] = triangle.map(|i| i as usize);
        let (s_dir, t_dir) = triangle_tangents(
            [&positions[i1], &positions[i2], &positions[i3]],
            [&uvs[i1], &uvs[i2], &uvs[i3]],
        );

        for i in [i1, i2, i3] {
            tangents[i] += s_dir;
            bitangents[i] += t_dir;
        }
    }

    for ((tangent, bitangent), normal) in tangents
        .iter_mut()
        .zip(bitangents.iter_mut())
        .zip(normals.iter())
    {
        if tangent.is_exact_zero() || bitangent.is_exact_zero() {
            *tangent = fallback_tangent(normal);
            *bitangent = normal.cross(&*tangent);
            continue;
        }

        let t = *tangent - normal * normal.dot(&*tangent);
        let t = t.normalize_or_zero();

        let b = *bitangent - normal * normal.dot(&*bitangent);
        let b = b - t * t.dot(&b);

        *tangent = t;
        *bitangent = b.normalize_or_zero();
    }
}
