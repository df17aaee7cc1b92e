//! 顶点法线重建与接缝平滑
//!
//! # 算法
//!
//! 1. 清零所有顶点法线
//! 2. 对每个三角形计算未归一化的叉积面法线（长度即两倍面积，天然按面积加权），
//!    累加到三个顶点
//! 3. 归一化所有顶点法线，只连接退化三角形的顶点保持零向量
//! 4. 对每个有焊接伙伴的顶点，把夹角小于阈值的伙伴法线与自身相加后归一化
//!
//! 第 4 步先基于混合前的法线算出全部结果，写入暂存区，最后统一写回，
//! 因此结果与顶点遍历顺序无关。

use super::adjacency::triangle_in_range;
use super::mesh::Triangle;
use super::weld::WeldMap;
use crate::math::{Vector3, Vector3Ext};

/// 计算三角形的未归一化面法线
///
/// 绕序决定方向：`(p2 - p1) × (p3 - p1)`。
#[inline]
pub fn face_normal(p1: &Vector3, p2: &Vector3, p3: &Vector3) -> Vector3 {
    (p2 - p1).cross(&(p3 - p1))
}

/// 从三角形面重建顶点法线
///
/// 越界的三角形被跳过。
///
/// # 返回
///
/// 被跳过的三角形数量
pub fn accumulate_face_normals(
    positions: &[Vector3],
    triangles: &[Triangle],
    normals: &mut [Vector3],
) -> usize {
    normals.fill(Vector3::zeros());

    let vertex_count = positions.len().min(normals.len());
    let mut skipped = 0;

    for triangle in triangles {
        if !triangle_in_range(triangle, vertex_count) {
            skipped += 1;
            continue;
        }

        let [i1, i2, i3] = triangle.map(|i| i as usize);
        let normal = face_normal(&positions[i1], &positions[i2], &positions[i3]);

        normals[i1] += normal;
        normals[i2] += normal;
        normals[i3] += normal;
    }

    for normal in normals.iter_mut() {
        *normal = normal.normalize_or_zero();
    }

    skipped
}

/// 在焊接顶点之间混合法线
///
/// # 参数
///
/// - `normals`: 已归一化的顶点法线
/// - `welds`: 焊接关系
/// - `threshold`: 角度阈值（弧度），夹角严格小于阈值的伙伴参与混合
///
/// # 返回
///
/// 被重写的顶点数量
pub fn blend_seam_normals(normals: &mut [Vector3], welds: &WeldMap, threshold: f32) -> usize {
    let vertex_count = normals.len();
    let mut staged: Vec<(usize, Vector3)> = Vec::with_capacity(welds.len());

    for (&vertex, partners) in welds {
        let vertex = vertex as usize;
        if vertex >= vertex_count {
            continue;
        }

        let normal = normals[vertex];
        let mut seam_normal = normal;

        for &partner in partners {
            let Some(partner_normal) = normals.get(partner as usize) else {
                continue;
            };

            if normal.angle_to(partner_normal) < threshold {
                seam_normal += partner_normal;
            }
        }

        staged.push((vertex, seam_normal.normalize_or_zero()));
    }

    let blended = staged.len();
    for (vertex, normal) in staged {
        normals[vertex] = normal;
    }

    blended
}
