//! UV 接缝顶点焊接
//!
//! 导入器会在纹理接缝处复制顶点以携带不同的 UV，这些副本位置相同但索引不同。
//! 本模块找出位置在容差内重合的顶点组，建立对称的"焊接"关系，
//! 供法线平滑在接缝两侧混合法线，而不改变实际拓扑。
//!
//! # 算法
//!
//! 1. 按 X 坐标升序排序顶点索引
//! 2. 依次以未使用的顶点 `i` 为种子，向后扫描未使用的顶点 `j`：
//!    - `X[j] - X[i] >= ε`：后面不可能再匹配，提前结束
//!    - `|Y[j] - Y[i]| >= ε` 或 `|Z[j] - Z[i]| >= ε`：跳过 `j`，继续扫描
//!    - 否则 `j` 加入种子 `i` 的匹配组并标记为已使用
//! 3. 每个匹配组的每个成员记录组内其他所有成员
//!
//! 该扫描只在 X 轴上剪枝，匹配结果取决于种子顺序，焊接关系不具传递性。

use std::collections::BTreeMap;

use crate::math::Vector3;

/// 焊接关系：顶点索引 -> 与之位置重合的其他顶点索引
///
/// 关系是对称的：若 B 在 A 的列表中，则 A 也在 B 的列表中。
/// 没有焊接伙伴的顶点不出现在表中。
pub type WeldMap = BTreeMap<u32, Vec<u32>>;

/// 查找位置重合的顶点并建立焊接关系
///
/// # 参数
///
/// - `positions`: 顶点位置
/// - `epsilon`: 单轴容差，差值恰好等于 `epsilon` 视为不匹配
pub fn find_welded_vertices(positions: &[Vector3], epsilon: f32) -> WeldMap {
    let vertex_count = positions.len();
    let mut welds = WeldMap::new();
    if vertex_count < 2 {
        return welds;
    }

    let mut sorted: Vec<u32> = (0..vertex_count as u32).collect();
    sorted.sort_by(|&a, &b| positions[a as usize].x.total_cmp(&positions[b as usize].x));

    // used 按排序后的位置索引
    let mut used = vec![false; vertex_count];
    let mut matches: Vec<Vec<u32>> = Vec::with_capacity(vertex_count / 2);

    for i in 0..vertex_count {
        if used[i] {
            continue;
        }

        let seed = positions[sorted[i] as usize];
        let mut group: Option<Vec<u32>> = None;

        for j in (i + 1)..vertex_count {
            if used[j] {
                continue;
            }

            let candidate = positions[sorted[j] as usize];

            if candidate.x - seed.x >= epsilon {
                break;
            }
            if (seed.y - candidate.y).abs() >= epsilon {
                continue;
            }
            if (seed.z - candidate.z).abs() >= epsilon {
                continue;
            }

            group.get_or_insert_with(|| vec![sorted[i]]).push(sorted[j]);
            used[j] = true;
        }

        if let Some(group) = group {
            matches.push(group);
        }
    }

    for group in &matches {
        for (j, &member) in group.iter().enumerate() {
            let partners = welds.entry(member).or_default();
            partners.extend(
                group
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != j)
                    .map(|(_, &other)| other),
            );
        }
    }

    welds
}

/// 从焊接关系中还原焊接组
///
/// 每组按顶点索引升序，组之间按最小索引升序。
pub fn weld_groups(welds: &WeldMap) -> Vec<Vec<u32>> {
    let mut groups = Vec::new();

    for (&vertex, partners) in welds {
        // 只由组内最小索引的顶点输出该组
        if partners.iter().any(|&p| p < vertex) {
            continue;
        }

        let mut group = Vec::with_capacity(partners.len() + 1);
        group.push(vertex);
        group.extend_from_slice(partners);
        group.sort_unstable();
        groups.push(group);
    }

    groups
}
