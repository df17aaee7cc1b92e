//! 顶点-三角形邻接关系
//!
//! 为每个顶点记录引用它的三角形索引。管线本身不依赖它，供后续空间查询使用。

use super::mesh::Triangle;

/// 三角形的三个索引是否都小于顶点数
#[inline]
pub fn triangle_in_range(triangle: &Triangle, vertex_count: usize) -> bool {
    triangle.iter().all(|&i| (i as usize) < vertex_count)
}

/// 构建顶点到三角形的邻接表
///
/// `triangles` 为空时直接返回，保留 `lists` 中已有的内容。
/// 否则 `lists` 被重置为 `vertex_count` 个空表，再按三角形顺序填入。
/// 任一索引越界的三角形整个跳过，不做部分登记。
///
/// # 返回
///
/// 被跳过的三角形数量
pub fn build_vertex_triangles(
    triangles: &[Triangle],
    vertex_count: usize,
    lists: &mut Vec<Vec<usize>>,
) -> usize {
    if triangles.is_empty() {
        return 0;
    }

    lists.clear();
    lists.resize_with(vertex_count, Vec::new);

    let mut skipped = 0;
    for (t, triangle) in triangles.iter().enumerate() {
        if !triangle_in_range(triangle, vertex_count) {
            skipped += 1;
            continue;
        }

        for &i in triangle {
            let list = &mut lists[i as usize];
            // 同一三角形重复引用一个顶点时只登记一次
            if list.last() != Some(&t) {
                list.push(t);
            }
        }
    }

    skipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_adjacency() {
        let triangles = [[0, 1, 2], [0, 2, 3]];
        let mut lists = Vec::new();

        let skipped = build_vertex_triangles(&triangles, 4, &mut lists);

        assert_eq!(skipped, 0);
        assert_eq!(lists, vec![vec![0, 1], vec![0], vec![0, 1], vec![1]]);
    }

    #[test]
    fn test_out_of_range_triangle_skipped_entirely() {
        let triangles = [[0, 1, 2], [1, 2, 7]];
        let mut lists = Vec::new();

        let skipped = build_vertex_triangles(&triangles, 3, &mut lists);

        assert_eq!(skipped, 1);
        // 三角形 1 在顶点 1、2 上也不应出现
        assert_eq!(lists, vec![vec![0], vec![0], vec![0]]);
    }

    #[test]
    fn test_empty_triangles_keeps_existing() {
        let mut lists = vec![vec![4], vec![5, 6]];

        build_vertex_triangles(&[], 2, &mut lists);

        assert_eq!(lists, vec![vec![4], vec![5, 6]]);
    }

    #[test]
    fn test_rebuild_resets_lists() {
        let mut lists = vec![vec![9, 9], vec![9], vec![9], vec![9], vec![9]];

        build_vertex_triangles(&[[0, 1, 2]], 3, &mut lists);

        assert_eq!(lists, vec![vec![0], vec![0], vec![0]]);
    }

    #[test]
    fn test_degenerate_index_registered_once() {
        let mut lists = Vec::new();

        build_vertex_triangles(&[[0, 0, 1]], 2, &mut lists);

        assert_eq!(lists, vec![vec![0], vec![0]]);
    }
}
