//! GPU 顶点定义模块
//!
//! 定义上传到顶点缓冲区的交错顶点结构，包含位置、法线、UV 坐标和完整的切线空间。

use bytemuck::{Pod, Zeroable};

/// 交错排列的顶点
///
/// 由 [`Mesh::interleave`](super::mesh::Mesh::interleave) 从并行属性数组生成。
/// 内存布局与 GPU 兼容，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - tangent: 12 bytes (3 * f32)
/// - bitangent: 12 bytes (3 * f32)
/// - **总计**: 56 bytes
///
/// # 示例
///
/// ```rust
/// use mesh_viewer::geometry::vertex::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     texcoord: [0.5, 0.5],
///     tangent: [1.0, 0.0, 0.0],
///     bitangent: [0.0, 0.0, -1.0],
/// };
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), 56);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    ///
    /// 网格没有 UV 时为 (0, 0)。
    pub texcoord: [f32; 2],

    /// 切线向量 (tx, ty, tz)，沿纹理 U 增大方向
    pub tangent: [f32; 3],

    /// 副切线向量 (bx, by, bz)，沿纹理 V 增大方向
    pub bitangent: [f32; 3],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        texcoord: [f32; 2],
        tangent: [f32; 3],
        bitangent: [f32; 3],
    ) -> Self {
        Self {
            position,
            normal,
            texcoord,
            tangent,
            bitangent,
        }
    }
}
