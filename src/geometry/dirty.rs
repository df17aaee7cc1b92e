//! 顶点属性脏标记
//!
//! 几何处理阶段每修改一个 GPU 缓冲区对应的属性，就置上相应的位；
//! 渲染端上传该属性后清除。新增属性时只需添加一个位，上传循环遍历全部位即可。

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirtyAttributes: u8 {
        const POSITIONS = 1 << 0;
        const NORMALS = 1 << 1;
        const TANGENTS = 1 << 2;
        const BITANGENTS = 1 << 3;
        const VERTEX_COLORS = 1 << 4;
        const VERTEX_ALPHAS = 1 << 5;
        const TEXCOORDS = 1 << 6;
        const INDICES = 1 << 7;
    }
}

impl DirtyAttributes {
    /// 切线空间的两个缓冲区
    pub const TANGENT_FRAME: Self = Self::TANGENTS.union(Self::BITANGENTS);
}

impl Default for DirtyAttributes {
    fn default() -> Self {
        Self::empty()
    }
}
