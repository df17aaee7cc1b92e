//! 几何体加载和后处理模块
//!
//! 把导入器输出的原始顶点、三角形、法线和 UV 数据整理成可直接渲染的网格：
//! 接缝处法线连续，并带有完整的切线空间。
//!
//! # 模块结构
//!
//! - `adjacency`: 顶点到三角形的邻接表
//! - `weld`: 按位置焊接接缝处的重复顶点
//! - `normals`: 面积加权的顶点法线与接缝平滑
//! - `tangents`: 切线与副切线计算
//! - `dirty`: 按属性的脏标记
//! - `mesh`: 网格容器，串联以上各阶段
//! - `vertex`: 交错排列的 GPU 顶点
//! - `import`: 导入数据到网格的转换
//! - `loaders`: 各种格式的模型加载器
//!
//! # 处理流程
//!
//! ```text
//! 文件 (OBJ)
//!     ↓
//! Loader (ObjLoader) → ImportedShape
//!     ↓
//! Mesh::process
//!     ├─ 邻接表
//!     ├─ 法线重建 → 焊接 → 接缝平滑
//!     └─ 切线空间
//!     ↓
//! Mesh::interleave + take_dirty (交给渲染端上传)
//! ```

pub mod adjacency;
pub mod dirty;
pub mod import;
pub mod loaders;
pub mod mesh;
pub mod normals;
pub mod tangents;
pub mod vertex;
pub mod weld;

// 重新导出常用类型
pub use dirty::DirtyAttributes;
pub use import::{import_shapes, ImportedShape};
pub use mesh::{Mesh, ProcessingSettings, Triangle};
pub use vertex::Vertex;
pub use weld::WeldMap;
