//! MeshViewer - 网格几何后处理库
//!
//! 加载 3D 模型后，把导入器给出的原始数据整理为渲染就绪的网格：
//! 焊接接缝处的重复顶点、重建并平滑法线、计算切线空间，
//! 并用脏标记告诉渲染端哪些缓冲区需要重新上传。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 向量类型与数学工具
//! - `geometry`: 几何后处理与模型加载
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_viewer::core::Config;
//! use mesh_viewer::geometry::{import_shapes, loaders::load_shapes};
//! use std::path::Path;
//!
//! let config = Config::default();
//! let shapes = load_shapes(Path::new(&config.model.path))?;
//!
//! for mut mesh in import_shapes(shapes, &config)? {
//!     let vertices = mesh.interleave();
//!     let dirty = mesh.take_dirty();
//!     println!("{}: {} 个顶点, 待上传 {:?}", mesh.name, vertices.len(), dirty);
//! }
//! # Ok::<(), mesh_viewer::core::ViewerError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod math;
