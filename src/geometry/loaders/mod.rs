//! 模型加载器模块
//!
//! 提供统一的模型加载接口。加载器只负责把文件解码为 [`ImportedShape`]，
//! 坐标转换和几何后处理由 [`import`](crate::geometry::import) 模块完成。
//!
//! # 支持的格式
//!
//! - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use mesh_viewer::geometry::loaders::load_shapes;
//! use std::path::Path;
//!
//! let shapes = load_shapes(Path::new("model.obj"))?;
//! println!("形状数: {}", shapes.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::import::ImportedShape;
use std::path::Path;

pub mod obj_loader;

pub use obj_loader::ObjLoader;

/// 模型加载器 trait
///
/// 所有格式的加载器都实现此 trait，加载器是无状态的（使用关联函数）。
pub trait MeshLoader {
    /// 从文件路径加载
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    fn load_from_file(path: &Path) -> Result<Vec<ImportedShape>>;

    /// 从内存数据加载
    fn load_from_memory(data: &[u8]) -> Result<Vec<ImportedShape>>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_shapes(path: &Path) -> Result<Vec<ImportedShape>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("无法确定文件扩展名".to_string()))?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        return ObjLoader::load_from_file(path);
    }

    Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ViewerError;

    #[test]
    fn test_unknown_extension() {
        let result = load_shapes(Path::new("model.fbx"));
        assert!(matches!(
            result,
            Err(ViewerError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_missing_extension() {
        assert!(load_shapes(Path::new("model")).is_err());
    }
}
