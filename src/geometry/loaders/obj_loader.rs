//! OBJ 文件加载器
//!
//! 使用 tobj crate 加载 Wavefront OBJ 格式的3D模型，每个 OBJ 对象对应一个 [`ImportedShape`]。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::import::ImportedShape;
use crate::math::{Vector2, Vector3};
use std::path::Path;

/// OBJ 格式加载器
///
/// # 特性
///
/// - 自动三角化
/// - 单一索引（位置、法线、UV 共用一套索引，接缝处顶点会被复制）
/// - UV 坐标翻转（V轴：1.0 - v）
/// - 材质文件被忽略
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }

    fn shapes_from_models(models: Vec<tobj::Model>) -> Result<Vec<ImportedShape>> {
        if models.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ 文件不包含任何模型".to_string()).into());
        }

        models.into_iter().map(Self::shape_from_model).collect()
    }

    fn shape_from_model(model: tobj::Model) -> Result<ImportedShape> {
        let mesh = model.mesh;

        if mesh.positions.len() % 3 != 0 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "顶点位置数据不完整: {} 个浮点数",
                mesh.positions.len()
            ))
            .into());
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "索引数量不是 3 的倍数: {}",
                mesh.indices.len()
            ))
            .into());
        }

        let positions: Vec<Vector3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();

        let normals = (!mesh.normals.is_empty()).then(|| {
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2]))
                .collect::<Vec<_>>()
        });

        // 翻转 V 坐标
        let uvs = (!mesh.texcoords.is_empty()).then(|| {
            mesh.texcoords
                .chunks_exact(2)
                .map(|t| Vector2::new(t[0], 1.0 - t[1]))
                .collect::<Vec<_>>()
        });

        let triangles = mesh
            .indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        tracing::debug!(
            shape = %model.name,
            vertices = positions.len(),
            has_normals = normals.is_some(),
            has_uvs = uvs.is_some(),
            "Decoded OBJ model"
        );

        Ok(ImportedShape {
            name: model.name,
            positions,
            triangles,
            normals,
            uvs,
        })
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Vec<ImportedShape>> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let (models, _materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        let shapes = Self::shapes_from_models(models)?;
        tracing::info!("成功加载 OBJ 文件 {}: {} 个形状", path.display(), shapes.len());

        Ok(shapes)
    }

    fn load_from_memory(data: &[u8]) -> Result<Vec<ImportedShape>> {
        let mut reader = data;

        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::shapes_from_models(models)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
