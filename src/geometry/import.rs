//! 导入数据到网格的转换
//!
//! 解析器只负责把文件解码成 [`ImportedShape`]，本模块负责：
//!
//! - 可选的游戏空间到网格空间的坐标转换
//! - 组装 [`Mesh`] 并校验数组长度
//! - 运行加载期后处理流程（[`Mesh::process`]）

use tracing::info;

use super::mesh::{Mesh, ProcessingSettings, Triangle};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::math::{Vector2, Vector3};

/// 解析器输出的单个形状
#[derive(Debug, Clone, Default)]
pub struct ImportedShape {
    /// 形状名称
    pub name: String,

    /// 顶点位置
    pub positions: Vec<Vector3>,

    /// 三角形索引（已三角化）
    pub triangles: Vec<Triangle>,

    /// 文件自带的法线
    pub normals: Option<Vec<Vector3>>,

    /// 纹理坐标（V 轴已翻转）
    pub uvs: Option<Vec<Vector2>>,
}

/// 游戏空间位置转换到网格空间
///
/// 先按 `(-s, s, s)` 缩放，再交换 Y 与 Z。
#[inline]
pub fn game_to_mesh_position(position: &Vector3, scale: f32) -> Vector3 {
    Vector3::new(-position.x / scale, position.z / scale, position.y / scale)
}

/// 游戏空间法线转换到网格空间：`(x, y, z) -> (-x, z, y)`
///
/// 与位置转换同样是两次反射，三角形绕向保持不变。
#[inline]
pub fn game_to_mesh_normal(normal: &Vector3) -> Vector3 {
    Vector3::new(-normal.x, normal.z, normal.y)
}

impl ImportedShape {
    /// 原地把位置和法线从游戏空间转换到网格空间
    pub fn convert_game_space(&mut self, scale: f32) {
        for position in &mut self.positions {
            *position = game_to_mesh_position(position, scale);
        }
        if let Some(normals) = &mut self.normals {
            for normal in normals {
                *normal = game_to_mesh_normal(normal);
            }
        }
    }

    /// 组装网格（不运行后处理）
    pub fn into_mesh(self, settings: ProcessingSettings) -> Result<Mesh> {
        let mut mesh = Mesh::new(self.name, self.positions, self.triangles).with_settings(settings);

        if let Some(normals) = self.normals.filter(|n| !n.is_empty()) {
            mesh = mesh.with_normals(normals)?;
        }
        if let Some(uvs) = self.uvs.filter(|uv| !uv.is_empty()) {
            mesh = mesh.with_uvs(uvs)?;
        }

        Ok(mesh)
    }
}

/// 按配置把导入的形状转换为处理完成的网格
pub fn import_shapes(shapes: Vec<ImportedShape>, config: &Config) -> Result<Vec<Mesh>> {
    let settings = ProcessingSettings::from(&config.processing);

    shapes
        .into_iter()
        .map(|mut shape| -> Result<Mesh> {
            if config.import.convert_game_space {
                shape.convert_game_space(config.import.game_space_scale);
            }

            let mut mesh = shape.into_mesh(settings)?;
            mesh.validate()?;
            mesh.process();

            info!(
                mesh = %mesh.name,
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                welded = mesh.welded_vertices().len(),
                "Imported mesh"
            );

            Ok(mesh)
        })
        .collect()
}
