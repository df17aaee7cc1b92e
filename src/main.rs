//! MeshViewer - 网格查看器
//!
//! 加载模型文件，执行几何后处理（顶点焊接、法线平滑、切线空间），
//! 并生成可直接上传到 GPU 的交错顶点和索引数据。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 指定模型并关闭接缝平滑（命令行覆盖）
//! cargo run -- --model assets/crate.obj --no-seam-smoothing
//! ```
//!
//! # 处理流程
//!
//! ```text
//! config.toml + 命令行参数
//!        │
//! ┌──────▼──────┐
//! │   Loader    │  解码模型文件
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Mesh     │  邻接 → 焊接 → 法线 → 切线
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Upload    │  交错顶点 + 脏标记
//! └─────────────┘
//! ```

use std::path::Path;

use anyhow::Context;
use mesh_viewer::core::{log, Config};
use mesh_viewer::geometry::{import_shapes, loaders::load_shapes, weld};
use tracing::{debug, info};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 加载模型并执行后处理
/// 6. 生成上传数据并清除脏标记
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file);

    info!(version = env!("CARGO_PKG_VERSION"), "MeshViewer starting...");
    info!(
        model = %config.model.path,
        smooth_seams = config.processing.smooth_seam_normals,
        seam_angle = config.processing.seam_angle_degrees,
        game_space = config.import.convert_game_space,
        "Processing configuration"
    );

    // 5. 加载与后处理
    let shapes = load_shapes(Path::new(&config.model.path))
        .with_context(|| format!("Failed to load model '{}'", config.model.path))?;
    let mut meshes = import_shapes(shapes, &config).context("Failed to import meshes")?;

    // 6. 交给渲染端：生成上传数据后清除脏标记
    let mut total_vertices = 0;
    let mut total_triangles = 0;

    for mesh in &mut meshes {
        let vertices = mesh.interleave();
        let indices = mesh.index_data();
        let uploaded = mesh.take_dirty();

        debug!(
            mesh = %mesh.name,
            vertex_bytes = std::mem::size_of_val(vertices.as_slice()),
            index_count = indices.len(),
            weld_groups = weld::weld_groups(mesh.welded_vertices()).len(),
            attributes = ?uploaded,
            "Prepared mesh upload"
        );

        total_vertices += mesh.vertex_count();
        total_triangles += mesh.triangle_count();
    }

    info!(
        meshes = meshes.len(),
        vertices = total_vertices,
        triangles = total_triangles,
        "Model ready"
    );

    Ok(())
}
