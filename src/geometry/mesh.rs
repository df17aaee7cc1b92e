//! 网格数据结构模块
//!
//! 定义 CPU 侧的网格容器：并行的顶点属性数组、三角形索引、
//! 以及几何后处理产生的缓存（邻接表、焊接关系）和属性脏标记。

use tracing::{debug, warn};

use super::adjacency;
use super::dirty::DirtyAttributes;
use super::normals;
use super::tangents;
use super::vertex::Vertex;
use super::weld::{self, WeldMap};
use crate::core::config::ProcessingConfig;
use crate::core::error::{MeshLoadError, Result};
use crate::math::constants::{DEFAULT_SEAM_ANGLE_DEGREES, WELD_EPSILON};
use crate::math::utils::deg_to_rad;
use crate::math::{Vector2, Vector3};

/// 三角形的三个顶点索引
///
/// 顺序决定绕向：面法线 = (v1→v2) × (v1→v3)。
pub type Triangle = [u32; 3];

/// 几何后处理参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingSettings {
    /// 是否在焊接顶点之间混合法线
    pub smooth_seam_normals: bool,

    /// 接缝平滑角度阈值（弧度）
    pub seam_angle: f32,

    /// 焊接单轴容差
    pub weld_epsilon: f32,

    /// 导入数据自带法线时是否仍然重新计算
    pub recompute_normals: bool,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            smooth_seam_normals: true,
            seam_angle: deg_to_rad(DEFAULT_SEAM_ANGLE_DEGREES),
            weld_epsilon: WELD_EPSILON,
            recompute_normals: true,
        }
    }
}

impl From<&ProcessingConfig> for ProcessingSettings {
    fn from(config: &ProcessingConfig) -> Self {
        Self {
            smooth_seam_normals: config.smooth_seam_normals,
            seam_angle: deg_to_rad(config.seam_angle_degrees),
            weld_epsilon: WELD_EPSILON,
            recompute_normals: config.recompute_normals,
        }
    }
}

/// CPU 侧网格
///
/// 所有缓冲区由网格持有，后处理阶段只原地修改，不改变长度。
/// 每个阶段修改某个属性后置上对应的脏标记，渲染端上传后通过 [`Mesh::take_dirty`] 清除。
///
/// # 示例
///
/// ```rust
/// use mesh_viewer::geometry::Mesh;
/// use mesh_viewer::math::{Vector2, Vector3};
///
/// let mut mesh = Mesh::new(
///     "Triangle",
///     vec![
///         Vector3::new(0.0, 0.0, 0.0),
///         Vector3::new(1.0, 0.0, 0.0),
///         Vector3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// )
/// .with_uvs(vec![
///     Vector2::new(0.0, 0.0),
///     Vector2::new(1.0, 0.0),
///     Vector2::new(0.0, 1.0),
/// ])?;
///
/// mesh.process();
/// assert_eq!(mesh.normals[0], Vector3::new(0.0, 0.0, 1.0));
/// # Ok::<(), mesh_viewer::core::ViewerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    /// 网格名称
    pub name: String,

    /// 顶点位置（网格局部空间）
    pub positions: Vec<Vector3>,

    /// 顶点法线
    ///
    /// 平滑后为单位向量；只连接退化三角形的顶点保持零向量。
    pub normals: Vec<Vector3>,

    /// 顶点切线
    pub tangents: Vec<Vector3>,

    /// 顶点副切线
    pub bitangents: Vec<Vector3>,

    /// 纹理坐标（可选）
    ///
    /// 缺失时跳过切线空间计算。
    pub uvs: Option<Vec<Vector2>>,

    /// 顶点颜色（可选，后处理不修改）
    pub vertex_colors: Option<Vec<Vector3>>,

    /// 顶点透明度（可选，后处理不修改）
    pub vertex_alphas: Option<Vec<f32>>,

    /// 三角形索引
    pub triangles: Vec<Triangle>,

    /// 后处理参数
    pub settings: ProcessingSettings,

    has_imported_normals: bool,
    vertex_triangles: Vec<Vec<usize>>,
    welded_vertices: WeldMap,
    welds_computed: bool,
    dirty: DirtyAttributes,
}

impl Mesh {
    /// 从位置和三角形创建网格
    ///
    /// 法线、切线、副切线按顶点数分配并清零。所有已有属性初始为脏。
    pub fn new(name: impl Into<String>, positions: Vec<Vector3>, triangles: Vec<Triangle>) -> Self {
        let vertex_count = positions.len();

        Self {
            name: name.into(),
            positions,
            normals: vec![Vector3::zeros(); vertex_count],
            tangents: vec![Vector3::zeros(); vertex_count],
            bitangents: vec![Vector3::zeros(); vertex_count],
            uvs: None,
            vertex_colors: None,
            vertex_alphas: None,
            triangles,
            settings: ProcessingSettings::default(),
            has_imported_normals: false,
            vertex_triangles: Vec::new(),
            welded_vertices: WeldMap::new(),
            welds_computed: false,
            dirty: DirtyAttributes::POSITIONS
                | DirtyAttributes::NORMALS
                | DirtyAttributes::TANGENT_FRAME
                | DirtyAttributes::INDICES,
        }
    }

    /// 附加纹理坐标
    pub fn with_uvs(mut self, uvs: Vec<Vector2>) -> Result<Self> {
        self.check_len("uvs", uvs.len())?;
        self.uvs = Some(uvs);
        self.dirty |= DirtyAttributes::TEXCOORDS;
        Ok(self)
    }

    /// 附加导入的法线
    pub fn with_normals(mut self, normals: Vec<Vector3>) -> Result<Self> {
        self.check_len("normals", normals.len())?;
        self.normals = normals;
        self.has_imported_normals = true;
        Ok(self)
    }

    /// 附加顶点颜色
    pub fn with_vertex_colors(mut self, colors: Vec<Vector3>) -> Result<Self> {
        self.check_len("vertex_colors", colors.len())?;
        self.vertex_colors = Some(colors);
        self.dirty |= DirtyAttributes::VERTEX_COLORS;
        Ok(self)
    }

    /// 附加顶点透明度
    pub fn with_vertex_alphas(mut self, alphas: Vec<f32>) -> Result<Self> {
        self.check_len("vertex_alphas", alphas.len())?;
        self.vertex_alphas = Some(alphas);
        self.dirty |= DirtyAttributes::VERTEX_ALPHAS;
        Ok(self)
    }

    /// 设置后处理参数
    pub fn with_settings(mut self, settings: ProcessingSettings) -> Self {
        self.settings = settings;
        self
    }

    fn check_len(&self, attribute: &str, len: usize) -> Result<()> {
        if len != self.positions.len() {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "{} 数量 ({}) 与顶点数量 ({}) 不一致",
                attribute,
                len,
                self.positions.len()
            ))
            .into());
        }
        Ok(())
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// 是否带有纹理坐标
    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uvs.as_ref().is_some_and(|uvs| !uvs.is_empty())
    }

    /// 法线是否来自导入数据
    #[inline]
    pub fn has_imported_normals(&self) -> bool {
        self.has_imported_normals
    }

    /// 验证并行数组长度
    ///
    /// 字段是公开的，调用方修改后可用此方法确认缓冲区仍然一致。
    /// 越界的三角形不算错误，只在日志中报告，由各阶段跳过。
    pub fn validate(&self) -> Result<()> {
        self.check_len("normals", self.normals.len())?;
        self.check_len("tangents", self.tangents.len())?;
        self.check_len("bitangents", self.bitangents.len())?;
        if let Some(uvs) = &self.uvs {
            self.check_len("uvs", uvs.len())?;
        }
        if let Some(colors) = &self.vertex_colors {
            self.check_len("vertex_colors", colors.len())?;
        }
        if let Some(alphas) = &self.vertex_alphas {
            self.check_len("vertex_alphas", alphas.len())?;
        }

        let out_of_range = self.out_of_range_triangles();
        if out_of_range > 0 {
            warn!(mesh = %self.name, count = out_of_range, "Mesh has triangles with out-of-range indices");
        }

        Ok(())
    }

    /// 索引越界的三角形数量
    pub fn out_of_range_triangles(&self) -> usize {
        let vertex_count = self.vertex_count();
        self.triangles
            .iter()
            .filter(|t| !adjacency::triangle_in_range(t, vertex_count))
            .count()
    }

    // ------------------------------------------------------------------
    // 邻接关系
    // ------------------------------------------------------------------

    /// 构建顶点到三角形的邻接表
    ///
    /// 没有三角形时不做任何事，保留已有的邻接表。
    pub fn build_triangle_adjacency(&mut self) {
        let skipped = adjacency::build_vertex_triangles(
            &self.triangles,
            self.positions.len(),
            &mut self.vertex_triangles,
        );

        if skipped > 0 {
            warn!(mesh = %self.name, skipped, "Skipped triangles with out-of-range indices");
        }
        debug!(
            mesh = %self.name,
            vertices = self.vertex_triangles.len(),
            "Built triangle adjacency"
        );
    }

    /// 顶点到三角形的邻接表
    pub fn vertex_triangles(&self) -> &[Vec<usize>] {
        &self.vertex_triangles
    }

    // ------------------------------------------------------------------
    // 焊接
    // ------------------------------------------------------------------

    /// 计算焊接关系
    ///
    /// 结果被缓存，直到调用 [`Mesh::invalidate_welds`] 或 [`Mesh::invalidate_topology`]。
    pub fn calculate_welded_vertices(&mut self) {
        if self.welds_computed {
            return;
        }

        self.welded_vertices = weld::find_welded_vertices(&self.positions, self.settings.weld_epsilon);
        self.welds_computed = true;

        debug!(
            mesh = %self.name,
            welded = self.welded_vertices.len(),
            groups = weld::weld_groups(&self.welded_vertices).len(),
            "Calculated welded vertices"
        );
    }

    /// 焊接关系
    pub fn welded_vertices(&self) -> &WeldMap {
        &self.welded_vertices
    }

    /// 焊接关系是否已计算
    pub fn weld_groups_computed(&self) -> bool {
        self.welds_computed
    }

    /// 使焊接缓存失效，下次需要时重新计算
    pub fn invalidate_welds(&mut self) {
        self.welds_computed = false;
        self.welded_vertices.clear();
    }

    /// 顶点或三角形被替换后调用，清除邻接表和焊接缓存
    pub fn invalidate_topology(&mut self) {
        self.vertex_triangles.clear();
        self.invalidate_welds();
        self.dirty |= DirtyAttributes::POSITIONS | DirtyAttributes::INDICES;
    }

    // ------------------------------------------------------------------
    // 法线与切线空间
    // ------------------------------------------------------------------

    /// 重新计算顶点法线并在接缝处平滑
    ///
    /// 法线改变后切线空间随之失效，因此结束时会重新计算切线空间。
    pub fn smooth_normals(&mut self) {
        if self.normals.is_empty() {
            return;
        }

        let skipped = normals::accumulate_face_normals(&self.positions, &self.triangles, &mut self.normals);
        if skipped > 0 {
            warn!(mesh = %self.name, skipped, "Skipped triangles with out-of-range indices");
        }

        if self.settings.smooth_seam_normals {
            self.calculate_welded_vertices();

            let blended = normals::blend_seam_normals(
                &mut self.normals,
                &self.welded_vertices,
                self.settings.seam_angle,
            );
            debug!(mesh = %self.name, blended, "Blended seam normals");
        }

        self.dirty |= DirtyAttributes::NORMALS;
        self.calc_tangent_space();
    }

    /// 计算切线空间
    ///
    /// 没有法线或纹理坐标时不做任何事。
    pub fn calc_tangent_space(&mut self) {
        if self.normals.is_empty() {
            return;
        }
        let Some(uvs) = self.uvs.as_deref().filter(|uvs| !uvs.is_empty()) else {
            return;
        };

        tangents::compute_tangent_space(
            &self.positions,
            uvs,
            &self.triangles,
            &self.normals,
            &mut self.tangents,
            &mut self.bitangents,
        );

        self.dirty |= DirtyAttributes::TANGENT_FRAME;
        debug!(mesh = %self.name, "Calculated tangent space");
    }

    /// 加载后的完整后处理流程
    ///
    /// 1. 构建邻接表
    /// 2. 导入数据自带法线且不要求重算时：保留法线，只计算焊接关系和切线空间
    /// 3. 否则重建并平滑法线（随后自动计算切线空间）
    pub fn process(&mut self) {
        let _span = tracing::debug_span!("process_mesh", mesh = %self.name).entered();

        self.build_triangle_adjacency();

        if self.has_imported_normals && !self.settings.recompute_normals {
            self.calculate_welded_vertices();
            self.calc_tangent_space();
        } else {
            self.smooth_normals();
        }
    }

    // ------------------------------------------------------------------
    // 上传交接
    // ------------------------------------------------------------------

    /// 当前的脏属性集合
    pub fn dirty(&self) -> DirtyAttributes {
        self.dirty
    }

    /// 取出并清空脏属性集合
    ///
    /// 渲染端在上传返回的属性后调用。
    pub fn take_dirty(&mut self) -> DirtyAttributes {
        std::mem::take(&mut self.dirty)
    }

    /// 手动标记属性为脏
    pub fn mark_dirty(&mut self, attributes: DirtyAttributes) {
        self.dirty |= attributes;
    }

    /// 生成交错排列的 GPU 顶点数据
    pub fn interleave(&self) -> Vec<Vertex> {
        (0..self.vertex_count())
            .map(|i| {
                let texcoord = self
                    .uvs
                    .as_ref()
                    .and_then(|uvs| uvs.get(i))
                    .map(|uv| [uv.x, uv.y])
                    .unwrap_or_default();

                Vertex::new(
                    self.positions[i].into(),
                    self.normals.get(i).copied().unwrap_or_else(Vector3::zeros).into(),
                    texcoord,
                    self.tangents.get(i).copied().unwrap_or_else(Vector3::zeros).into(),
                    self.bitangents.get(i).copied().unwrap_or_else(Vector3::zeros).into(),
                )
            })
            .collect()
    }

    /// 展开三角形为索引数组
    pub fn index_data(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
