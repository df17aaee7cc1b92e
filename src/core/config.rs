//! 配置管理模块
//!
//! 提供查看器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [model]
//! path = "meshes/coin.obj"
//!
//! [import]
//! convert_game_space = false
//! game_space_scale = 10.0
//!
//! [processing]
//! smooth_seam_normals = true
//! seam_angle_degrees = 60.0
//! recompute_normals = true
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::math::constants::DEFAULT_SEAM_ANGLE_DEGREES;

/// 查看器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 导入配置
    #[serde(default)]
    pub import: ImportConfig,

    /// 几何后处理配置
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    #[serde(default = "default_model_path")]
    pub path: String,
}

/// 导入配置
///
/// 游戏资源通常是 Z 轴向上、单位放大约 10 倍的坐标系，
/// 开启 `convert_game_space` 后在导入时转换到查看器的 Y 轴向上坐标系。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// 是否进行游戏坐标系到网格坐标系的转换
    #[serde(default)]
    pub convert_game_space: bool,

    /// 游戏坐标系缩放因子
    #[serde(default = "default_game_space_scale")]
    pub game_space_scale: f32,
}

/// 几何后处理配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// 是否在 UV 接缝处平滑法线
    #[serde(default = "default_smooth_seam_normals")]
    pub smooth_seam_normals: bool,

    /// 接缝平滑角度阈值（度）
    #[serde(default = "default_seam_angle")]
    pub seam_angle_degrees: f32,

    /// 导入数据自带法线时是否仍然重新计算
    #[serde(default = "default_recompute_normals")]
    pub recompute_normals: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_model_path() -> String { "assets/model.obj".to_string() }
fn default_game_space_scale() -> f32 { 10.0 }
fn default_smooth_seam_normals() -> bool { true }
fn default_seam_angle() -> f32 { DEFAULT_SEAM_ANGLE_DEGREES }
fn default_recompute_normals() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_viewer.log".to_string() }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            convert_game_space: false,
            game_space_scale: default_game_space_scale(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            smooth_seam_normals: default_smooth_seam_normals(),
            seam_angle_degrees: default_seam_angle(),
            recompute_normals: default_recompute_normals(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use mesh_viewer::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), mesh_viewer::core::ViewerError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--model <path>`: 模型文件路径
    /// - `--no-seam-smoothing`: 关闭接缝法线平滑
    /// - `--seam-angle <deg>`: 接缝平滑角度阈值
    /// - `--game-space`: 开启游戏坐标系转换
    /// - `--keep-normals`: 保留导入的法线
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--model") {
            if let Some(path) = args.get(idx + 1) {
                self.model.path = path.clone();
            }
        }

        if args.iter().any(|a| a == "--no-seam-smoothing") {
            self.processing.smooth_seam_normals = false;
        }

        if let Some(idx) = args.iter().position(|a| a == "--seam-angle") {
            if let Some(angle_str) = args.get(idx + 1) {
                if let Ok(angle) = angle_str.parse() {
                    self.processing.seam_angle_degrees = angle;
                }
            }
        }

        if args.iter().any(|a| a == "--game-space") {
            self.import.convert_game_space = true;
        }

        if args.iter().any(|a| a == "--keep-normals") {
            self.processing.recompute_normals = false;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        let angle = self.processing.seam_angle_degrees;
        if !(angle > 0.0 && angle <= 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "processing.seam_angle_degrees".to_string(),
                reason: format!("Angle must be in (0, 180], got {}", angle),
            }.into());
        }

        let scale = self.import.game_space_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "import.game_space_scale".to_string(),
                reason: "Scale must be a positive finite number".to_string(),
            }.into());
        }

        if self.model.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model.path".to_string(),
                reason: "Model path must not be empty".to_string(),
            }.into());
        }

        Ok(())
    }
}
