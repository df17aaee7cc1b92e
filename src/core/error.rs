//! 错误处理模块
//!
//! 定义了查看器中使用的统一错误类型。
//!
//! 几何后处理阶段本身不产生可恢复错误（越界三角形、退化三角形都会被静默跳过），
//! 这里的错误只出现在边界上：配置加载、模型解析、以及构造网格时的数组长度校验。

use std::fmt;
use std::path::PathBuf;

/// 查看器统一的 Result 类型
pub type Result<T> = std::result::Result<T, ViewerError>;

/// 查看器的错误类型
#[derive(Debug)]
pub enum ViewerError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 几何数据无效（并行数组长度不一致等构造期契约违例）
    InvalidGeometry(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Config(e) => write!(f, "Configuration error: {}", e),
            ViewerError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            ViewerError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Config(e) => Some(e),
            ViewerError::MeshLoading(e) => Some(e),
            ViewerError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        ViewerError::Config(err)
    }
}

impl From<MeshLoadError> for ViewerError {
    fn from(err: MeshLoadError) -> Self {
        ViewerError::MeshLoading(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_error_display() {
        let err: ViewerError = MeshLoadError::InvalidGeometry("uvs: 3 != 4".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Mesh loading error: Invalid geometry data: uvs: 3 != 4"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err: ViewerError = ConfigError::ParseError("bad toml".to_string()).into();
        assert!(err.source().is_some());
    }
}
