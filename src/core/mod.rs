//! 核心功能模块
//!
//! 提供查看器的基础设施：日志系统、配置管理和错误处理。
//! 这些模块独立于几何处理和渲染后端。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 `tracing` 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件和命令行加载设置
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, ViewerError, ConfigError, MeshLoadError};
pub use config::Config;
