//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// 添加边时引用了未注册的顶点
    #[error("顶点超出范围（未注册）: {0}")]
    InvalidVertex(VertexId),

    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    /// 权重为 NaN 或负数
    #[error("无效的边权重: {0}")]
    InvalidWeight(f64),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("日志初始化失败: {0}")]
    LoggingError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}
