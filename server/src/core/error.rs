use thiserror::Error;

/// 服务器启动阶段的错误
///
/// 请求处理阶段的错误用 [`crate::utils::AppError`]，
/// 这里只覆盖启动、初始化和关闭流程。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
