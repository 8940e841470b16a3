//! Framery Server - 画框与艺术品电商的店面/后台服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (商品、订单、横幅、分类)
//! - **认证** (`auth`): JWT + Argon2 管理端认证
//! - **HTTP API** (`api`): 店面公开接口 + 管理端接口
//! - **定价** (`pricing`): Decimal 金额计算 (优惠价、运费、税)
//! - **订单** (`orders`): 订单号分配与状态流转表
//! - **购物车/结账** (`cart`/`checkout`): 纯函数购物车与三步结账向导
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repositories)
//! ├── pricing/       # 金额计算
//! ├── orders/        # 订单号、状态机
//! ├── cart/          # 购物车 reducer
//! ├── checkout/      # 结账向导
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

// Route assembly lives in api; alias kept for the server module
pub use api as routes;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: dotenv, 工作目录结构, 日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在时静默跳过
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.logs_dir();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logger_with_file(Some(&log_level), log_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______
   / ____/________ _____ ___  ___  _______  __
  / /_  / ___/ __ `/ __ `__ \/ _ \/ ___/ / / /
 / __/ / /  / /_/ / / / / / /  __/ /  / /_/ /
/_/   /_/   \__,_/_/ /_/ /_/\___/_/   \__, /
                                     /____/
    "#
    );
}
