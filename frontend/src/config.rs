//! Configuration for the frontend application

// API base URL - 编译时从环境变量读取，默认本地开发地址
pub const API_BASE: &str = match option_env!("OVERSEAS_BOARD_API_BASE") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

/// Like-status queries in flight while a post list loads.
pub const LIKE_REFRESH_CONCURRENCY: usize = 8;

/// Auto-dismiss delay of the error banner, in milliseconds.
pub const ERROR_BANNER_TIMEOUT_MS: u32 = 3000;
