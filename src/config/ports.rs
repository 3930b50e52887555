use std::path::PathBuf;
use crate::error::Result;

// 應用配置結構體，封裝所有子命令共用的參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dear_omg_path: PathBuf,
    pub json: bool,
    pub no_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}
