use crate::config::config::Cli;
use crate::config::installation::default_root;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：目前工作目錄、文字輸出、顯示進度
pub struct DefaultConfigAdapter;

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        Ok(AppConfig {
            dear_omg_path: default_root()?,
            json: false,
            no_progress: false,
            log_level: "info".to_string(),
        })
    }
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        // 未指定 --dear-omg-path 或 DEAR_OMG_PATH 時使用目前工作目錄
        let dear_omg_path = match &self.cli.dear_omg_path {
            Some(path) => path.clone(),
            None => default_root()?,
        };
        Ok(AppConfig {
            dear_omg_path,
            json: self.cli.json,
            no_progress: self.cli.no_progress,
            log_level: self.cli.log_level.clone(),
        })
    }
}
