use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::DearOmgError;

/// 轉換後檔案的副檔名
pub const OMG_EXTENSION: &str = "omg";

/// 外部轉換程式種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Community,
    Vendor,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Community, ToolKind::Vendor];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Community => "community",
            ToolKind::Vendor => "vendor",
        }
    }

    /// 依副檔名（不分大小寫）判斷應使用的轉換程式
    pub fn for_path(path: &Path) -> Option<ToolKind> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        SUPPORTED_FORMATS
            .iter()
            .find(|format| format.extension[1..] == ext)
            .map(|format| format.tool)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SupportedFormat {
    pub extension: &'static str,
    pub tool: ToolKind,
}

/// 副檔名與轉換程式的對照表
pub const SUPPORTED_FORMATS: &[SupportedFormat] = &[
    SupportedFormat { extension: ".d", tool: ToolKind::Community },
    SupportedFormat { extension: ".imzml", tool: ToolKind::Community },
    SupportedFormat { extension: ".fastq", tool: ToolKind::Community },
    SupportedFormat { extension: ".wiff", tool: ToolKind::Vendor },
    SupportedFormat { extension: ".raw", tool: ToolKind::Vendor },
];

/// 轉換程式輸出的資料格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    #[default]
    Binary,
    Json,
    Yaml,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Binary => "binary",
            WriteMode::Json => "json",
            WriteMode::Yaml => "yaml",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteMode {
    type Err = DearOmgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(WriteMode::Binary),
            "json" => Ok(WriteMode::Json),
            "yaml" => Ok(WriteMode::Yaml),
            other => Err(DearOmgError::msg(format!(
                "寫入模式必須是 'binary'、'json' 或 'yaml'，收到 '{}'",
                other
            ))),
        }
    }
}

/// 解析程式讀取 OMG 檔案的方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    Disk,
    #[default]
    Memory,
}

impl ReadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadMode::Disk => "disk",
            ReadMode::Memory => "memory",
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadMode {
    type Err = DearOmgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disk" => Ok(ReadMode::Disk),
            "memory" => Ok(ReadMode::Memory),
            _ => Err(DearOmgError::msg("讀取模式必須是 'disk' 或 'memory'")),
        }
    }
}
