use std::path::PathBuf;

use serde::Serialize;

use crate::models::tool::ReadMode;

#[derive(Clone, Debug)]
pub struct ParseInput {
    pub omg_file: PathBuf,
    pub num_threads: u32,
    pub read_mode: ReadMode,
}

impl ParseInput {
    pub fn new(omg_file: impl Into<PathBuf>) -> Self {
        ParseInput {
            omg_file: omg_file.into(),
            num_threads: 4,
            read_mode: ReadMode::Memory,
        }
    }
}

/// 解析結果，包含原始請求參數與從輸出擷取的計時資訊
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParseOutput {
    pub omg_file: PathBuf,
    pub num_threads: u32,
    pub read_mode: ReadMode,
    pub output: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_used: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileInfo {
    pub file_path: PathBuf,
    pub file_size_bytes: u64,
    /// MiB，四捨五入至小數點後兩位
    pub file_size_mb: f64,
    /// Unix epoch 起算的秒數
    pub last_modified: f64,
}
