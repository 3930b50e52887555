use std::io;
use thiserror::Error;

/// Dear-OMG 操作的結果型別
pub type Result<T> = std::result::Result<T, DearOmgError>;

/// Dear-OMG 包裝層的錯誤
#[derive(Debug, Error)]
pub enum DearOmgError {
    /// 前置條件不符或外部程式執行失敗，附帶說明訊息
    #[error("{0}")]
    Omg(String),

    /// 未特別處理的平台錯誤（例如權限不足），原樣往上傳遞
    #[error("I/O 錯誤: {0}")]
    Io(#[from] io::Error),
}

impl DearOmgError {
    pub fn msg(message: impl Into<String>) -> Self {
        DearOmgError::Omg(message.into())
    }
}
