use std::path::Path;
use crate::error::Result;
use crate::models::conversion::{ConversionInput, ConversionOutput};
use crate::models::parse::{FileInfo, ParseInput, ParseOutput};
use crate::models::tool::SupportedFormat;

// 轉換 Facade 接口，負責將原始檔案分派給對應的轉換程式
pub trait ConverterFacadeTrait: Send + Sync {
    /// 轉換輸入檔為 OMG 格式
    /// # 參數
    /// - input: 輸入檔、輸出目錄與轉換設定
    /// # 回傳
    /// - 每個輸入檔對應的產出路徑或失敗標記；前置條件不符或轉換程式失敗時返回錯誤
    fn convert_files(&self, input: ConversionInput) -> Result<ConversionOutput>;

    /// 支援的副檔名與轉換程式對照表
    fn get_supported_formats(&self) -> &'static [SupportedFormat];
}

// 解析 Facade 接口，負責呼叫解析程式並整理其輸出
pub trait ParserFacadeTrait: Send + Sync {
    fn parse_omg_file(&self, input: ParseInput) -> Result<ParseOutput>;

    /// 僅查詢檔案系統資訊，不執行解析程式
    fn get_file_info(&self, omg_file: &Path) -> Result<FileInfo>;
}
