use std::path::{Path, PathBuf};

use crate::error::{DearOmgError, Result};
use crate::models::tool::ToolKind;

/// 安裝根目錄的環境變數名稱
pub const DEAR_OMG_PATH_ENV: &str = "DEAR_OMG_PATH";

pub const COMMUNITY_EXE: &str = "DearOMG-community.exe";
pub const VENDOR_EXE: &str = "DearOMG-vendor.exe";
pub const PARSER_EXE: &str = "DearOMG-parser.exe";

/// `<root>/<tool>/bin/<tool>.exe`
pub fn executable_path(root: &Path, exe_name: &str) -> PathBuf {
    let tool_dir = exe_name.trim_end_matches(".exe");
    root.join(tool_dir).join("bin").join(exe_name)
}

/// 確認執行檔存在，否則回報是哪一個缺少
pub fn require_executable(root: &Path, exe_name: &str) -> Result<PathBuf> {
    let path = executable_path(root, exe_name);
    if !path.exists() {
        log::error!("找不到執行檔：{}", path.display());
        return Err(DearOmgError::msg(format!(
            "找不到 {}：{}",
            exe_name,
            path.display()
        )));
    }
    Ok(path)
}

/// 已驗證存在的三個外部執行檔
#[derive(Clone, Debug)]
pub struct Installation {
    pub community_exe: PathBuf,
    pub vendor_exe: PathBuf,
    pub parser_exe: PathBuf,
}

impl Installation {
    pub fn locate(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        Ok(Installation {
            community_exe: require_executable(root, COMMUNITY_EXE)?,
            vendor_exe: require_executable(root, VENDOR_EXE)?,
            parser_exe: require_executable(root, PARSER_EXE)?,
        })
    }

    pub fn converter_for(&self, tool: ToolKind) -> &Path {
        match tool {
            ToolKind::Community => &self.community_exe,
            ToolKind::Vendor => &self.vendor_exe,
        }
    }
}

/// 未指定安裝根目錄時使用目前工作目錄
pub fn default_root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}
