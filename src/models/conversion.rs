use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::models::tool::WriteMode;

/// 產出檔案不存在時記錄的標記字串
pub const CONVERSION_FAILED: &str = "Conversion failed";

/// 所有輸入檔共用的轉換設定
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversionSettings {
    pub write_mode: WriteMode,
    pub precision: f64,
    pub skip_zero: bool,
    /// 僅接受修改時間不早於本次呼叫開始的產出檔
    pub require_fresh: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        ConversionSettings {
            write_mode: WriteMode::Binary,
            precision: 0.001,
            skip_zero: true,
            require_fresh: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub input_files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub settings: ConversionSettings,
}

impl ConversionInput {
    pub fn new<I, P>(input_files: I, output_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        ConversionInput {
            input_files: input_files.into_iter().map(Into::into).collect(),
            output_dir: output_dir.into(),
            settings: ConversionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ConversionSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// 單一輸入檔的轉換結果
#[derive(Clone, Debug, PartialEq)]
pub enum ConversionOutcome {
    Converted(PathBuf),
    Failed,
}

impl ConversionOutcome {
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            ConversionOutcome::Converted(path) => Some(path.as_path()),
            ConversionOutcome::Failed => None,
        }
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionOutcome::Converted(path) => write!(f, "{}", path.display()),
            ConversionOutcome::Failed => f.write_str(CONVERSION_FAILED),
        }
    }
}

impl Serialize for ConversionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ConversionOutput {
    /// 以原始輸入路徑為鍵
    pub results: BTreeMap<PathBuf, ConversionOutcome>,
}

impl ConversionOutput {
    pub fn converted_count(&self) -> usize {
        self.results
            .values()
            .filter(|outcome| outcome.output_path().is_some())
            .count()
    }
}
