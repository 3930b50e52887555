use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::installation::DEAR_OMG_PATH_ENV;
use crate::models::tool::{ReadMode, WriteMode};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "dear_omg",
    about = "Dear-OMG 組學資料轉換與解析工具的命令列介面",
    long_about = "呼叫 DearOMG-community、DearOMG-vendor 與 DearOMG-parser 執行檔，將 .d、.imzML、.fastq、.wiff、.raw 檔案轉換為 OMG 格式並解析 OMG 檔案。\n不帶任何參數執行時進入互動模式。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Dear-OMG 安裝根目錄，預設為目前工作目錄
    #[arg(long, global = true, env = DEAR_OMG_PATH_ENV)]
    pub dear_omg_path: Option<PathBuf>,
    /// 以 JSON 格式輸出結果
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(long, global = true, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, global = true, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// 將原始檔案轉換為 OMG 格式
    Convert(ConvertArgs),
    /// 以 DearOMG-parser 解析 OMG 檔案
    Parse(ParseArgs),
    /// 顯示 OMG 檔案大小與修改時間
    Info {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 列出支援的輸入格式
    Formats,
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// 輸入檔案或目錄
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
    #[arg(long, value_enum, default_value_t = WriteMode::Binary)]
    pub write_mode: WriteMode,
    /// m/z 陣列精度
    #[arg(long, default_value_t = 0.001)]
    pub precision: f64,
    /// 略過強度為零的離子
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub skip_zero: bool,
    #[arg(long, default_value = "*", value_delimiter = ',')]
    pub include: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    /// 只接受本次執行期間寫出的 OMG 檔
    #[arg(long, default_value_t = false)]
    pub require_fresh: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ParseArgs {
    pub omg_file: PathBuf,
    #[arg(long = "mt", default_value_t = 4)]
    pub num_threads: u32,
    #[arg(long = "read", value_enum, default_value_t = ReadMode::Memory)]
    pub read_mode: ReadMode,
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> Result<(), String> {
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(format!("無效的包含模式: {}", pattern));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(format!("無效的排除模式: {}", pattern));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn convert_defaults() {
        let cli = Cli::try_parse_from(["dear_omg", "convert", "a.raw"]).unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.output, PathBuf::from("output"));
                assert_eq!(args.write_mode, WriteMode::Binary);
                assert_eq!(args.precision, 0.001);
                assert!(args.skip_zero);
                assert!(!args.require_fresh);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parse_flags_mirror_the_parser_executable() {
        let cli = Cli::try_parse_from(["dear_omg", "parse", "x.omg", "--mt", "8", "--read", "disk"]).unwrap();
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.num_threads, 8);
                assert_eq!(args.read_mode, ReadMode::Disk);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["dear_omg", "parse", "x.omg", "--read", "tape"]).is_err());
    }

    #[test]
    fn rejects_path_like_patterns() {
        assert!(validate_file_patterns(&["*.raw".to_string()], &None).is_ok());
        assert!(validate_file_patterns(&["a/b".to_string()], &None).is_err());
        assert!(validate_file_patterns(&["*".to_string()], &Some(vec!["".to_string()])).is_err());
    }
}
