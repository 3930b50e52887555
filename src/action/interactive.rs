use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

use crate::action::cli::{print_conversion, print_file_infos, print_parse, print_supported_formats};
use crate::config::ports::AppConfig;
use crate::error::{DearOmgError, Result};
use crate::facade::converter_facade::ConverterFacade;
use crate::facade::parser_facade::ParserFacade;
use crate::facade::traits::i_facade::{ConverterFacadeTrait, ParserFacadeTrait};
use crate::models::conversion::{ConversionInput, ConversionSettings};
use crate::models::parse::ParseInput;
use crate::models::tool::{ReadMode, WriteMode};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::process::ProcessService;
use crate::utils::utils::setup_logging;

fn prompt_error(what: &str, e: dialoguer::Error) -> DearOmgError {
    DearOmgError::msg(format!("{}失敗: {}", what, e))
}

pub fn process_interactive_mode() -> Result<()> {
    println!("=== 歡迎使用 Dear-OMG 互動模式 ===");
    let mut config = ConfigService::new(Box::new(DefaultConfigAdapter)).get_config()?;
    setup_logging(&config.log_level)?;
    config.dear_omg_path = get_install_path(&config.dear_omg_path)?;

    let actions = ["轉換 - 將原始檔案轉換為 OMG", "解析 - 解析 OMG 檔案", "資訊 - 查看 OMG 檔案大小", "格式 - 列出支援的輸入格式"];
    let action = Select::new()
        .with_prompt("選擇操作（使用方向鍵選擇，按 Enter 確認）")
        .items(&actions)
        .default(0)
        .interact()
        .map_err(|e| prompt_error("操作選擇", e))?;

    match action {
        0 => interactive_convert(&config),
        1 => interactive_parse(&config),
        2 => {
            let omg_file = get_existing_path("請輸入 OMG 檔案路徑")?;
            let info = ParserFacade::new(&config.dear_omg_path)?.get_file_info(&omg_file)?;
            print_file_infos(&[info], config.json)
        }
        _ => print_supported_formats(crate::models::tool::SUPPORTED_FORMATS, config.json),
    }
}

pub fn get_install_path(default: &Path) -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Dear-OMG 安裝目錄")
        .default(default.display().to_string())
        .interact_text()
        .map_err(|e| prompt_error("安裝目錄輸入", e))?;
    Ok(PathBuf::from(path))
}

pub fn get_existing_path(prompt: &str) -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if Path::new(input).exists() { Ok(()) } else { Err(format!("路徑 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| prompt_error("路徑輸入", e))?;
    Ok(PathBuf::from(path))
}

pub fn get_input_files() -> Result<Vec<PathBuf>> {
    let raw: String = Input::new()
        .with_prompt("輸入檔案路徑，以分號分隔（例如：./a.raw;./b.fastq）")
        .interact_text()
        .map_err(|e| prompt_error("輸入檔案", e))?;
    Ok(raw
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect())
}

pub fn get_conversion_settings() -> Result<ConversionSettings> {
    let modes = ["binary（預設）", "json", "yaml"];
    let write_mode = match Select::new()
        .with_prompt("選擇輸出格式")
        .items(&modes)
        .default(0)
        .interact()
        .map_err(|e| prompt_error("輸出格式選擇", e))?
    {
        1 => WriteMode::Json,
        2 => WriteMode::Yaml,
        _ => WriteMode::Binary,
    };
    let precision: f64 = Input::new()
        .with_prompt("m/z 精度")
        .default(0.001)
        .interact_text()
        .map_err(|e| prompt_error("精度輸入", e))?;
    let skip_zero = Confirm::new()
        .with_prompt("是否略過強度為零的離子？")
        .default(true)
        .interact()
        .map_err(|e| prompt_error("略過零強度選項", e))?;
    Ok(ConversionSettings { write_mode, precision, skip_zero, ..ConversionSettings::default() })
}

fn interactive_convert(config: &AppConfig) -> Result<()> {
    let input_files = get_input_files()?;
    let output_dir: String = Input::new()
        .with_prompt("輸出目錄（預設為 output）")
        .default("output".to_string())
        .interact_text()
        .map_err(|e| prompt_error("輸出目錄輸入", e))?;
    let settings = get_conversion_settings()?;

    let converter = ConverterFacade::with_runner(
        &config.dear_omg_path,
        Box::new(ProcessService::new(config.no_progress)),
    )?;
    let output = converter.convert_files(ConversionInput::new(input_files, output_dir).with_settings(settings))?;
    print_conversion(&output, config.json)
}

fn interactive_parse(config: &AppConfig) -> Result<()> {
    let omg_file = get_existing_path("請輸入 OMG 檔案路徑")?;
    let num_threads: u32 = Input::new()
        .with_prompt("執行緒數")
        .default(4)
        .interact_text()
        .map_err(|e| prompt_error("執行緒數輸入", e))?;
    let read_mode = match Select::new()
        .with_prompt("選擇讀取模式")
        .items(&["memory - 整個檔案載入記憶體（預設）", "disk - 從磁碟串流讀取"])
        .default(0)
        .interact()
        .map_err(|e| prompt_error("讀取模式選擇", e))?
    {
        1 => ReadMode::Disk,
        _ => ReadMode::Memory,
    };

    let parser = ParserFacade::with_runner(
        &config.dear_omg_path,
        Box::new(ProcessService::new(config.no_progress)),
    )?;
    let output = parser.parse_omg_file(ParseInput { omg_file, num_threads, read_mode })?;
    print_parse(&output, config.json)
}
