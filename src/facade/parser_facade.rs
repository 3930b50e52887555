use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::installation::{default_root, require_executable, PARSER_EXE};
use crate::error::{DearOmgError, Result};
use crate::facade::traits::i_facade::ParserFacadeTrait;
use crate::models::command::CommandLine;
use crate::models::parse::{FileInfo, ParseInput, ParseOutput};
use crate::service::process::ProcessService;
use crate::service::scrape::extract_timing;
use crate::service::traits::i_service::ProcessRunnerTrait;
use crate::utils::utils::{bytes_to_mb, epoch_seconds};

pub struct ParserFacade {
    parser_exe: PathBuf,
    runner: Box<dyn ProcessRunnerTrait>,
}

impl ParserFacade {
    pub fn new(dear_omg_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_runner(dear_omg_path, Box::new(ProcessService::default()))
    }

    pub fn from_current_dir() -> Result<Self> {
        Self::new(default_root()?)
    }

    pub fn with_runner(dear_omg_path: impl AsRef<Path>, runner: Box<dyn ProcessRunnerTrait>) -> Result<Self> {
        let parser_exe = require_executable(dear_omg_path.as_ref(), PARSER_EXE)?;
        Ok(ParserFacade { parser_exe, runner })
    }
}

fn require_omg_file(omg_file: &Path) -> Result<()> {
    if !omg_file.exists() {
        error!("OMG 檔案不存在：{}", omg_file.display());
        return Err(DearOmgError::msg(format!("找不到 OMG 檔案：{}", omg_file.display())));
    }
    Ok(())
}

impl ParserFacadeTrait for ParserFacade {
    fn parse_omg_file(&self, input: ParseInput) -> Result<ParseOutput> {
        require_omg_file(&input.omg_file)?;

        let command = CommandLine::new(self.parser_exe.clone())
            .flag("mt", input.num_threads)
            .flag("read", input.read_mode)
            .flag("omg", input.omg_file.display());
        let output = self.runner.run(&command)?;
        if !output.success {
            error!("解析失敗，結束碼：{:?}，stderr：{}", output.exit_code, output.stderr.trim_end());
            return Err(DearOmgError::msg(format!("解析失敗：{}", output.stderr)));
        }

        let timing = extract_timing(&output.stdout);
        match timing {
            Some(t) => info!("解析完成：{} 個執行緒，耗時 {} 秒", t.threads_used, t.elapsed_time),
            None => info!("解析完成，輸出中沒有計時資訊"),
        }

        Ok(ParseOutput {
            omg_file: input.omg_file,
            num_threads: input.num_threads,
            read_mode: input.read_mode,
            output: output.stdout,
            success: true,
            elapsed_time: timing.map(|t| t.elapsed_time),
            threads_used: timing.map(|t| t.threads_used),
        })
    }

    fn get_file_info(&self, omg_file: &Path) -> Result<FileInfo> {
        require_omg_file(omg_file)?;
        let metadata = fs::metadata(omg_file)?;
        let size = metadata.len();
        Ok(FileInfo {
            file_path: omg_file.to_path_buf(),
            file_size_bytes: size,
            file_size_mb: bytes_to_mb(size),
            last_modified: epoch_seconds(metadata.modified()?),
        })
    }
}

/// 以指定安裝根目錄建立解析器並解析；讀取模式以字串指定
pub fn parse_omg(
    omg_file: impl Into<PathBuf>,
    dear_omg_path: Option<&Path>,
    num_threads: u32,
    read_mode: &str,
) -> Result<ParseOutput> {
    let parser = match dear_omg_path {
        Some(path) => ParserFacade::new(path)?,
        None => ParserFacade::from_current_dir()?,
    };
    let input = ParseInput {
        omg_file: omg_file.into(),
        num_threads,
        read_mode: read_mode.parse()?,
    };
    parser.parse_omg_file(input)
}
