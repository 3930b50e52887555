use std::io;
use std::process::Command;
use log::{debug, info};
use crate::models::command::{CommandLine, ProcessOutput};
use crate::service::traits::i_service::ProcessRunnerTrait;
use crate::utils::utils::ProgressManager;

/// 以子行程執行外部程式，阻塞直到程式結束
pub struct ProcessService {
    no_progress: bool,
}

impl ProcessService {
    pub fn new(no_progress: bool) -> Self {
        ProcessService { no_progress }
    }
}

impl Default for ProcessService {
    fn default() -> Self {
        ProcessService::new(true)
    }
}

impl ProcessRunnerTrait for ProcessService {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessOutput> {
        let program_name = command
            .program
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| command.program.display().to_string());
        info!("執行外部程式：{}", command);

        let progress = ProgressManager::new(&format!("{} 執行中", program_name), self.no_progress);
        let output = Command::new(&command.program).args(&command.args).output()?;

        let result = ProcessOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        progress.finish(&program_name, result.success);
        debug!(
            "{} 結束，結束碼：{:?}，stdout {} 位元組，stderr {} 位元組",
            program_name,
            result.exit_code,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}
