use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::installation::{executable_path, COMMUNITY_EXE, PARSER_EXE, VENDOR_EXE};
use crate::models::command::{CommandLine, ProcessOutput};
use crate::service::traits::i_service::ProcessRunnerTrait;

/// 在 root 下建立三個空的執行檔佔位
pub fn fake_installation(root: &Path) {
    for exe in [COMMUNITY_EXE, VENDOR_EXE, PARSER_EXE] {
        let path = executable_path(root, exe);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }
}

#[derive(Clone)]
enum Behavior {
    Convert,
    Succeed(String),
    Fail(String),
}

/// 記錄每次呼叫而不啟動真正程式的執行服務
#[derive(Clone)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandLine>>>,
    behavior: Behavior,
}

impl RecordingRunner {
    /// 模擬轉換程式：依 `--out_dir` 與 `--input` 寫出 `<stem>.omg`
    pub fn converting() -> Self {
        Self::with_behavior(Behavior::Convert)
    }

    pub fn succeeding(stdout: &str) -> Self {
        Self::with_behavior(Behavior::Succeed(stdout.to_string()))
    }

    pub fn failing(stderr: &str) -> Self {
        Self::with_behavior(Behavior::Fail(stderr.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        RecordingRunner { calls: Arc::new(Mutex::new(Vec::new())), behavior }
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }
}

fn flag_value<'a>(command: &'a CommandLine, key: &str) -> Option<&'a str> {
    let prefix = format!("--{}=", key);
    command.args.iter().find_map(|arg| arg.strip_prefix(prefix.as_str()))
}

impl ProcessRunnerTrait for RecordingRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(command.clone());
        match &self.behavior {
            Behavior::Convert => {
                let out_dir = PathBuf::from(flag_value(command, "out_dir").unwrap_or("."));
                for input in flag_value(command, "input").unwrap_or("").split(';') {
                    let stem = Path::new(input).file_stem().unwrap().to_string_lossy().to_string();
                    fs::write(out_dir.join(format!("{}.omg", stem)), b"OMG")?;
                }
                Ok(ProcessOutput { exit_code: Some(0), success: true, ..Default::default() })
            }
            Behavior::Succeed(stdout) => Ok(ProcessOutput {
                exit_code: Some(0),
                success: true,
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Behavior::Fail(stderr) => Ok(ProcessOutput {
                exit_code: Some(1),
                success: false,
                stdout: String::new(),
                stderr: stderr.clone(),
            }),
        }
    }
}
