use std::fmt;
use std::path::PathBuf;

/// 外部程式的完整呼叫：執行檔與扁平化的參數列
#[derive(Clone, Debug, PartialEq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: PathBuf) -> Self {
        CommandLine { program, args: Vec::new() }
    }

    /// 加入 `--key=value` 形式的參數
    pub fn flag(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.args.push(format!("--{}={}", key, value));
        self
    }

    /// 執行檔在前、參數在後的完整參數向量
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.to_string_lossy().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_argv().join(" "))
    }
}

/// 外部程式結束後擷取到的結果
#[derive(Clone, Debug, Default)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}
