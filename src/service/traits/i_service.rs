use std::io;
use crate::models::command::{CommandLine, ProcessOutput};

// 外部程式執行服務接口
pub trait ProcessRunnerTrait: Send + Sync {
    /// 同步執行外部程式並擷取輸出
    /// # 參數
    /// - command: 執行檔與參數列
    /// # 回傳
    /// - 程式結束後的結束碼與 stdout/stderr；無法啟動程式時返回 IO 錯誤
    fn run(&self, command: &CommandLine) -> io::Result<ProcessOutput>;
}
