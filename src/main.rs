use std::process::ExitCode;

use dear_omg::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(()) => {
            log::info!("程式執行完成");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("錯誤：{}", e);
            ExitCode::FAILURE
        }
    }
}
