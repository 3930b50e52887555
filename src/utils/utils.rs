use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    if let Err(e) = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
    {
        log::debug!("日誌已初始化，沿用既有設定：{}", e);
    }
    Ok(())
}

/// 外部程式執行期間顯示的轉圈提示
pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(message: &str, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed_precise}]") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        };
        pb.set_message(message.to_string());
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn finish(&self, action: &str, success: bool) {
        if self.no_progress {
            return;
        }
        let status = if success { "完成" } else { "失敗" };
        self.pb.finish_with_message(format!(
            "{}{}，耗時 {:.2} 秒",
            action,
            status,
            self.start.elapsed().as_secs_f64()
        ));
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// 位元組換算為 MiB，取到小數點後兩位
pub fn bytes_to_mb(size: u64) -> f64 {
    (size as f64 / 1_048_576.0 * 100.0).round() / 100.0
}

pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

pub fn format_timestamp(epoch_secs: f64) -> String {
    let time = if epoch_secs >= 0.0 {
        UNIX_EPOCH + Duration::from_secs_f64(epoch_secs)
    } else {
        UNIX_EPOCH - Duration::from_secs_f64(-epoch_secs)
    };
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 將 `*.raw` 之類的樣式轉為正規表示式集合
pub fn create_regex_sets(include: &[String], exclude: &[String]) -> (RegexSet, RegexSet) {
    let to_regex = |p: &String| format!("^{}$", regex::escape(p).replace("\\*", ".*"));
    let include_patterns: Vec<_> = include.iter().map(to_regex).collect();
    let exclude_patterns: Vec<_> = exclude.iter().map(to_regex).collect();

    let include_set = RegexSet::new(&include_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的包含模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    let exclude_set = RegexSet::new(&exclude_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的排除模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    (include_set, exclude_set)
}
