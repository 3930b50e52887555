//! 從 DearOMG-parser 的標準輸出擷取計時資訊。
//!
//! 解析程式沒有結構化輸出，只會印出類似 `nThread: 4 elapse time: 1.523`
//! 的文字行。所有對該格式的依賴都集中在這裡，格式變動時只需修改本模組。

/// 計時行的標記字串
pub const ELAPSE_MARKER: &str = "elapse time:";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingInfo {
    pub threads_used: u32,
    pub elapsed_time: f64,
}

/// 掃描每一行輸出；多行符合時以最後一行為準
pub fn extract_timing(stdout: &str) -> Option<TimingInfo> {
    stdout
        .lines()
        .filter(|line| line.contains(ELAPSE_MARKER))
        .filter_map(parse_timing_line)
        .last()
}

/// 解析單一計時行，至少需要四個以空白分隔的欄位
pub fn parse_timing_line(line: &str) -> Option<TimingInfo> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }

    // 第 1 欄為執行緒數，第 3 欄為耗時
    if let (Ok(threads_used), Ok(elapsed_time)) = (tokens[1].parse::<u32>(), tokens[3].parse::<f64>()) {
        return Some(TimingInfo { threads_used, elapsed_time });
    }

    let (head, tail) = line.split_once(ELAPSE_MARKER)?;
    let tail_numbers: Vec<&str> = tail
        .split_whitespace()
        .filter(|token| token.parse::<f64>().is_ok())
        .collect();
    let elapsed_time = tail_numbers.last()?.parse::<f64>().ok()?;
    let threads_used = if tail_numbers.len() >= 2 {
        tail_numbers[0].parse::<u32>().ok()?
    } else {
        head.split_whitespace().rev().find_map(|token| token.parse::<u32>().ok())?
    };
    Some(TimingInfo { threads_used, elapsed_time })
}
