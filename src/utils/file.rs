use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use regex::RegexSet;
use walkdir::WalkDir;

use crate::models::tool::ToolKind;

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn is_file_valid(path: &Path, include_set: &RegexSet, exclude_set: &RegexSet) -> bool {
    let name = file_name_of(path);
    include_set.is_match(&name) && !exclude_set.is_match(&name)
}

/// 展開命令列上的輸入路徑。
///
/// 一般目錄會遞迴搜尋支援格式的檔案；`.d` 目錄本身即是一筆 Bruker 資料，
/// 不再往下展開。不存在的路徑原樣保留，交由轉換器回報錯誤。
pub fn collect_input_files(
    inputs: &[PathBuf],
    include_set: &RegexSet,
    exclude_set: &RegexSet,
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() || ToolKind::for_path(input).is_some() {
            files.push(input.clone());
            continue;
        }

        let mut walker = WalkDir::new(input).min_depth(1).sort_by_file_name().into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            let path = entry.path();
            if ToolKind::for_path(path).is_none() {
                continue;
            }
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            if is_file_valid(path, include_set, exclude_set) {
                debug!("收集輸入檔案：{}", path.display());
                files.push(path.to_path_buf());
            }
        }
    }

    if files.is_empty() {
        warn!("無符合條件的輸入檔案");
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utils::create_regex_sets;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn expands_directories_but_keeps_bruker_folders_whole() {
        let dir = TempDir::new().unwrap();
        let batch = dir.path().join("batch");
        fs::create_dir_all(batch.join("run01.d")).unwrap();
        fs::write(batch.join("run01.d").join("analysis.tdf"), b"").unwrap();
        fs::create_dir_all(batch.join("nested")).unwrap();
        fs::write(batch.join("nested").join("sample.raw"), b"").unwrap();
        fs::write(batch.join("blank.raw"), b"").unwrap();
        fs::write(batch.join("readme.txt"), b"").unwrap();
        let single = dir.path().join("reads.fastq");
        fs::write(&single, b"").unwrap();

        let (include, exclude) = create_regex_sets(&["*".to_string()], &["blank*".to_string()]);
        let files = collect_input_files(&[batch.clone(), single.clone()], &include, &exclude).unwrap();

        assert_eq!(
            files,
            vec![batch.join("nested").join("sample.raw"), batch.join("run01.d"), single]
        );
    }

    #[test]
    fn passes_missing_paths_through() {
        let (include, exclude) = create_regex_sets(&["*".to_string()], &[]);
        let missing = PathBuf::from("does/not/exist.raw");
        let files = collect_input_files(&[missing.clone()], &include, &exclude).unwrap();
        assert_eq!(files, vec![missing]);
    }
}
