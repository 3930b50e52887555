use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{error, info, warn};

use crate::config::installation::{default_root, Installation};
use crate::error::{DearOmgError, Result};
use crate::facade::traits::i_facade::ConverterFacadeTrait;
use crate::models::command::CommandLine;
use crate::models::conversion::{ConversionInput, ConversionOutcome, ConversionOutput, ConversionSettings};
use crate::models::tool::{SupportedFormat, ToolKind, OMG_EXTENSION, SUPPORTED_FORMATS};
use crate::service::process::ProcessService;
use crate::service::traits::i_service::ProcessRunnerTrait;

pub struct ConverterFacade {
    installation: Installation,
    runner: Box<dyn ProcessRunnerTrait>,
}

impl ConverterFacade {
    /// 在安裝根目錄下尋找三個執行檔，任一缺少即失敗
    pub fn new(dear_omg_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_runner(dear_omg_path, Box::new(ProcessService::default()))
    }

    pub fn from_current_dir() -> Result<Self> {
        Self::new(default_root()?)
    }

    pub fn with_runner(dear_omg_path: impl AsRef<Path>, runner: Box<dyn ProcessRunnerTrait>) -> Result<Self> {
        let installation = Installation::locate(dear_omg_path)?;
        Ok(ConverterFacade { installation, runner })
    }
}

impl ConverterFacadeTrait for ConverterFacade {
    fn convert_files(&self, input: ConversionInput) -> Result<ConversionOutput> {
        if input.input_files.is_empty() {
            return Err(DearOmgError::msg("未提供輸入檔案"));
        }
        for file_path in &input.input_files {
            if !file_path.exists() {
                error!("輸入檔案不存在：{}", file_path.display());
                return Err(DearOmgError::msg(format!("找不到輸入檔案：{}", file_path.display())));
            }
        }

        // 任一檔案格式不支援即拒絕整批，此時尚未建立輸出目錄或啟動任何程式
        let mut community_files = Vec::new();
        let mut vendor_files = Vec::new();
        for file_path in &input.input_files {
            match ToolKind::for_path(file_path) {
                Some(ToolKind::Community) => community_files.push(file_path.clone()),
                Some(ToolKind::Vendor) => vendor_files.push(file_path.clone()),
                None => {
                    let ext = file_path
                        .extension()
                        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                        .unwrap_or_default();
                    return Err(DearOmgError::msg(format!("不支援的檔案格式：{}", ext)));
                }
            }
        }

        fs::create_dir_all(&input.output_dir)?;

        let mut output = ConversionOutput::default();
        for (tool, files) in [(ToolKind::Community, community_files), (ToolKind::Vendor, vendor_files)] {
            if files.is_empty() {
                continue;
            }
            info!("以 {} 轉換 {} 個檔案，輸出目錄：{}", tool, files.len(), input.output_dir.display());
            let partition = self.run_conversion(tool, &files, &input.output_dir, &input.settings)?;
            output.results.extend(partition);
        }
        Ok(output)
    }

    fn get_supported_formats(&self) -> &'static [SupportedFormat] {
        SUPPORTED_FORMATS
    }
}

impl ConverterFacade {
    fn run_conversion(
        &self,
        tool: ToolKind,
        input_files: &[PathBuf],
        output_dir: &Path,
        settings: &ConversionSettings,
    ) -> Result<Vec<(PathBuf, ConversionOutcome)>> {
        let command = build_conversion_command(self.installation.converter_for(tool), input_files, output_dir, settings);
        let started = if settings.require_fresh {
            Some(filesystem_now(output_dir)?)
        } else {
            None
        };
        let output = self.runner.run(&command)?;
        if !output.success {
            error!("{} 轉換失敗，結束碼：{:?}，stderr：{}", tool, output.exit_code, output.stderr.trim_end());
            return Err(DearOmgError::msg(format!("轉換失敗：{}", output.stderr)));
        }

        // 以輸出目錄中是否出現預期檔案判斷每個檔案的結果
        let results = input_files
            .iter()
            .map(|input_file| {
                let predicted = predicted_output_path(input_file, output_dir);
                let fresh_enough = started.map_or(true, |started| is_written_after(&predicted, started));
                let outcome = if predicted.exists() && fresh_enough {
                    ConversionOutcome::Converted(predicted)
                } else {
                    warn!("未找到 {} 的轉換結果：{}", input_file.display(), predicted.display());
                    ConversionOutcome::Failed
                };
                (input_file.clone(), outcome)
            })
            .collect();
        Ok(results)
    }
}

/// `<exe> --write_mode= --precision= --skip_zero= --out_dir= --input=a;b`
pub fn build_conversion_command(
    exe_path: &Path,
    input_files: &[PathBuf],
    output_dir: &Path,
    settings: &ConversionSettings,
) -> CommandLine {
    let input_list = input_files
        .iter()
        .map(|path| path.to_string_lossy())
        .collect::<Vec<_>>()
        .join(";");
    CommandLine::new(exe_path.to_path_buf())
        .flag("write_mode", settings.write_mode)
        .flag("precision", settings.precision)
        .flag("skip_zero", if settings.skip_zero { 1 } else { 0 })
        .flag("out_dir", output_dir.display())
        .flag("input", input_list)
}

/// 轉換程式固定寫出 `<output_dir>/<stem>.omg`
pub fn predicted_output_path(input_file: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{}.{}", stem, OMG_EXTENSION))
}

/// 以輸出目錄中標記檔的修改時間作為起始時間。
///
/// 檔案系統的時間戳記比 `SystemTime::now()` 粗略，可能落後數毫秒，
/// 起始時間與產出檔的修改時間須取自同一個時鐘。
fn filesystem_now(output_dir: &Path) -> io::Result<SystemTime> {
    let marker = output_dir.join(".dear_omg_started");
    fs::write(&marker, b"")?;
    let modified = fs::metadata(&marker).and_then(|meta| meta.modified());
    fs::remove_file(&marker)?;
    modified
}

fn is_written_after(path: &Path, started: SystemTime) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| modified >= started)
        .unwrap_or(false)
}

/// 以指定安裝根目錄建立轉換器並轉換；未指定時使用目前工作目錄
pub fn convert_to_omg(
    input: ConversionInput,
    dear_omg_path: Option<&Path>,
) -> Result<ConversionOutput> {
    let converter = match dear_omg_path {
        Some(path) => ConverterFacade::new(path)?,
        None => ConverterFacade::from_current_dir()?,
    };
    converter.convert_files(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::conversion::CONVERSION_FAILED;
    use crate::models::tool::WriteMode;
    use crate::service::testing::{fake_installation, RecordingRunner};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        root: PathBuf,
        data: PathBuf,
        out: PathBuf,
    }

    fn workspace() -> Workspace {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("install");
        fake_installation(&root);
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        let out = dir.path().join("out");
        Workspace { root, data, out, _dir: dir }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"x").unwrap();
        path
    }

    fn facade(ws: &Workspace, runner: &RecordingRunner) -> ConverterFacade {
        ConverterFacade::with_runner(&ws.root, Box::new(runner.clone())).unwrap()
    }

    #[test]
    fn routes_partitions_to_their_tools() {
        let ws = workspace();
        let fastq = touch(&ws.data, "reads.fastq");
        let raw = touch(&ws.data, "sample.RAW");
        let imzml = touch(&ws.data, "tissue.imzML");
        let runner = RecordingRunner::converting();

        let output = facade(&ws, &runner)
            .convert_files(ConversionInput::new([raw.clone(), fastq.clone(), imzml.clone()], &ws.out))
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].program.ends_with("DearOMG-community.exe"));
        assert_eq!(
            calls[0].args.last().unwrap(),
            &format!("--input={};{}", fastq.display(), imzml.display())
        );
        assert!(calls[1].program.ends_with("DearOMG-vendor.exe"));
        assert_eq!(calls[1].args.last().unwrap(), &format!("--input={}", raw.display()));

        let keys: Vec<_> = output.results.keys().cloned().collect();
        let mut expected = vec![raw, fastq.clone(), imzml];
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(
            output.results[&fastq],
            ConversionOutcome::Converted(ws.out.join("reads.omg"))
        );
    }

    #[test]
    fn builds_the_flat_argument_vector() {
        let settings = ConversionSettings {
            write_mode: WriteMode::Json,
            precision: 0.0001,
            skip_zero: false,
            require_fresh: false,
        };
        let command = build_conversion_command(
            Path::new("bin/DearOMG-vendor.exe"),
            &[PathBuf::from("a.raw"), PathBuf::from("b.wiff")],
            Path::new("out"),
            &settings,
        );
        assert_eq!(
            command.to_argv(),
            vec![
                "bin/DearOMG-vendor.exe",
                "--write_mode=json",
                "--precision=0.0001",
                "--skip_zero=0",
                "--out_dir=out",
                "--input=a.raw;b.wiff",
            ]
        );
    }

    #[test]
    fn unsupported_extension_rejects_whole_call() {
        let ws = workspace();
        let raw = touch(&ws.data, "sample.raw");
        let txt = touch(&ws.data, "notes.txt");
        let runner = RecordingRunner::converting();

        let err = facade(&ws, &runner)
            .convert_files(ConversionInput::new([raw, txt], &ws.out))
            .unwrap_err();
        assert!(err.to_string().contains(".txt"));
        assert!(runner.calls().is_empty());
        assert!(!ws.out.exists());
    }

    #[test]
    fn empty_or_missing_inputs_fail_without_running() {
        let ws = workspace();
        let runner = RecordingRunner::converting();
        let converter = facade(&ws, &runner);

        let empty: Vec<PathBuf> = Vec::new();
        assert!(converter.convert_files(ConversionInput::new(empty, &ws.out)).is_err());
        let missing = ws.data.join("ghost.raw");
        let err = converter
            .convert_files(ConversionInput::new([missing], &ws.out))
            .unwrap_err();
        assert!(err.to_string().contains("ghost.raw"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn missing_output_becomes_sentinel() {
        let ws = workspace();
        let raw = touch(&ws.data, "sample.raw");
        let runner = RecordingRunner::succeeding("");

        let output = facade(&ws, &runner)
            .convert_files(ConversionInput::new([raw.clone()], &ws.out))
            .unwrap();
        assert_eq!(output.results[&raw], ConversionOutcome::Failed);
        assert_eq!(output.results[&raw].to_string(), CONVERSION_FAILED);
        assert!(ws.out.is_dir());
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let ws = workspace();
        let fastq = touch(&ws.data, "reads.fastq");
        let raw = touch(&ws.data, "sample.raw");
        let runner = RecordingRunner::failing("license check failed");

        let err = facade(&ws, &runner)
            .convert_files(ConversionInput::new([fastq, raw], &ws.out))
            .unwrap_err();
        assert!(err.to_string().contains("license check failed"));
        // 第一個分組失敗後不再執行第二個
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn stale_output_is_rejected_only_when_freshness_required() {
        let ws = workspace();
        let raw = touch(&ws.data, "sample.raw");
        fs::create_dir_all(&ws.out).unwrap();
        let stale = ws.out.join("sample.omg");
        fs::write(&stale, b"old").unwrap();
        let old = SystemTime::now() - std::time::Duration::from_secs(3600);
        fs::File::options().write(true).open(&stale).unwrap().set_modified(old).unwrap();

        let runner = RecordingRunner::succeeding("");
        let converter = facade(&ws, &runner);
        let default_run = converter
            .convert_files(ConversionInput::new([raw.clone()], &ws.out))
            .unwrap();
        assert_eq!(default_run.results[&raw], ConversionOutcome::Converted(stale));

        let strict = ConversionSettings { require_fresh: true, ..ConversionSettings::default() };
        let strict_run = converter
            .convert_files(ConversionInput::new([raw.clone()], &ws.out).with_settings(strict))
            .unwrap();
        assert_eq!(strict_run.results[&raw], ConversionOutcome::Failed);
    }

    #[test]
    fn predicts_output_from_stem() {
        assert_eq!(
            predicted_output_path(Path::new("/data/run 01.d"), Path::new("/out")),
            PathBuf::from("/out/run 01.omg")
        );
    }

    #[test]
    fn fresh_output_counts_when_freshness_required() {
        let ws = workspace();
        let raw = touch(&ws.data, "sample.raw");
        let fastq = touch(&ws.data, "reads.fastq");
        let runner = RecordingRunner::converting();
        let strict = ConversionSettings { require_fresh: true, ..ConversionSettings::default() };

        let output = facade(&ws, &runner)
            .convert_files(ConversionInput::new([raw.clone(), fastq.clone()], &ws.out).with_settings(strict))
            .unwrap();
        assert_eq!(output.results[&raw], ConversionOutcome::Converted(ws.out.join("sample.omg")));
        assert_eq!(output.results[&fastq], ConversionOutcome::Converted(ws.out.join("reads.omg")));

        let mut left: Vec<_> = fs::read_dir(&ws.out)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(left, vec!["reads.omg".to_string(), "sample.omg".to_string()]);
    }

    #[test]
    fn facade_reports_extension_table() {
        let ws = workspace();
        let runner = RecordingRunner::converting();
        let formats = facade(&ws, &runner).get_supported_formats();

        let table: Vec<(&str, ToolKind)> = formats.iter().map(|f| (f.extension, f.tool)).collect();
        assert_eq!(
            table,
            vec![
                (".d", ToolKind::Community),
                (".imzml", ToolKind::Community),
                (".fastq", ToolKind::Community),
                (".wiff", ToolKind::Vendor),
                (".raw", ToolKind::Vendor),
            ]
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn precision_uses_shortest_decimal_form() {
        let command = |precision: f64| {
            let settings = ConversionSettings { precision, ..ConversionSettings::default() };
            build_conversion_command(Path::new("exe"), &[PathBuf::from("a.raw")], Path::new("out"), &settings)
                .args[1]
                .clone()
        };
        assert_eq!(command(0.001), "--precision=0.001");
        assert_eq!(command(1.0), "--precision=1");
        assert_eq!(command(0.00001), "--precision=0.00001");
    }

    #[test]
    fn convert_to_omg_names_missing_converter() {
        let dir = TempDir::new().unwrap();
        let input = touch(dir.path(), "sample.raw");

        let err = convert_to_omg(ConversionInput::new([input], dir.path().join("out")), Some(dir.path()))
            .unwrap_err();
        assert!(err.to_string().contains("DearOMG-community.exe"));
        assert!(!dir.path().join("out").exists());
    }

    #[cfg(unix)]
    #[test]
    fn convert_to_omg_runs_installed_converter() {
        use crate::config::installation::{executable_path, COMMUNITY_EXE, VENDOR_EXE};
        use std::os::unix::fs::PermissionsExt;

        let ws = workspace();
        let script = "#!/bin/sh\nfor arg in \"$@\"; do\n  case \"$arg\" in\n    --out_dir=*) out=\"${arg#--out_dir=}\" ;;\n    --input=*) input=\"${arg#--input=}\" ;;\n  esac\ndone\nname=$(basename \"$input\")\n: > \"$out/${name%.*}.omg\"\n";
        for exe in [COMMUNITY_EXE, VENDOR_EXE] {
            let path = executable_path(&ws.root, exe);
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let raw = touch(&ws.data, "sample.raw");
        let strict = ConversionSettings { require_fresh: true, ..ConversionSettings::default() };

        let output = convert_to_omg(
            ConversionInput::new([raw.clone()], &ws.out).with_settings(strict),
            Some(ws.root.as_path()),
        )
        .unwrap();
        assert_eq!(output.results[&raw], ConversionOutcome::Converted(ws.out.join("sample.omg")));
    }
}
