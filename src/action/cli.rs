use clap::Parser;
use serde::Serialize;

use crate::config::config::{validate_file_patterns, Cli, Command, ConvertArgs, ParseArgs};
use crate::config::ports::AppConfig;
use crate::action::interactive::process_interactive_mode;
use crate::error::{DearOmgError, Result};
use crate::facade::converter_facade::ConverterFacade;
use crate::facade::parser_facade::ParserFacade;
use crate::facade::traits::i_facade::{ConverterFacadeTrait, ParserFacadeTrait};
use crate::models::conversion::{ConversionInput, ConversionOutput, ConversionSettings};
use crate::models::parse::{FileInfo, ParseInput, ParseOutput};
use crate::models::tool::{SupportedFormat, ToolKind, SUPPORTED_FORMATS};
use crate::service::config_service::{CliConfigAdapter, ConfigService};
use crate::service::process::ProcessService;
use crate::utils::file::collect_input_files;
use crate::utils::utils::{create_regex_sets, format_file_size, format_timestamp, setup_logging};

pub fn process_args(args: Vec<String>) -> Result<()> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;
    log::debug!("實際使用的配置：{:?}", config);

    match cli.command {
        Command::Convert(args) => run_convert(&config, args),
        Command::Parse(args) => run_parse(&config, args),
        Command::Info { files } => {
            let parser = ParserFacade::new(&config.dear_omg_path)?;
            let infos = files
                .iter()
                .map(|file| parser.get_file_info(file))
                .collect::<Result<Vec<_>>>()?;
            print_file_infos(&infos, config.json)
        }
        Command::Formats => print_supported_formats(SUPPORTED_FORMATS, config.json),
    }
}

fn run_convert(config: &AppConfig, args: ConvertArgs) -> Result<()> {
    validate_file_patterns(&args.include, &args.exclude).map_err(DearOmgError::msg)?;
    let (include_set, exclude_set) = create_regex_sets(&args.include, args.exclude.as_deref().unwrap_or(&[]));
    let input_files = collect_input_files(&args.inputs, &include_set, &exclude_set)?;

    let converter = ConverterFacade::with_runner(
        &config.dear_omg_path,
        Box::new(ProcessService::new(config.no_progress)),
    )?;
    let settings = ConversionSettings {
        write_mode: args.write_mode,
        precision: args.precision,
        skip_zero: args.skip_zero,
        require_fresh: args.require_fresh,
    };
    log::info!(
        "開始轉換 {} 個檔案，輸出目錄：{}，設定：{:?}",
        input_files.len(),
        args.output.display(),
        settings
    );
    let output = converter.convert_files(ConversionInput::new(input_files, &args.output).with_settings(settings))?;
    print_conversion(&output, config.json)
}

fn run_parse(config: &AppConfig, args: ParseArgs) -> Result<()> {
    let parser = ParserFacade::with_runner(
        &config.dear_omg_path,
        Box::new(ProcessService::new(config.no_progress)),
    )?;
    let output = parser.parse_omg_file(ParseInput {
        omg_file: args.omg_file,
        num_threads: args.num_threads,
        read_mode: args.read_mode,
    })?;
    print_parse(&output, config.json)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| DearOmgError::msg(format!("JSON 序列化失敗: {}", e)))?;
    println!("{}", text);
    Ok(())
}

pub fn print_conversion(output: &ConversionOutput, json: bool) -> Result<()> {
    if json {
        return print_json(&output.results);
    }
    println!("轉換結果：");
    for (input_file, outcome) in &output.results {
        println!("  {} -> {}", input_file.display(), outcome);
    }
    println!("成功 {} / {} 個檔案", output.converted_count(), output.results.len());
    Ok(())
}

pub fn print_parse(output: &ParseOutput, json: bool) -> Result<()> {
    if json {
        return print_json(output);
    }
    println!("解析結果：{}", output.omg_file.display());
    println!("  讀取模式：{}", output.read_mode);
    match output.threads_used {
        Some(threads) => println!("  使用執行緒：{}", threads),
        None => println!("  使用執行緒：N/A"),
    }
    match output.elapsed_time {
        Some(seconds) => println!("  耗時：{} 秒", seconds),
        None => println!("  耗時：N/A"),
    }
    println!("  成功：{}", output.success);
    Ok(())
}

pub fn print_file_infos(infos: &[FileInfo], json: bool) -> Result<()> {
    if json {
        return print_json(infos);
    }
    for info in infos {
        println!("檔案：{}", info.file_path.display());
        println!("  大小：{}（{} 位元組）", format_file_size(info.file_size_bytes), info.file_size_bytes);
        println!("  修改時間：{}", format_timestamp(info.last_modified));
    }
    Ok(())
}

pub fn print_supported_formats(formats: &[SupportedFormat], json: bool) -> Result<()> {
    if json {
        return print_json(formats);
    }
    println!("支援的輸入格式：");
    for tool in ToolKind::ALL {
        let extensions: Vec<&str> = formats
            .iter()
            .filter(|format| format.tool == tool)
            .map(|format| format.extension)
            .collect();
        println!("  {}: {}", tool, extensions.join(", "));
    }
    Ok(())
}
