use clap::Parser;
use colored::*;
use dirgrep::cli::{Cli, Commands};
use dirgrep::config::Config;
use dirgrep::engine::{Root, SearchEngine, SearchSpec};
use dirgrep::error::{DirgrepError, Result};
use dirgrep::filter::ExtensionRule;
use dirgrep::progress::{CancelToken, ProgressEvent};
use dirgrep::{loader, query};
use env_logger::{Builder, Env, Target};
use log::info;
use std::fs;
use std::time::Instant;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    let config = Config::load().unwrap_or_default();

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .map_err(|e| DirgrepError::Other(e.to_string()))?;

    let outcome = match &cli.command {
        Commands::Search {
            query,
            roots,
            extensions,
            regex,
            case_sensitive,
            ignore_case,
        } => {
            let regex_mode = *regex || config.search.regex;
            let ignore_case = !*case_sensitive && (*ignore_case || config.search.ignore_case);
            let pattern = query::build_pattern(query, regex_mode, ignore_case)?;
            let ext_list = extensions
                .clone()
                .unwrap_or_else(|| config.search.default_extensions.clone());
            let spec = SearchSpec {
                query: query.clone(),
                pattern,
                roots: roots.iter().map(Root::new).collect(),
                extensions: ext_list.into_iter().map(ExtensionRule::new).collect(),
            };
            run_search(&cancel, &spec)
        }
        Commands::View { file, line_numbers } => run_view(&cancel, file, *line_numbers),
    };

    match outcome {
        Ok(()) => {
            info!("Finished in {:.2?}", start_time.elapsed());
            Ok(())
        }
        Err(e) if e.is_cancelled() => {
            println!("{}", "Cancelled".yellow());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn run_search(cancel: &CancelToken, spec: &SearchSpec) -> Result<()> {
    info!("Searching for {:?}", spec.query);
    let engine = SearchEngine::new(cancel.clone());
    let mut on_progress = |event: ProgressEvent| {
        for m in &event.new_matches {
            println!(
                "{}:{}: {}",
                m.path.display().to_string().green(),
                m.line_number.to_string().yellow(),
                m.line
            );
        }
    };
    let summary = engine.search(spec, &mut on_progress)?;
    if summary.results.is_empty() {
        println!("{}", "No matches found".yellow());
    } else {
        println!(
            "\n{} {} matches in {} files",
            "Found".green(),
            summary.matches_found,
            summary.files_processed
        );
    }
    Ok(())
}

fn run_view(cancel: &CancelToken, file: &std::path::Path, line_numbers: bool) -> Result<()> {
    let mut on_progress = |count: usize| info!("{count} lines");
    let (lines, total) = loader::load_file_lines(file, cancel, &mut on_progress)?;
    for (i, line) in lines.iter().enumerate() {
        if line_numbers {
            println!("{} {}", (i + 1).to_string().dimmed(), line);
        } else {
            println!("{line}");
        }
    }
    println!("\n{} {} lines", file.display().to_string().green(), total);
    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(DirgrepError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(DirgrepError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| DirgrepError::Other(e.to_string()))?;
    Ok(())
}
