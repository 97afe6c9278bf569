use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

use store_linker::cli::parse_cli_to_app_config;
use store_linker::config::AppConfig;
use store_linker::error::PipelineError;
use store_linker::export::{ExportEncoding, write_artifact};
use store_linker::load::load_table;
use store_linker::logging::init_tracing_from_env;
use store_linker::pipeline::process;

fn main() {
    init_tracing_from_env();

    let cfg = match parse_cli_to_app_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(2);
        }
    };

    // Every processing failure surfaces as a message here; the run produces
    // either the complete artifacts or nothing.
    if let Err(e) = run(&cfg) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        eprintln!("Fix the input file and run again.");
        std::process::exit(1);
    }
}

fn ensure_out_dir(dir: &Path) -> Result<(), PipelineError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        PipelineError::Unexpected(format!("creating output directory {}: {}", dir.display(), e))
    })
}

fn run(cfg: &AppConfig) -> Result<()> {
    let input = load_table(Path::new(&cfg.input))
        .with_context(|| format!("loading {}", cfg.input))?;

    let reference_date = cfg
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!("reference date: {}", reference_date);

    let projected = process(&input, &cfg.columns, reference_date)?;

    let out_dir = Path::new(&cfg.export.out_dir);
    ensure_out_dir(out_dir)?;

    if cfg.export.wants_shift_jis() {
        let path = out_dir.join(&cfg.export.windows_name);
        write_artifact(&projected, &path, ExportEncoding::ShiftJis)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if cfg.export.wants_utf8_bom() {
        let path = out_dir.join(&cfg.export.mac_name);
        write_artifact(&projected, &path, ExportEncoding::Utf8Bom)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    info!("done: {} rows exported", projected.row_count());
    Ok(())
}
