//! Offline region purge binary — resets world chunks outside protected bases.
//!
//! Usage: cargo run --release --bin purge_regions -- [OPTIONS]
//!
//! Options:
//!   --chunks-dir <PATH>   World chunks directory (required)
//!   --backups-dir <PATH>  Where backups are written (default: "backups")
//!   --base <X,Z>          Block position of a base to protect (repeatable)
//!   --radius <CHUNKS>     Protect radius around each base (default: from config)
//!   --config <PATH>       Config file (default: "rechunk.json")
//!   --dry-run             Report the classification without deleting
//!   --no-backup           Skip the backup step

use std::path::PathBuf;
use std::process::ExitCode;

use rechunk::core::Config;
use rechunk::maintenance::{self, PurgeOptions};
use rechunk::world::BlockPos;

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();

    let Some(chunks_dir) = parse_str_arg(&args, "--chunks-dir") else {
        eprintln!("Missing required --chunks-dir <PATH>");
        return ExitCode::FAILURE;
    };
    let backups_dir = parse_str_arg(&args, "--backups-dir")
        .unwrap_or_else(|| "backups".to_string());
    let config_path = parse_str_arg(&args, "--config")
        .unwrap_or_else(|| "rechunk.json".to_string());
    let config = Config::load(&PathBuf::from(&config_path));

    let radius = parse_i32_arg(&args, "--radius").unwrap_or(config.protect_radius);
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let backup = config.backup && !args.iter().any(|a| a == "--no-backup");

    let bases = match parse_base_args(&args) {
        Ok(bases) => bases,
        Err(bad) => {
            eprintln!("Invalid --base value '{}', expected X,Z", bad);
            return ExitCode::FAILURE;
        }
    };

    let opts = PurgeOptions {
        chunks_dir: PathBuf::from(chunks_dir),
        backups_dir: PathBuf::from(backups_dir),
        bases,
        radius,
        dry_run,
        backup,
    };

    match maintenance::run(&opts) {
        Ok(report) => {
            if report.dry_run {
                log::info!(
                    "Dry run: {} protected, {} would be reset",
                    report.protected,
                    report.reset
                );
            } else {
                log::info!(
                    "Done: {} protected, {} deleted of {} reset",
                    report.protected,
                    report.deleted,
                    report.reset
                );
                if let Some(path) = report.backup_path {
                    log::info!("Backup written to {}", path.display());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Purge failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_i32_arg(args: &[String], name: &str) -> Option<i32> {
    parse_str_arg(args, name).and_then(|v| v.parse().ok())
}

/// Collect every `--base X,Z` occurrence
fn parse_base_args(args: &[String]) -> Result<Vec<BlockPos>, String> {
    let mut bases = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--base" {
            let value = iter.next().ok_or_else(|| String::from("<missing>"))?;
            let (x, z) = value.split_once(',').ok_or_else(|| value.clone())?;
            let x: i32 = x.trim().parse().map_err(|_| value.clone())?;
            let z: i32 = z.trim().parse().map_err(|_| value.clone())?;
            bases.push(BlockPos::new(x, z));
        }
    }
    Ok(bases)
}
