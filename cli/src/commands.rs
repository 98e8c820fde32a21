use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use xivlog_core::context::{self, AbilityFetcher, AppConfig, AppConfigExt, resolve_log_path};
use xivlog_core::{Attempt, Reader};

use crate::context::SessionHandle;
use crate::{CliContext, dir_watcher, report};

fn io_err(e: std::io::Error) -> String {
    e.to_string()
}

async fn current_session(ctx: &CliContext) -> Result<SessionHandle, String> {
    ctx.session()
        .await
        .ok_or_else(|| "No log file loaded".to_string())
}

fn print_attempt_line(attempt: &Attempt) {
    println!(
        "[{}] attempt #{} {} after {:.1}s ({} hits, {} deaths)",
        attempt.boss_name,
        attempt.attempt_number,
        attempt.outcome.as_str(),
        attempt.duration_seconds(),
        attempt.ability_hits.len(),
        attempt.deaths.len()
    );
}

pub async fn parse_file(path: &str, ctx: &CliContext) -> Result<(), String> {
    load_file(Path::new(path), ctx, true).await
}

/// Make `path` the active log: optionally parse what's already there, then tail it.
pub async fn load_file(path: &Path, ctx: &CliContext, read_existing: bool) -> Result<(), String> {
    let config = ctx.config.read().await.clone();
    let active_path = resolve_log_path(&config, path);
    if !active_path.is_file() {
        return Err(format!("File not found: {}", active_path.display()));
    }

    // Stop any current tailing task
    ctx.tasks.lock().await.abort_tail();

    let handle = ctx.start_session(active_path.clone()).await;
    let fetcher = AbilityFetcher::from_config(&config, Arc::clone(&ctx.ability_cache));

    let reader = if read_existing {
        let result = context::parse_file(Arc::clone(&handle), fetcher.as_ref())
            .await
            .map_err(|e| e.to_string())?;
        println!(
            "Processed {} lines ({} decoded) in {}ms",
            result.lines_processed, result.decoded_lines, result.elapsed_ms
        );
        result.reader
    } else {
        let end = std::fs::metadata(&active_path).map_err(io_err)?.len();
        handle.write().await.current_byte = Some(end);
        Reader::from(active_path.clone(), Arc::clone(&handle))
    };

    handle
        .write()
        .await
        .processor_mut()
        .on_attempt_complete(print_attempt_line);

    println!("Beginning file tail: {}", active_path.display());
    let mut tasks = ctx.tasks.lock().await;
    let reader = match fetcher {
        Some(fetcher) => {
            let (tx, rx) = mpsc::unbounded_channel();
            tasks.ability_fetcher = Some(tokio::spawn(fetcher.run(rx)));
            reader.with_ability_sink(tx)
        }
        None => reader,
    };
    tasks.log_tail = Some(tokio::spawn(async move {
        if let Err(e) = reader.tail_log_file().await {
            tracing::warn!(error = %e, "Log tail stopped");
        }
    }));
    Ok(())
}

pub async fn show_summary(ctx: &CliContext) -> Result<(), String> {
    let handle = current_session(ctx).await?;
    let s = handle.read().await;
    println!(
        "State: {} ({} lines processed)",
        s.processor().state(),
        s.processor().lines_processed()
    );
    report::write_session_summary(&mut std::io::stdout().lock(), s.session()).map_err(io_err)
}

pub async fn list_fights(ctx: &CliContext) -> Result<(), String> {
    let handle = current_session(ctx).await?;
    let s = handle.read().await;
    report::write_fight_list(&mut std::io::stdout().lock(), s.session()).map_err(io_err)
}

pub async fn show_attempt(ctx: &CliContext, fight_id: u32, number: u32) -> Result<(), String> {
    let handle = current_session(ctx).await?;
    let s = handle.read().await;
    let fight = s
        .session()
        .fight(fight_id)
        .ok_or_else(|| format!("No fight {}", fight_id))?;
    let attempt = fight
        .attempt(number)
        .ok_or_else(|| format!("Fight {} has no attempt {}", fight_id, number))?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{} (fight {})", fight.zone_name, fight.fight_id).map_err(io_err)?;
    report::write_attempt_report(&mut out, attempt).map_err(io_err)?;
    report::write_hit_timeline(&mut out, attempt).map_err(io_err)
}

pub async fn export(ctx: &CliContext, path: &str) -> Result<(), String> {
    let handle = current_session(ctx).await?;
    let json = {
        let s = handle.read().await;
        serde_json::to_string_pretty(s.session()).map_err(|e| e.to_string())?
    };
    std::fs::write(path, json).map_err(io_err)?;
    println!("Session exported to {}", path);
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    if let Some(path) = AppConfig::config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Log directory: {}", config.log_directory);
    println!("Ability cache: {}", config.ability_cache_path.display());
    println!("Read existing on start: {}", config.read_existing_on_start);
    println!(
        "XIVAPI: {} ({}, timeout {}s, batch {})",
        if config.xivapi.enabled { "enabled" } else { "disabled" },
        config.xivapi.base_url,
        config.xivapi.timeout_secs,
        config.xivapi.batch_size
    );
    if let Ok(cache) = ctx.ability_cache.read() {
        println!("Cached abilities: {}", cache.len());
    }
    if let Some(handle) = ctx.session().await {
        let s = handle.read().await;
        if let Some(active) = &s.active_file {
            println!("Active file: {}", active.display());
        }
    }
    Ok(())
}

pub fn exit() {
    println!("quitting...");
}

pub async fn list_files(ctx: &CliContext) -> Result<(), String> {
    let index_guard = ctx.file_index.read().await;
    let Some(index) = &*index_guard else {
        println!("No file index available");
        return Ok(());
    };

    if index.is_empty() {
        println!("No log files found");
        return Ok(());
    }

    println!("{:<40} {:<18} {:>10}", "File", "Modified", "Size (MB)");
    println!("{}", "-".repeat(70));
    for entry in index.entries() {
        let empty_marker = if entry.is_empty { " (empty)" } else { "" };
        println!(
            "{:<40} {:<18} {:>10.2}{}",
            entry.filename,
            entry.formatted_datetime(),
            entry.size_mb(),
            empty_marker
        );
    }

    println!(
        "\nTotal: {} files, {:.1} MB",
        index.len(),
        index.total_size() as f64 / (1024.0 * 1024.0)
    );
    Ok(())
}

pub async fn set_directory(new_directory: &str, ctx: &CliContext) -> Result<(), String> {
    let filepath = PathBuf::from(new_directory);
    if !filepath.is_dir() {
        return Err("Update failed. Invalid directory name given.".to_string());
    }

    {
        let mut config = ctx.config.write().await;
        if new_directory == config.log_directory {
            println!("Log directory already configured to {}", new_directory);
            return Ok(());
        }
        config.log_directory = new_directory.to_string();
        if let Err(e) = config.save() {
            tracing::warn!(error = %e, "Failed to save configuration");
        }
    }

    ctx.tasks.lock().await.abort_all();
    ctx.clear_session().await;
    *ctx.file_index.write().await = None;

    if let Some(handle) = dir_watcher::init_watcher(ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }
    Ok(())
}

/// One-shot mode: parse `path`, report each attempt as it completes, then
/// print the session summary.
pub async fn parse_once(path: &Path, verbose: bool, ctx: &CliContext) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Error: File not found: {}", path.display()));
    }
    println!("Parsing log file: {}", path.display());

    let config = ctx.config.read().await.clone();
    let handle = ctx.start_session(path.to_path_buf()).await;
    {
        let mut s = handle.write().await;
        let processor = s.processor_mut();
        processor.on_attempt_complete(|attempt| {
            if let Err(e) = report::write_attempt_report(&mut std::io::stdout().lock(), attempt) {
                tracing::warn!(error = %e, "Failed to write attempt report");
            }
        });
        if verbose {
            processor.on_state_change(|state| println!("[STATE] {}", state));
        }
    }

    let fetcher = AbilityFetcher::from_config(&config, Arc::clone(&ctx.ability_cache));
    let result = context::parse_file(Arc::clone(&handle), fetcher.as_ref())
        .await
        .map_err(|e| e.to_string())?;

    println!("Processed {} lines", report::thousands(result.lines_processed as i64));
    let s = handle.read().await;
    report::write_session_summary(&mut std::io::stdout().lock(), s.session()).map_err(io_err)
}
