use crate::CliContext;
use crate::commands;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use xivlog_core::directory_watcher::{self as core_watcher, DirectoryEvent, DirectoryWatcher};

/// Initialize the file index, load the newest log and start the watcher
pub async fn init_watcher(ctx: &CliContext) -> Option<JoinHandle<()>> {
    let (dir, read_existing) = {
        let config = ctx.config.read().await;
        (
            PathBuf::from(&config.log_directory),
            config.read_existing_on_start,
        )
    };

    if !dir.exists() {
        println!("Warning: Log directory {} does not exist", dir.display());
        return None;
    }

    match core_watcher::build_index(&dir) {
        Ok((index, newest)) => {
            println!("Indexed {} log files", index.len());
            *ctx.file_index.write().await = Some(index);

            if let Some(newest_path) = newest
                && let Err(e) = commands::load_file(&newest_path, ctx, read_existing).await
            {
                println!("{}", e);
            }
        }
        Err(e) => {
            println!("{}", e);
        }
    }

    let mut watcher = match DirectoryWatcher::new(&dir) {
        Ok(w) => w,
        Err(e) => {
            println!("Failed to start directory watcher: {}", e);
            return None;
        }
    };

    println!("Watching directory: {}", dir.display());

    let watcher_ctx = ctx.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            handle_watcher_event(event, &watcher_ctx).await;
        }
    });

    Some(handle)
}

async fn is_active_file(ctx: &CliContext, path: &Path) -> bool {
    match ctx.session().await {
        Some(session) => session.read().await.active_file.as_deref() == Some(path),
        None => false,
    }
}

async fn handle_watcher_event(event: DirectoryEvent, ctx: &CliContext) {
    match event {
        DirectoryEvent::NewFile(path) => {
            println!("New log file detected: {}", path.display());

            let is_latest_file = {
                let mut index_guard = ctx.file_index.write().await;
                match &mut *index_guard {
                    Some(index) => {
                        index.add_file(&path);
                        index.newest_file().is_some_and(|f| f.path == path)
                    }
                    None => false,
                }
            };

            // a fresh log starts from its first line
            if is_latest_file
                && let Err(e) = commands::load_file(&path, ctx, true).await
            {
                println!("{}", e);
            }
        }

        DirectoryEvent::FileModified(path) => {
            if let Some(index) = &mut *ctx.file_index.write().await {
                index.add_file(&path);
            }
        }

        DirectoryEvent::FileRemoved(path) => {
            if let Some(index) = &mut *ctx.file_index.write().await {
                index.remove_file(&path);
            }

            if !is_active_file(ctx, &path).await {
                return;
            }

            ctx.tasks.lock().await.abort_tail();
            ctx.clear_session().await;

            let next_file = ctx
                .file_index
                .read()
                .await
                .as_ref()
                .and_then(|idx| idx.newest_file())
                .map(|f| f.path.clone());

            if let Some(new_path) = next_file {
                println!("Active file removed, switching to: {}", new_path.display());
                if let Err(e) = commands::load_file(&new_path, ctx, true).await {
                    println!("{}", e);
                }
            }
        }

        DirectoryEvent::Message(msg) => {
            println!("{}", msg);
        }

        DirectoryEvent::Error(err) => {
            tracing::warn!(error = %err, "Directory watcher error");
        }
    }
}
