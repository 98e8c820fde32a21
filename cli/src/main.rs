use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xivlog_cli::{CliContext, commands, dir_watcher, logging, readline};

/// Wipe and damage-taken analysis for FFXIV ACT network logs
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Parse a log file, print a report per attempt and exit
    #[arg(long, value_name = "FILE")]
    parse: Option<PathBuf>,

    /// Also print state changes
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let args = Args::parse();
    let ctx = CliContext::new();

    if let Some(path) = args.parse {
        return commands::parse_once(&path, args.verbose, &ctx).await;
    }

    if let Some(handle) = dir_watcher::init_watcher(&ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => println!("{err}"),
        }
    }

    ctx.tasks.lock().await.abort_all();
    Ok(())
}

#[derive(Parser)]
#[command(name = "xivlog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a log from the start, then tail it
    ParseFile {
        #[arg(short, long)]
        path: String,
    },
    Summary,
    Fights,
    Attempt {
        #[arg(short, long)]
        fight: u32,
        #[arg(short, long)]
        number: u32,
    },
    /// Write the session as JSON
    Export {
        #[arg(short, long)]
        path: String,
    },
    ListFiles,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "xivlog".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::ParseFile { path }) => commands::parse_file(path, ctx).await?,
        Some(Commands::Summary) => commands::show_summary(ctx).await?,
        Some(Commands::Fights) => commands::list_fights(ctx).await?,
        Some(Commands::Attempt { fight, number }) => {
            commands::show_attempt(ctx, *fight, *number).await?
        }
        Some(Commands::Export { path }) => commands::export(ctx, path).await?,
        Some(Commands::ListFiles) => commands::list_files(ctx).await?,
        Some(Commands::SetDirectory { path }) => commands::set_directory(path, ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
