//! Command-line interface.

use crate::app::{App, AppConfig};
use crate::script::load_script;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "labelgrid", version, about = "Label sheet editor (headless shell)")]
pub struct Args {
    /// Config JSON file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Sheet storage directory (overrides the config file)
    #[arg(short = 's', long = "store", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an empty sheet
    New {
        name: String,
        /// Overwrite an existing sheet
        #[arg(long)]
        force: bool,
    },
    /// Show a summary of a stored sheet
    Info { name: String },
    /// List stored sheets
    List,
    /// Apply a JSON script of editing steps to a sheet and save it
    Replay {
        name: String,
        script: PathBuf,
        /// Save the result under another name
        #[arg(long = "save-as")]
        save_as: Option<String>,
    },
    /// Store a sheet document file
    Import {
        path: PathBuf,
        /// Sheet name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// Write a stored sheet to a document file
    Export { name: String, path: PathBuf },
    /// Delete a stored sheet
    Delete { name: String },
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(store) = args.store {
        config.storage_dir = Some(store);
    }
    let app = App::open(config)?;
    pollster::block_on(execute(&app, args.command))
}

async fn execute(app: &App<labelgrid_core::FileStorage>, command: Command) -> Result<()> {
    match command {
        Command::New { name, force } => {
            println!("{}", app.create(&name, force).await?);
        }
        Command::Info { name } => {
            println!("{}", app.summary(&name).await?);
        }
        Command::List => {
            for name in app.list().await? {
                println!("{}", name);
            }
        }
        Command::Replay {
            name,
            script,
            save_as,
        } => {
            let steps = load_script(&script)?;
            let base_dir = script.parent().unwrap_or(Path::new("."));
            let (report, summary) = app
                .replay(&name, &steps, base_dir, save_as.as_deref())
                .await?;
            for (index, err) in &report.rejected {
                println!("step {}: {}", index + 1, err);
            }
            println!(
                "{} steps, {} rejected, {} events",
                report.steps,
                report.rejected.len(),
                report.events
            );
            println!("{}", summary);
        }
        Command::Import { path, name } => {
            let name = match name {
                Some(name) => name,
                None => path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                    .context("Cannot derive a sheet name from the file name; pass --name")?,
            };
            println!("{}", app.import(&path, &name).await?);
        }
        Command::Export { name, path } => {
            app.export(&name, &path).await?;
            println!("Exported {} to {}", name, path.display());
        }
        Command::Delete { name } => {
            app.delete(&name).await?;
            println!("Deleted {}", name);
        }
    }
    Ok(())
}
