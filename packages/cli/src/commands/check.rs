use super::{load_session, PRFTREE_EXTENSIONS};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use prooftree_editor::EditorConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// prftree file or directory to check
    pub input: PathBuf,

    /// Also report files that pass
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn check(args: CheckArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;

    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_prftree_files(&args.input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", args.input.display()));
    };

    let failed = files
        .iter()
        .filter(|file| !check_file(file, &config, args.verbose))
        .count();

    println!();
    println!("   Files checked: {}", files.len());
    if failed > 0 {
        return Err(anyhow!("{} of {} files have errors", failed, files.len()));
    }
    println!("   {} No issues found!", "✓".green());
    Ok(())
}

/// Returns `false` if the file failed to parse
fn check_file(path: &Path, config: &EditorConfig, verbose: bool) -> bool {
    match load_session(path, config) {
        Ok(session) => {
            if verbose {
                println!("{} {} ({} nodes)", "✓".green(), path.display(), session.tree().node_count());
            }
            true
        }
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            false
        }
    }
}

fn find_prftree_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| PRFTREE_EXTENSIONS.contains(&ext))
        })
        .collect()
}
