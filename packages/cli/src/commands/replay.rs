use super::load_session;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use prooftree_editor::{EditCommand, EditSession, EditorConfig, FieldPresentation};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file holding a list of edit commands
    pub script: PathBuf,

    /// Start from this prftree file instead of a blank node
    #[arg(short, long)]
    pub from: Option<PathBuf>,

    /// Print the markup after every step
    #[arg(long)]
    pub steps: bool,

    /// Print field presentations as JSON instead of markup
    #[arg(long)]
    pub json: bool,
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let commands = read_script(&args.script)?;

    let mut session = match &args.from {
        Some(path) => load_session(path, &config)?,
        None => EditSession::with_config(&config),
    };

    for (index, command) in commands.iter().enumerate() {
        command
            .run(&mut session)
            .with_context(|| format!("Step {} failed", index + 1))?;

        if args.steps {
            println!("{} {}", format!("[{}]", index + 1).dimmed(), serde_json::to_string(command)?);
            print!("{}", session.markup());
            println!();
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&presentations(&session))?);
    } else {
        print!("{}", session.markup());
    }

    let history = session.history();
    eprintln!(
        "{} Replayed {} steps ({} undo, {} redo levels)",
        "✓".green(),
        commands.len(),
        history.undo_levels(),
        history.redo_levels()
    );

    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<EditCommand>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let commands = serde_json::from_str(&content).with_context(|| format!("Invalid script {}", path.display()))?;
    Ok(commands)
}

/// Every visible field of the current tree, in pre-order
fn presentations(session: &EditSession) -> Vec<FieldPresentation> {
    session
        .tree()
        .node_ids()
        .into_iter()
        .flat_map(|node_id| session.present_node(node_id))
        .collect()
}
