use super::load_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prooftree_editor::EditorConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// prftree file to format
    pub input: PathBuf,

    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    pub write: bool,
}

pub fn fmt(args: FmtArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let formatted = load_session(&args.input, &config)?.markup();

    if !args.write {
        print!("{}", formatted);
        return Ok(());
    }

    let original = fs::read_to_string(&args.input)?;
    if original == formatted {
        eprintln!("{} {} already formatted", "✓".green(), args.input.display());
    } else {
        fs::write(&args.input, &formatted)?;
        eprintln!("{} Formatted {}", "✓".green(), args.input.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_normalizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof.prf");
        fs::write(&path, "\\prftree[r]{E}{\\prftree{A}}{B}").unwrap();

        fmt(
            FmtArgs {
                input: path.clone(),
                write: true,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\\prftree[r]{E}\n{\n    \\prftree\n    { A }\n}\n{ B }\n"
        );
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.prf");
        fs::write(&path, "\\prftree{A").unwrap();

        let err = fmt(
            FmtArgs {
                input: path,
                write: false,
            },
            dir.path(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
