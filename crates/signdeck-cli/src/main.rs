//! SignDeck command line: export scene files to playback XML.

mod scene_file;

use anyhow::Context;
use clap::{Parser, Subcommand};
use scene_file::SceneFile;
use signdeck_core::{ConfigError, EditorConfig, ElementKind, ShortcutRegistry};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scene element {index}: {kind} has a blank {field}")]
    BlankPayload {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },
}

#[derive(Parser, Debug)]
#[command(name = "signdeck", about = "SignDeck signage layout tools", version)]
struct Cli {
    /// Editor configuration file (JSON).
    #[arg(long, global = true, env = "SIGNDECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a scene file to playback XML.
    Export {
        /// Scene file (JSON).
        scene: PathBuf,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print element counts and off-page elements of a scene file.
    Inspect { scene: PathBuf },
    /// List keyboard shortcuts.
    Shortcuts,
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, CliError> {
    match path {
        Some(path) => Ok(EditorConfig::from_path(path)?),
        None => Ok(EditorConfig::default()),
    }
}

fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Export { scene, output } => {
            let config = load_config(cli.config.as_deref())?;
            let canvas = SceneFile::from_path(&scene)?.into_canvas(config)?;
            let xml = canvas.export_xml();
            match output {
                Some(path) => {
                    std::fs::write(&path, &xml).map_err(|source| CliError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    log::info!("Wrote {} elements to {}", canvas.scene().len(), path.display());
                }
                None => out.write_all(xml.as_bytes()).context("failed to write export")?,
            }
        }
        Command::Inspect { scene } => {
            let config = load_config(cli.config.as_deref())?;
            let page = config.page_rect();
            let canvas = SceneFile::from_path(&scene)?.into_canvas(config)?;
            writeln!(out, "page: {}x{}", page.width(), page.height())?;
            writeln!(out, "elements: {}", canvas.scene().len())?;
            for kind in ElementKind::ALL {
                let count = canvas.scene().iter_kind(kind).count();
                if count > 0 {
                    writeln!(out, "  {}: {}", kind.name(), count)?;
                }
            }
            let off_page = canvas
                .scene()
                .iter()
                .filter(|e| !page.intersect(e.bounds()).area().is_normal())
                .count();
            writeln!(out, "off page: {off_page}")?;
        }
        Command::Shortcuts => {
            for line in ShortcutRegistry::table() {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCENE: &str = r##"{
        "elements": [
            { "position": { "x": 0, "y": 0 }, "body": { "kind": "clock" } },
            { "position": { "x": 5000, "y": 5000 }, "body": { "kind": "qr_code", "text": "menu", "size": 200 } }
        ]
    }"##;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn scene_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("scene.json");
        std::fs::write(&path, SCENE).unwrap();
        path
    }

    #[test]
    fn test_export_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(&dir);
        let xml = run_args(&["signdeck", "export", scene.to_str().unwrap()]).unwrap();
        assert!(xml.starts_with("<?xml version='1.0'?>"));
        assert_eq!(xml.matches("<Section ").count(), 2);
        assert!(xml.contains("type=\"clock\""));
    }

    #[test]
    fn test_export_to_file_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(&dir);
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{ "page_width": 1920, "page_height": 1080 }"#).unwrap();
        let output = dir.path().join("out.xml");

        let printed = run_args(&[
            "signdeck",
            "--config",
            config.to_str().unwrap(),
            "export",
            scene.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(printed, "");
        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("width=\"1920\" height=\"1080\""));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(&dir);
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{ "page_width": 0 }"#).unwrap();
        let err = run_args(&[
            "signdeck",
            "export",
            scene.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(&dir);
        let report = run_args(&["signdeck", "inspect", scene.to_str().unwrap()]).unwrap();
        assert_eq!(
            report,
            "page: 3840x2160\nelements: 2\n  qr_code: 1\n  clock: 1\noff page: 1\n"
        );
    }

    #[test]
    fn test_shortcuts_listing() {
        let listing = run_args(&["signdeck", "shortcuts"]).unwrap();
        assert_eq!(listing.lines().count(), ShortcutRegistry::all().len());
        assert!(listing.contains("Mod+Shift+G"));
    }
}
