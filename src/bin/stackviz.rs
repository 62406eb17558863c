use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stackviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a named scene into timeline JSON for the rendering engine.
    Timeline(TimelineArgs),
    /// List the built-in scenes.
    Scenes,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Scene name (see `stackviz scenes`).
    #[arg(long)]
    scene: String,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Scenes => cmd_scenes(),
    }
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let scene = stackviz::scene_by_name(&args.scene).with_context(|| {
        format!(
            "unknown scene '{}' (run `stackviz scenes` to list them)",
            args.scene
        )
    })?;

    let timeline = stackviz::compile_scene(&scene)?;
    let json = serde_json::to_string_pretty(&timeline).context("serialize timeline JSON")?;

    match &args.out {
        Some(out) => {
            write_output(out, &json)?;
            eprintln!(
                "wrote {} ({} directives, {:.1}s)",
                out.display(),
                timeline.directives.len(),
                timeline.duration_secs()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write timeline '{}'", path.display()))
}

fn cmd_scenes() -> anyhow::Result<()> {
    for name in stackviz::scene_names() {
        let scene = stackviz::scene_by_name(name).context("built-in scene must resolve (bug)")?;
        println!("{name}: {}", scene.title);
    }
    Ok(())
}
