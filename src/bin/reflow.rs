use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use reflow::song::{AppContext, Song, SongData, SongEdit};
use reflow::{ControlTree, HeadlessFactory, LayoutConfig, Size};

#[derive(Parser, Debug)]
#[command(name = "reflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the song editor headless and dump its layout as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Window width.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Window height.
    #[arg(long, default_value_t = 300.0)]
    height: f64,

    /// Layout config JSON (spacing, root autoresize).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Retitle the song from a background thread before dumping.
    #[arg(long)]
    title: Option<String>,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
    }
}

fn demo_song() -> Arc<Song> {
    Song::new(SongData {
        url: "file:///music/demo.flac".to_owned(),
        artist: "Demo Artist".to_owned(),
        title: "Demo Title".to_owned(),
        rating: Some(0.8),
        tags: [("ambient".to_owned(), 1.0), ("calm".to_owned(), 0.5)]
            .into_iter()
            .collect(),
        metadata: [("album".to_owned(), "Demo Album".to_owned())]
            .into_iter()
            .collect(),
    })
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => LayoutConfig::from_path(path)?,
        None => LayoutConfig::default(),
    };

    let ctx = AppContext::new();
    let song = demo_song();
    ctx.set_current_song(Some(Arc::clone(&song)));
    let edit = SongEdit::new(Arc::clone(&ctx));

    let mut tree = ControlTree::new(
        edit,
        Size::new(args.width, args.height),
        config,
        HeadlessFactory::new(),
        Arc::new(|| tracing::trace!("ui wake")),
    )?;
    tree.build_children(tree.root())?;

    if let Some(title) = args.title {
        let worker = std::thread::spawn(move || song.set_title(title));
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("title worker panicked"))?;
    }
    let ran = tree.run_pending();
    tracing::info!(ran, nodes = tree.len(), "drained ui queue");

    let json = tree.snapshot().to_json_pretty()?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write layout '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
