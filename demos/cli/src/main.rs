use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, Sender, unbounded};
use env_logger::Env;
use log::{debug, info, warn};

use octant::{Octree, PointSet, Representation, Settings, lod::LodController};

/// Point cloud octree explorer
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Input file (`.xyz`, `.txt`, `.obj`, `.ply`, or `.stl`)
    #[clap(short, long)]
    input: PathBuf,

    #[clap(flatten)]
    settings: TreeSettings,

    /// Accept an input file with no points
    #[clap(long)]
    allow_empty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Prints statistics about the point set and its octree
    Info,

    /// Writes the wireframe at a single level
    Export {
        /// Level at which to cut the octree
        #[clap(short, long)]
        level: usize,

        /// Name of a `.obj` file to write (stdout if omitted)
        #[clap(short, long)]
        out: Option<PathBuf>,
    },

    /// Reads levels from stdin (one per line), redrawing after each
    Interactive {
        /// Directory in which to write a `level-N.obj` file per redraw
        #[clap(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct TreeSettings {
    /// Maximum number of points in a leaf cell
    #[clap(long, default_value_t = 5)]
    max_points: usize,

    /// Maximum octree depth
    #[clap(long, default_value_t = 20)]
    max_depth: u8,

    /// Use the tight bounding box as the root, instead of a cube
    #[clap(long)]
    tight: bool,
}

impl From<&TreeSettings> for Settings {
    fn from(s: &TreeSettings) -> Self {
        Settings {
            max_points: s.max_points,
            max_depth: s.max_depth,
            cubic: !s.tight,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

fn write_level(rep: &Representation, path: &Path) -> Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("could not create {path:?}"))?;
    rep.wireframe().write_obj(&mut f)?;
    Ok(())
}

/// Forwards stdin lines to the main thread until EOF
fn stdin_thread(tx: Sender<String>) -> Result<()> {
    for line in std::io::stdin().lock().lines() {
        tx.send(line?)?;
    }
    debug!("stdin thread reached EOF");
    Ok(())
}

fn run_interactive(
    octree: &Octree,
    points: &PointSet,
    rx: Receiver<String>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = &out_dir {
        std::fs::create_dir_all(dir)?;
    }
    let redraw = |rep: &Representation, _points: &PointSet| -> Result<()> {
        let populated = rep.counts.iter().filter(|n| **n > 0).count();
        info!(
            "level {}: {} boxes ({populated} with points)",
            rep.level,
            rep.len(),
        );
        if let Some(dir) = &out_dir {
            write_level(rep, &dir.join(format!("level-{}.obj", rep.level)))?;
        }
        Ok(())
    };

    let mut lod = LodController::new(octree, points, redraw)?;
    info!("levels range from 0 to {}", octree.max_depth());
    while let Ok(line) = rx.recv() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<f64>() {
            Ok(level) => {
                lod.on_level_changed(level)?;
            }
            Err(e) => warn!("ignoring level {line:?}: {e}"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    let now = Instant::now();
    let mut points = octant::io::load(&args.input)
        .with_context(|| format!("failed to load {:?}", args.input))?;
    if !args.allow_empty {
        points = points.require_non_empty()?;
    }
    info!("Loaded {} points in {:?}", points.len(), now.elapsed());

    let start = Instant::now();
    let octree = Octree::build(&points, Settings::from(&args.settings))?;
    info!("Built octree in {:?}", start.elapsed());

    match args.cmd {
        Command::Info => {
            let b = points.bounds();
            println!("points:     {}", points.len());
            println!("bounds:     {:?} to {:?}", b.min(), b.max());
            println!("root:       {:?}", octree.bounds());
            println!("max depth:  {}", octree.max_depth());
            println!("cells:      {}", octree.cell_count());
            println!("leafs:      {}", octree.leaf_count());
        }
        Command::Export { level, out } => {
            let rep = octree.representation(level);
            info!("Exporting {} boxes at level {}", rep.len(), rep.level);
            if let Some(out) = out {
                write_level(&rep, &out)?;
            } else {
                rep.wireframe().write_obj(&mut std::io::stdout().lock())?;
            }
        }
        Command::Interactive { out_dir } => {
            // Levels are read on a worker thread and handled here, in order
            let (tx, rx) = unbounded();
            std::thread::spawn(move || {
                if let Err(e) = stdin_thread(tx) {
                    warn!("stdin thread failed: {e}");
                }
            });
            run_interactive(&octree, &points, rx, out_dir)?;
        }
    }

    Ok(())
}
