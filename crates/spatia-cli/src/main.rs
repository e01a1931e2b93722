//! spatia - inspect spatial transforms from the command line
//!
//! Converts between Euler angles, quaternions and matrices, builds projection
//! matrices and runs hierarchy propagation on generated scenes.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "spatia")]
#[command(author, version, about = "Spatial transform inspection CLI")]
#[command(long_about = "
Inspect the math behind a scene graph: rotations, TRS matrices,
camera projections and hierarchy propagation.

Angles are in degrees unless --radians is given. Matrices are printed
row by row; --json output lists elements column-major.

Examples:
  spatia euler 90 0 0                         # Euler -> quaternion + matrix
  spatia euler 30 45 60 --order ZYX --reorder XYZ
  spatia compose --position=1,2,3 --rotation 0,90,0 --scale 2,2,2
  spatia decompose 2 0 0 0  0 2 0 0  0 0 2 0  1 2 3 1
  spatia project perspective --fov 60 --aspect 1.777 --near 0.1 --far 100
  spatia project orthographic --left=-100 --right 100 --top 50 --bottom=-50 \\
      --view 200,100,100,0,100,100
  spatia chain --depth 4 --branching 3 --parallel
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Euler angles to a quaternion and rotation matrix
    #[command(visible_alias = "e")]
    Euler(EulerArgs),

    /// Build a TRS matrix from position, rotation and scale
    #[command(visible_alias = "c")]
    Compose(ComposeArgs),

    /// Split a 4x4 matrix into position, rotation and scale
    #[command(visible_alias = "d")]
    Decompose(DecomposeArgs),

    /// Build a perspective or orthographic projection matrix
    #[command(visible_alias = "p")]
    Project(ProjectArgs),

    /// Generate a node hierarchy and propagate world matrices
    Chain(ChainArgs),
}

#[derive(Args)]
struct EulerArgs {
    /// Rotation about X
    #[arg(allow_negative_numbers = true)]
    x: f64,

    /// Rotation about Y
    #[arg(allow_negative_numbers = true)]
    y: f64,

    /// Rotation about Z
    #[arg(allow_negative_numbers = true)]
    z: f64,

    /// Rotation order (XYZ, XZY, YXZ, YZX, ZXY, ZYX)
    #[arg(short, long, default_value = "XYZ")]
    order: String,

    /// Also express the rotation in another order
    #[arg(short, long)]
    reorder: Option<String>,

    /// Angles are in radians
    #[arg(long)]
    radians: bool,
}

#[derive(Args)]
struct ComposeArgs {
    /// Position as x,y,z
    #[arg(short, long, default_value = "0,0,0", allow_hyphen_values = true)]
    position: String,

    /// Euler rotation as x,y,z
    #[arg(short, long, default_value = "0,0,0", allow_hyphen_values = true)]
    rotation: String,

    /// Rotation order
    #[arg(short, long, default_value = "XYZ")]
    order: String,

    /// Scale as x,y,z
    #[arg(short, long, default_value = "1,1,1", allow_hyphen_values = true)]
    scale: String,

    /// Rotation angles are in radians
    #[arg(long)]
    radians: bool,
}

#[derive(Args)]
struct DecomposeArgs {
    /// 16 matrix elements, column-major (comma or space separated)
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    elements: Vec<String>,

    /// Elements are given row by row instead
    #[arg(long)]
    rows: bool,

    /// Order for the reported Euler angles
    #[arg(short, long, default_value = "XYZ")]
    order: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionKind {
    Perspective,
    Orthographic,
}

#[derive(Args)]
struct ProjectArgs {
    /// Projection kind
    #[arg(value_enum)]
    kind: ProjectionKind,

    /// Vertical field of view in degrees (perspective)
    #[arg(long, default_value = "50")]
    fov: f64,

    /// Aspect ratio width/height (perspective)
    #[arg(long, default_value = "1")]
    aspect: f64,

    /// Horizontal film offset in millimetres (perspective)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    film_offset: f64,

    /// Left plane (orthographic)
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    left: f64,

    /// Right plane (orthographic)
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    right: f64,

    /// Top plane (orthographic)
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    top: f64,

    /// Bottom plane (orthographic)
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    bottom: f64,

    /// Near plane distance
    #[arg(long, default_value = "0.1")]
    near: f64,

    /// Far plane distance
    #[arg(long, default_value = "2000")]
    far: f64,

    /// Zoom factor
    #[arg(long, default_value = "1")]
    zoom: f64,

    /// View window as full_width,full_height,offset_x,offset_y,width,height
    #[arg(long)]
    view: Option<String>,

    /// Depth convention: webgl, webgpu, or a numeric id (2000, 2001)
    #[arg(long, default_value = "webgl")]
    coordinate_system: String,

    /// Map near to 1 and far to 0
    #[arg(long)]
    reversed_depth: bool,
}

#[derive(Args)]
struct ChainArgs {
    /// Levels below the root
    #[arg(short, long, default_value = "3")]
    depth: usize,

    /// Children per node
    #[arg(short, long, default_value = "2")]
    branching: usize,

    /// Local offset of every child as x,y,z
    #[arg(long, default_value = "1,0,0", allow_hyphen_values = true)]
    offset: String,

    /// Rotation about Y applied at every level, in degrees
    #[arg(long, default_value = "30", allow_hyphen_values = true)]
    angle: f64,

    /// Use the parallel propagation pass
    #[arg(long)]
    parallel: bool,

    /// Force recomputation of every world matrix
    #[arg(long)]
    force: bool,

    /// Maximum number of nodes to print (0 = all)
    #[arg(long, default_value = "16")]
    limit: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Euler(args) => commands::euler::run(args, cli.json),
        Commands::Compose(args) => commands::compose::run(args, cli.json),
        Commands::Decompose(args) => commands::decompose::run(args, cli.json),
        Commands::Project(args) => commands::project::run(args, cli.json),
        Commands::Chain(args) => commands::chain::run(args, cli.json),
    }
}
