use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use survey_points::{
    drawing::{write_point_entities, DrawingDocument, DxfDocument},
    io::{preview_file, read_points_file, ColumnMapping, Delimiter, ImportOptions},
    table::Column,
    DocumentError, PointCollection, PointManager, Settings,
};

/// Manage survey point tables and the drawings they belong to.
#[derive(Parser)]
#[command(name = "survey_points_cli", version)]
struct Cli {
    /// JSON settings file with layer names, correlation radius and label style
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a point table.
    List { points: PathBuf },
    /// Show the first rows of a delimited file split into columns.
    Preview {
        input: PathBuf,
        #[arg(long, default_value = "comma")]
        delimiter: Delimiter,
        #[arg(long)]
        skip_header: bool,
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Add points from a delimited file to a point table, skipping known IDs.
    Import {
        input: PathBuf,
        points: PathBuf,
        #[arg(long, default_value = "comma")]
        delimiter: Delimiter,
        #[arg(long)]
        skip_header: bool,
        /// Column roles, e.g. PNEZD (P=ID, N, E, Z=elevation, D=description, X=ignore)
        #[arg(long, default_value = "PNEZD")]
        columns: ColumnMapping,
        /// DXF drawing that receives the imported points
        #[arg(long)]
        drawing: Option<PathBuf>,
    },
    /// Place every point of a table into a DXF drawing.
    Draw { points: PathBuf, drawing: PathBuf },
    /// Rebuild points from a DXF drawing and merge them into a point table.
    Sync {
        drawing: PathBuf,
        points: PathBuf,
        /// Replace table entries whose ID is also found in the drawing
        #[arg(long)]
        overwrite: bool,
    },
}

fn init_logging() {
    if let Ok(path) = std::env::var("SURVEY_POINTS_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

/// Loads a point table, treating a missing file as an empty table.
fn load_table(path: &Path) -> std::io::Result<PointCollection> {
    if !path.exists() {
        return Ok(PointCollection::new());
    }
    let pts = read_points_file(path, &ImportOptions::default())?;
    Ok(PointCollection::from_points(pts))
}

fn print_table(points: &PointCollection) {
    let header: Vec<_> = Column::ALL.iter().map(|c| c.header()).collect();
    println!("{}", header.join("\t"));
    for p in points {
        let row: Vec<_> = Column::ALL.iter().map(|c| c.text(p)).collect();
        println!("{}", row.join("\t"));
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::load_or_default(cli.settings.as_deref());
    match cli.command {
        Commands::List { points } => {
            let table = load_table(&points)
                .map_err(|e| format!("Error reading {}: {}", points.display(), e))?;
            let manager = PointManager::with_points(table, None, settings);
            print_table(manager.points());
            println!("{}", manager.count_label());
        }
        Commands::Preview {
            input,
            delimiter,
            skip_header,
            rows,
        } => {
            let preview = preview_file(&input, delimiter, skip_header, rows)
                .map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
            for row in &preview.rows {
                println!("{}", row.join(" | "));
            }
            println!("Columns: {}", preview.column_count);
        }
        Commands::Import {
            input,
            points,
            delimiter,
            skip_header,
            columns,
            drawing,
        } => {
            let table = load_table(&points)
                .map_err(|e| format!("Error reading {}: {}", points.display(), e))?;
            let options = ImportOptions {
                delimiter,
                skip_header,
                mapping: columns,
            };
            let mut doc = match &drawing {
                Some(path) => Some(DxfDocument::open_or_new(path).map_err(|e| {
                    format!("Error opening {}: {}", path.display(), e)
                })?),
                None => None,
            };
            let mut manager = PointManager::with_points(
                table,
                doc.as_mut().map(|d| d as &mut dyn DrawingDocument),
                settings,
            );
            let added = manager
                .import_file(&input, &options)
                .map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
            manager
                .export_csv(&points)
                .map_err(|e| format!("Error writing {}: {}", points.display(), e))?;
            println!("Imported {} points", added);
            println!("{}", manager.count_label());
            drop(manager);
            if let Some(doc) = doc {
                save_drawing(&doc)?;
            }
        }
        Commands::Draw { points, drawing } => {
            let table = load_table(&points)
                .map_err(|e| format!("Error reading {}: {}", points.display(), e))?;
            let mut doc = DxfDocument::open_or_new(&drawing)
                .map_err(|e| format!("Error opening {}: {}", drawing.display(), e))?;
            for p in &table {
                write_point_entities(&mut doc, p, &settings);
            }
            save_drawing(&doc)?;
            println!("Drew {} points", table.len());
        }
        Commands::Sync {
            drawing,
            points,
            overwrite,
        } => {
            let table = load_table(&points)
                .map_err(|e| format!("Error reading {}: {}", points.display(), e))?;
            let mut doc = DxfDocument::open(&drawing)
                .map_err(|e| format!("Error opening {}: {}", drawing.display(), e))?;
            let mut manager = PointManager::with_points(table, Some(&mut doc), settings);
            let summary = manager
                .sync_from_drawing(|_| overwrite)
                .map_err(|e| format!("Error reading {}: {}", drawing.display(), e))?;
            manager
                .export_csv(&points)
                .map_err(|e| format!("Error writing {}: {}", points.display(), e))?;
            println!(
                "Found {} points: {} added, {} replaced, {} kept",
                summary.found, summary.appended, summary.replaced, summary.kept
            );
            println!("{}", manager.count_label());
        }
    }
    Ok(())
}

fn save_drawing(doc: &DxfDocument) -> Result<(), String> {
    doc.save().map_err(|e: DocumentError| {
        let path = doc.path().map(|p| p.display().to_string()).unwrap_or_default();
        format!("Error writing {}: {}", path, e)
    })
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
