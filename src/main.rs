#[macro_use]
extern crate log;

use std::env::current_dir;
use std::error::Error;
use std::fs::{self, create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;

use clap::{crate_authors, crate_description, crate_version, Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use handletter::document::configuration::{Config, Mode};
use handletter::document::Document;
use handletter::glyphs::provider::GlyphDirectory;
use handletter::glyphs::GlyphCatalog;
use handletter::layout::geometry::{Orientation, PaperSize, LETTER_HEIGHTS};
use handletter::render::prepare_lines;
use handletter::units::Mm;
use handletter::Error as HError;

macro_rules! unwrap {
    ($e: expr, $error: expr) => {
        match $e {
            Some(e) => e,
            None => return Err(Box::new($error)),
        }
    };
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        error!("{}", e);
        exit(1);
    }
}

fn letter_height(value: &str) -> Result<u32, String> {
    let height = value.parse::<u32>().map_err(|e| e.to_string())?;

    if LETTER_HEIGHTS.contains(&height) {
        Ok(height)
    } else {
        Err(format!("expected one of {:?}", LETTER_HEIGHTS))
    }
}

fn overrides() -> Vec<Arg> {
    vec![
        Arg::new("paper")
            .long("paper")
            .help("Overrides the paper size (A1, A2, A3 or A4)")
            .value_parser(PaperSize::from_str),
        Arg::new("orientation")
            .long("orientation")
            .help("Overrides the orientation (portrait or landscape)")
            .value_parser(Orientation::from_str),
        Arg::new("letter-height")
            .long("letter-height")
            .help("Overrides the letter height in millimeters")
            .value_parser(letter_height),
        Arg::new("label")
            .long("label")
            .help("Overrides the label printed in the footer"),
    ]
}

fn run() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("handletter")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .subcommand_required(true)
        .subcommand(
            Command::new("init")
                .about("Creates a new default handletter project")
                .arg(Arg::new("TITLE").required(false)),
        )
        .subcommand(
            Command::new("build")
                .about("Renders the project into a pdf")
                .args(overrides()),
        )
        .subcommand(
            Command::new("check")
                .about("Reports missing glyphs and lines too long without rendering")
                .args(overrides()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("init", init)) => self::init(init),
        Some(("build", build)) => self::build(build),
        Some(("check", check)) => self::check(check),
        _ => Ok(()),
    }
}

fn init(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut current_dir = unwrap!(current_dir().ok(), HError::CannotReadCurrentDir);
    let current_dir_name = current_dir.clone();
    let current_dir_name = unwrap!(current_dir_name.file_name(), HError::CannotReadCurrentDir);
    let current_dir_name = unwrap!(current_dir_name.to_str(), HError::CannotReadCurrentDir);

    // If a title is given, the project gets its own directory.
    let title = match matches.get_one::<String>("TITLE") {
        Some(title) => {
            current_dir.push(title);
            title.as_str()
        }
        None => current_dir_name,
    };

    let config = Config::with_title(title);
    create_dir_all(current_dir.join(&config.glyphs))?;

    let toml = toml::to_string(&config)?;
    let mut file = File::create(current_dir.join("handletter.toml"))?;
    file.write_all(toml.as_bytes())?;

    let mut file = File::create(current_dir.join(&config.input))?;
    file.write_all(b"HELLO\nWORLD\n")?;

    info!("created project {} in {}", title, current_dir.display());

    Ok(())
}

/// Looks for handletter.toml in the current directory and its parents.
fn find_config() -> Result<(PathBuf, Config), Box<dyn Error>> {
    let mut current_dir = unwrap!(current_dir().ok(), HError::CannotReadCurrentDir);

    let config_path = loop {
        current_dir.push("handletter.toml");

        if current_dir.is_file() {
            break current_dir;
        }

        // Remove handletter.toml, then go to the parent directory.
        current_dir.pop();
        if !current_dir.pop() {
            return Err(Box::new(HError::NoConfigFile));
        }
    };

    debug!("using {}", config_path.display());
    let content = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&content)?;

    let root = unwrap!(config_path.parent(), HError::NoConfigFile).to_owned();
    Ok((root, config))
}

fn load(matches: &ArgMatches) -> Result<(PathBuf, Config, Vec<String>), Box<dyn Error>> {
    let (root, mut config) = find_config()?;

    if let Some(paper) = matches.get_one::<PaperSize>("paper") {
        config.paper = *paper;
    }

    if let Some(orientation) = matches.get_one::<Orientation>("orientation") {
        config.orientation = *orientation;
    }

    if let Some(height) = matches.get_one::<u32>("letter-height") {
        config.letter_height = Mm(f64::from(*height));
    }

    if let Some(label) = matches.get_one::<String>("label") {
        config.label = label.clone();
    }

    let text = fs::read_to_string(root.join(&config.input))?;
    let lines = prepare_lines(&text);
    info!("read {} lines from {}", lines.len(), config.input);

    Ok((root, config, lines))
}

fn build(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let (root, config, lines) = load(matches)?;

    let document = match config.mode {
        Mode::Images => {
            let directory = GlyphDirectory::open(root.join(&config.glyphs))?;
            let catalog = GlyphCatalog::load(&directory);
            let layout = config.renderer(&catalog).compose(&lines)?;
            Document::render(&config.title, &layout, Some(&directory))?
        }

        Mode::Font => {
            let glyphs = config.font_glyphs();
            let layout = config.renderer(&glyphs).compose(&lines)?;
            Document::render(&config.title, &layout, None)?
        }
    };

    if !document.skipped_glyphs().is_empty() {
        warn!("left {:?} blank", document.skipped_glyphs());
    }

    let output = root.join(&config.output);
    let pages = document.page_count();
    document.save(&output)?;
    info!("wrote {} pages to {}", pages, output.display());

    Ok(())
}

fn check(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let (root, config, lines) = load(matches)?;

    let report = match config.mode {
        Mode::Images => {
            let directory = GlyphDirectory::open(root.join(&config.glyphs))?;
            let catalog = GlyphCatalog::load(&directory);
            let renderer = config.renderer(&catalog);
            renderer.accept(renderer.validate(&lines))?
        }

        Mode::Font => {
            let glyphs = config.font_glyphs();
            let renderer = config.renderer(&glyphs);
            renderer.accept(renderer.validate(&lines))?
        }
    };

    if report.is_clean() {
        info!("{} lines, no problem found", lines.len());
    } else {
        warn!("{} lines, the document can be built\n{}", lines.len(), report);
    }

    Ok(())
}
