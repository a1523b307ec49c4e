//! Command-line front end for rendering quote, lyric and post graphics.

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug, error, info};

use textcard::batch::{self, BatchReport};
use textcard::content::{POST_CONTENT_HELP, QUOTE_CONTENT_HELP};
use textcard::settings::{self, POST_SETTINGS_HELP, QUOTE_SETTINGS_HELP};
use textcard::{FontSystem, GraphicSettings, PostContent, QuoteContent};

#[derive(Parser, Debug)]
#[command(name = "textcard", version, about)]
struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Extra directory to load fonts from, on top of the system fonts.
    #[arg(long, global = true)]
    fonts_dir: Vec<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one quote or lyric.
    Quote {
        /// Title, also the output file name.
        #[arg(long)]
        title: String,
        /// Text to draw.
        #[arg(long)]
        text: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render one social-media post.
    Post {
        /// Output file name.
        #[arg(long)]
        name: String,
        /// Author display name.
        #[arg(long)]
        display_name: String,
        /// Author handle; "@" is added when missing.
        #[arg(long)]
        handle: String,
        /// Profile picture to draw beside the name.
        #[arg(long)]
        avatar: Option<PathBuf>,
        /// Post body.
        #[arg(long)]
        text: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render every quote of a JSON file ({"title": "text", ...}).
    Quotes {
        file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render every post of a JSON file (array of post objects).
    Posts {
        file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Describe the settings or content file format.
    Explain {
        #[arg(value_enum)]
        topic: Topic,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON settings file; takes precedence over --preset.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Named preset (lyrics, quote, light, dark, blue).
    #[arg(long)]
    preset: Option<String>,

    /// Directory to write the PNG files to (current directory by default).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl RenderArgs {
    fn resolve<S: GraphicSettings>(&self) -> anyhow::Result<S> {
        let custom = self
            .settings
            .as_deref()
            .map(S::from_json_file)
            .transpose()
            .context("invalid settings file")?;
        Ok(settings::resolve(custom, self.preset.as_deref())?)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Topic {
    QuoteSettings,
    PostSettings,
    Quotes,
    Posts,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!("parsed arguments: {cli:?}");

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a batch finished with failed items.
fn run(cli: Cli) -> anyhow::Result<bool> {
    if let Command::Explain { topic } = cli.cmd {
        let text = match topic {
            Topic::QuoteSettings => QUOTE_SETTINGS_HELP,
            Topic::PostSettings => POST_SETTINGS_HELP,
            Topic::Quotes => QUOTE_CONTENT_HELP,
            Topic::Posts => POST_CONTENT_HELP,
        };
        println!("{text}");
        return Ok(true);
    }

    let system = font_system(&cli.fonts_dir);

    match cli.cmd {
        Command::Quote {
            title,
            text,
            render,
        } => {
            let settings = render.resolve()?;
            let content = QuoteContent::new(title, text)?;
            let path = system.render_quote(&content, &settings, render.out_dir.as_deref())?;
            println!("{}", path.display());
            Ok(true)
        }
        Command::Post {
            name,
            display_name,
            handle,
            avatar,
            text,
            render,
        } => {
            let settings = render.resolve()?;
            let content = PostContent::new(name, display_name, handle, avatar, text)?;
            let path = system.render_post(&content, &settings, render.out_dir.as_deref())?;
            println!("{}", path.display());
            Ok(true)
        }
        Command::Quotes { file, render } => {
            let settings = render.resolve()?;
            let quotes = batch::read_quotes(&file)?;
            let report =
                batch::render_quotes(&system, quotes, &settings, render.out_dir.as_deref());
            Ok(summarize(&report))
        }
        Command::Posts { file, render } => {
            let settings = render.resolve()?;
            let posts = batch::read_posts(&file)?;
            let report = batch::render_posts(&system, posts, &settings, render.out_dir.as_deref());
            Ok(summarize(&report))
        }
        Command::Explain { .. } => Ok(true),
    }
}

fn font_system(fonts_dirs: &[PathBuf]) -> FontSystem {
    let system = FontSystem::new();
    system.load_system_fonts();
    for dir in fonts_dirs {
        system.load_fonts_dir(dir.clone());
    }
    info!("{} font faces available", system.font_storage.lock().len());
    system
}

fn summarize(report: &BatchReport) -> bool {
    for path in report.rendered() {
        println!("{}", path.display());
    }
    for (name, err) in report.failures() {
        eprintln!("{name}: {err}");
    }
    report.is_success()
}
