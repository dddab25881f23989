//! Subcommand handlers.

use std::io::Write;
use std::path::{Path, PathBuf};

use ansi_art::codec::EncodeOptions;
use ansi_art::config::{self, Config, ConfigError};
use ansi_art::document::{Document, DocumentError};
use ansi_art::grid::DEFAULT_WIDTH;
use ansi_art::render::{JsonRenderer, Renderer, TerminalRenderer};
use ansi_art::repair;

use super::args::{Command, ConfigAction};
use super::enums::{ColorMode, LineEndingArg};

/// Errors surfaced to the user by the binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),
}

/// Settings shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    /// Width from the command line, which beats both SAUCE and config.
    pub width: Option<usize>,
}

impl Context {
    pub fn new(config_path: Option<&Path>, width: Option<usize>) -> Result<Self, CliError> {
        let config = Config::load(config_path)?;
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config::default_path);
        Ok(Self {
            config,
            config_path,
            width,
        })
    }

    fn load(&self, path: &Path) -> Result<Document, CliError> {
        let fallback = self.config.render.width.unwrap_or(DEFAULT_WIDTH);
        Ok(Document::load_with(path, self.width, fallback)?)
    }

    fn encode_options(&self, color: Option<ColorMode>) -> EncodeOptions {
        let mut options = self.config.encode_options();
        if let Some(mode) = color {
            options.true_color = mode.is_true_color();
        }
        options
    }
}

/// Run one subcommand.
pub fn run(command: Command, ctx: &Context) -> Result<(), CliError> {
    match command {
        Command::View { file, color } => {
            let doc = ctx.load(&file)?;
            let renderer = TerminalRenderer::new(ctx.encode_options(color));
            print_out(&renderer.render(&doc.grid))
        }
        Command::Text {
            file,
            preserve_whitespace,
        } => {
            let doc = ctx.load(&file)?;
            let mut renderer = ctx.config.text_renderer();
            renderer.preserve_whitespace |= preserve_whitespace;
            print_out(&renderer.render(&doc.grid))
        }
        Command::Html { file, output } => {
            let doc = ctx.load(&file)?;
            let html = ctx.config.html_renderer().render(&doc.grid);
            match output {
                Some(path) => write_file(&path, html.as_bytes()),
                None => print_out(&html),
            }
        }
        Command::Json { file, compact } => {
            let doc = ctx.load(&file)?;
            print_out(&JsonRenderer::new(!compact).render(&doc.grid))
        }
        Command::Info { file } => {
            let doc = ctx.load(&file)?;
            print_out(&describe(&doc))
        }
        Command::Clean { file, output } => {
            let (path, report) = repair::clean_file(&file, output.as_deref())?;
            if report.was_modified() {
                println!(
                    "Removed {} sequences ({} -> {} bytes)",
                    report.sequences_removed, report.original_size, report.cleaned_size
                );
            } else {
                println!("No problematic sequences found");
            }
            println!("Wrote {}", path.display());
            Ok(())
        }
        Command::Convert {
            file,
            output,
            no_sauce,
            line_ending,
            color,
            replacement,
        } => convert(ctx, &file, &output, !no_sauce, line_ending, color, replacement),
        Command::Config { action } => handle_config_action(action, ctx),
    }
}

fn convert(
    ctx: &Context,
    file: &Path,
    output: &Path,
    include_sauce: bool,
    line_ending: LineEndingArg,
    color: Option<ColorMode>,
    replacement: Option<char>,
) -> Result<(), CliError> {
    let doc = ctx.load(file)?;
    if line_ending == LineEndingArg::Lf {
        log::warn!(
            "{} uses bare LF rows; it displays correctly but does not decode back to the same grid",
            output.display()
        );
    }
    let options = EncodeOptions {
        line_ending: line_ending.into(),
        replacement,
        ..ctx.encode_options(color)
    };
    doc.save(output, &options, include_sauce)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Human-readable summary for `info`.
pub fn describe(doc: &Document) -> String {
    let mut lines = vec![
        format!("Title: {}", doc.title()),
        format!("Size: {}x{}", doc.width, doc.height()),
    ];
    if !doc.author().is_empty() {
        lines.push(format!("Author: {}", doc.author()));
    }
    if !doc.group().is_empty() {
        lines.push(format!("Group: {}", doc.group()));
    }
    match &doc.sauce {
        Some(record) => {
            lines.push(String::new());
            lines.push("SAUCE:".to_string());
            for (key, value) in record.fields() {
                lines.push(format!("  {}: {}", key, value));
            }
        }
        None => lines.push("SAUCE: none".to_string()),
    }
    lines.join("\n")
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, ctx: &Context) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!();
            print!("{}", ctx.config.to_toml()?);
            println!();
            if ctx.config_path.exists() {
                println!("Config file: {} (exists)", ctx.config_path.display());
            } else {
                println!("Config file: {} (not found)", ctx.config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if ctx.config_path.exists() {
                return Err(CliError::ConfigExists(ctx.config_path.clone()));
            }
            Config::default().save(&ctx.config_path)?;
            println!("Created config file: {}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn print_out(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).map_err(|source| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, data).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
