// SPDX-License-Identifier: MIT
//
// tint: the command-line front end of the token engine.
//
// This binary wires the crates together:
//
//   tint-color  → hex parsing, OKLCH ramps, WCAG contrast
//   tint-tokens → token model, presets, validation, exporters, editor
//   tint-store  → saved systems on disk, legacy migration, share links
//
// Every command resolves a token system first, then hands it to one of
// the pure engines:
//
//   --preset id ─┐
//   --file path ─┼─▶ TokenSystem ─┬─▶ validate / review
//   current ─────┘                ├─▶ export <format>
//                                 ├─▶ share (lz-string ?t=…)
//                                 └─▶ systems save
//
// Saved systems live in `<data dir>/tint/tint-systems.json`.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use tint_color::hex;
use tint_store::{
    FileStore, PersistedSystems, ShareConfig, SharePayload, StoreConfig, share,
};
use tint_tokens::presets::all_presets;
use tint_tokens::scale::generate_color_scale;
use tint_tokens::{ExportFormat, Severity, TokenEditor, TokenSystem, review_theme, validate_all_contrasts};

const LOG_ENV: &str = "TINT_LOG";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Derive, validate, export and share design-token systems.
#[derive(Parser, Debug)]
#[command(name = "tint", version)]
struct Cli {
    /// Where saved systems are kept [default: <data dir>/tint]
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in presets.
    Presets,
    /// Print the 11-step ramp generated from a base color.
    Scale {
        /// Base color, `#rgb` or `#rrggbb`.
        hex: String,
    },
    /// Check contrast (and, with --review, structure) of a system.
    Validate {
        #[command(flatten)]
        source: Source,
        /// Run the full review and print a score.
        #[arg(long)]
        review: bool,
        /// Exit with status 1 when any error is reported.
        #[arg(long)]
        strict: bool,
    },
    /// Generate one export format.
    Export {
        /// css, tailwind, theme, json (w3c) or figma.
        format: ExportFormat,
        #[command(flatten)]
        source: Source,
        /// Output file, or a directory to write the default file name into.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Print a share link for a system.
    Share {
        #[command(flatten)]
        source: Source,
        /// Page the link points at; only the parameter is printed without it.
        #[arg(long)]
        base: Option<String>,
    },
    /// Decode a share link (or a bare parameter).
    Open {
        link: String,
        /// Write the decoded token system here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Also save it as a new current system.
        #[arg(long)]
        save: bool,
    },
    /// Manage saved systems.
    #[command(subcommand)]
    Systems(SystemsCommand),
}

#[derive(Subcommand, Debug)]
enum SystemsCommand {
    /// List saved systems, most recently updated first.
    List,
    /// Save a system as a new entry and make it current.
    Save {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        name: Option<String>,
    },
    Switch { id: String },
    Rename { id: String, name: String },
    Delete { id: String },
    Duplicate { id: String },
    /// Print or write a saved system as JSON.
    Export {
        id: String,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Import a previously exported system.
    Import { path: PathBuf },
}

/// Where the token system comes from. Defaults to the current saved
/// system, then to the built-in default.
#[derive(Args, Debug, Default)]
struct Source {
    /// Start from a built-in preset.
    #[arg(long, conflicts_with = "file")]
    preset: Option<String>,
    /// Read a token system (or an exported saved system) from JSON.
    #[arg(long)]
    file: Option<PathBuf>,
}

// ─── Entry ──────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tint: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    debug!(data_dir = %data_dir.display(), "starting");

    match cli.command {
        Command::Presets => {
            for p in all_presets() {
                println!("{:<14} {:<14} {}", p.id, p.name, p.description);
            }
        }
        Command::Scale { hex: base } => print_scale(&base),
        Command::Validate {
            source,
            review,
            strict,
        } => {
            let (tokens, _) = resolve(&source, &data_dir)?;
            let errors = print_validation(&tokens, review);
            if strict && errors > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Export {
            format,
            source,
            out,
        } => {
            let (tokens, _) = resolve(&source, &data_dir)?;
            let text = format.generate(&tokens);
            match out {
                Some(path) => {
                    let path = if path.is_dir() { path.join(format.file_name()) } else { path };
                    write_file(&path, &text)?;
                    eprintln!("wrote {}", path.display());
                }
                None => print!("{text}"),
            }
        }
        Command::Share { source, base } => {
            let (tokens, preset_id) = resolve(&source, &data_dir)?;
            let payload = SharePayload::new(tokens, preset_id);
            let config = ShareConfig::default();
            let link = match base {
                Some(base) => share::share_url(&base, &payload, &config),
                None => share::encode_with(&payload, &config),
            };
            let Some(link) = link else {
                bail!(
                    "this system is too large to share as a link; use `tint export json` and send the file instead"
                );
            };
            println!("{link}");
        }
        Command::Open { link, out, save } => {
            let param = share_param(&link);
            let payload = share::decode(&param).context("not a valid tint share link")?;
            let json = serde_json::to_string_pretty(&payload.tokens)?;
            match out {
                Some(path) => write_file(&path, &json)?,
                None => println!("{json}"),
            }
            if save {
                let mut systems = open_systems(&data_dir)?;
                let id = systems.edit(Instant::now(), |s| {
                    s.save_as_new(payload.tokens, None).map(|saved| saved.id.clone())
                })?;
                systems.flush()?;
                eprintln!("saved as {id}");
            }
        }
        Command::Systems(cmd) => run_systems(cmd, &data_dir)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn run_systems(cmd: SystemsCommand, data_dir: &Path) -> Result<()> {
    let mut systems = open_systems(data_dir)?;
    let now = Instant::now();

    match cmd {
        SystemsCommand::List => {
            let store = systems.store();
            if store.is_empty() {
                eprintln!("no saved systems");
            }
            for saved in store.list() {
                let marker = if store.current_id() == Some(saved.id.as_str()) { '*' } else { ' ' };
                println!(
                    "{marker} {}  {:<24} {}",
                    saved.id,
                    saved.name,
                    saved.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
            return Ok(());
        }
        SystemsCommand::Save { source, name } => {
            let (tokens, _) = resolve_without_store(&source)?;
            let id = systems.edit(now, |s| {
                s.save_as_new(tokens, name.as_deref()).map(|saved| saved.id.clone())
            })?;
            println!("{id}");
        }
        SystemsCommand::Switch { id } => {
            let found = systems.edit(now, |s| s.switch_to(&id).is_some());
            if !found {
                bail!("no saved system with id \"{id}\"");
            }
        }
        SystemsCommand::Rename { id, name } => systems.edit(now, |s| s.rename(&id, &name))?,
        SystemsCommand::Delete { id } => {
            let removed = systems.edit(now, |s| s.delete_system(&id))?;
            eprintln!("deleted \"{}\"", removed.name);
        }
        SystemsCommand::Duplicate { id } => {
            let copy = systems.edit(now, |s| s.duplicate(&id).map(|saved| saved.id.clone()))?;
            println!("{copy}");
        }
        SystemsCommand::Export { id, out } => {
            let json = systems
                .store()
                .export_system(&id)
                .with_context(|| format!("no saved system with id \"{id}\""))?;
            match out {
                Some(path) => write_file(&path, &json)?,
                None => println!("{json}"),
            }
            return Ok(());
        }
        SystemsCommand::Import { path } => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let id = systems.edit(now, |s| s.import_system(&raw).map(|saved| saved.id.clone()))?;
            println!("{id}");
        }
    }
    systems.flush().context("saving systems")
}

// ─── Sources ────────────────────────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".tint"), |d| d.join("tint"))
}

fn open_systems(data_dir: &Path) -> Result<PersistedSystems<FileStore>> {
    PersistedSystems::open(FileStore::new(data_dir), StoreConfig::default())
        .with_context(|| format!("opening saved systems in {}", data_dir.display()))
}

/// Token system plus the preset it came from, if any.
fn resolve(source: &Source, data_dir: &Path) -> Result<(TokenSystem, Option<String>)> {
    if source.preset.is_some() || source.file.is_some() {
        return resolve_without_store(source);
    }
    let systems = open_systems(data_dir)?;
    if let Some(current) = systems.store().current() {
        debug!(id = %current.id, "using current saved system");
        return Ok((current.tokens.clone(), None));
    }
    Ok((TokenSystem::default(), Some("default".to_string())))
}

fn resolve_without_store(source: &Source) -> Result<(TokenSystem, Option<String>)> {
    if let Some(id) = &source.preset {
        let editor = TokenEditor::from_preset(id)
            .with_context(|| format!("unknown preset \"{id}\" (see `tint presets`)"))?;
        let preset_id = editor.preset_id().map(str::to_string);
        return Ok((editor.into_tokens(), preset_id));
    }
    if let Some(path) = &source.file {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let tokens = parse_tokens(&raw).with_context(|| format!("parsing {}", path.display()))?;
        return Ok((tokens, None));
    }
    Ok((TokenSystem::default(), Some("default".to_string())))
}

/// Accepts a bare token system or anything wrapping one in `tokens`
/// (saved-system exports, legacy payloads).
fn parse_tokens(raw: &str) -> Result<TokenSystem> {
    let mut value: Value = serde_json::from_str(raw)?;
    if let Some(inner) = value.get_mut("tokens").filter(|t| t.is_object()) {
        value = inner.take();
    }
    Ok(serde_json::from_value(value)?)
}

/// The share parameter from a full link, or the input itself.
fn share_param(link: &str) -> String {
    let link = link.trim();
    share::param_from_url(link, &ShareConfig::default().param).unwrap_or_else(|| link.to_string())
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn print_scale(base: &str) {
    if !hex::is_valid(base) {
        eprintln!("warning: \"{base}\" is not a hex color; showing the fallback ramp");
    }
    for (stop, value) in generate_color_scale(base).iter() {
        println!(
            "{stop:>4}  {value}  {:>5.2}:1 on white  {:>5.2}:1 on black",
            hex::contrast_ratio(value, "#ffffff"),
            hex::contrast_ratio(value, "#000000"),
        );
    }
}

/// Prints issues and returns the number of errors.
fn print_validation(tokens: &TokenSystem, review: bool) -> usize {
    let (issues, score) = if review {
        let r = review_theme(tokens);
        let score = r.score;
        (r.issues, Some(score))
    } else {
        (validate_all_contrasts(tokens), None)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for issue in &issues {
        let _ = writeln!(out, "{issue}");
    }
    if issues.is_empty() {
        let _ = writeln!(out, "no issues");
    }
    if let Some(score) = score {
        let _ = writeln!(out, "score: {score}/100");
    }
    issues.iter().filter(|i| i.severity == Severity::Error).count()
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
