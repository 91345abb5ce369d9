use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rgen_core::config::{self, CONFIG_FILE_NAME, RgenConfig};
use rgen_core::ir::{Service, Session};
use rgen_core::naming::snake;
use rgen_core::parse;
use rgen_core::{CodeGenerator, GeneratedFile};
use rgen_rails_server::RailsServerGenerator;
use rgen_rails_server::classifier::{RouteEntry, group_paths, paramify, sort_paths};
use rgen_rails_server::type_mapper::RubyNames;

#[derive(Parser)]
#[command(
    name = "rgen",
    about = "Rails routes and controllers generator for service descriptions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate routes, controllers and helpers from a service description
    Generate {
        /// Path to the service description (JSON or YAML)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory the Rails files are written under
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave an artifact out of the output (repeatable)
        #[arg(long = "exclude", value_name = "ARTIFACT")]
        exclude: Vec<String>,
    },

    /// Inspect a service description and its route table
    Inspect {
        /// Path to the service description
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new rgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            exclude,
        } => cmd_generate(input, output, exclude),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<RgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_service(path: &Path) -> Result<Service> {
    parse::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path: PathBuf = base.join(file.path.iter().collect::<PathBuf>());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    exclude: Vec<String>,
) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    cfg.rails.exclude.extend(exclude);

    let service = load_service(&input)?;
    eprintln!("Generating {} → {}", service.title, output_dir.display());

    let files = RailsServerGenerator
        .generate(&service, &cfg.rails)
        .context("generation failed")?;

    for path in write_files(&output_dir, &files)? {
        eprintln!("  wrote {}", path.display());
    }
    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let service = load_service(&input)?;

    let summary = build_inspect_summary(&service, &cfg);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Service overview plus the route table in the order it is generated.
fn build_inspect_summary(service: &Service, cfg: &RgenConfig) -> serde_json::Value {
    let session = Session::new(service);
    let names = RubyNames::new(service, &cfg.rails);
    let entries: Vec<RouteEntry<'_>> = service
        .all_http_paths()
        .map(|(interface, http_path)| RouteEntry {
            http_path,
            interface,
        })
        .collect();

    let routes: serde_json::Map<String, serde_json::Value> = group_paths(entries)
        .into_iter()
        .map(|(group, entries)| {
            let lines: Vec<serde_json::Value> = sort_paths(entries)
                .iter()
                .flat_map(|entry| {
                    let controller = names.controller_name(entry.interface);
                    let path = paramify(&entry.http_path.path);
                    let session = &session;
                    entry.http_path.methods.iter().map(move |m| {
                        serde_json::json!({
                            "verb": m.verb.as_str(),
                            "path": path,
                            "action": format!("{controller}#{}", snake(&m.name)),
                            "bound": session.method(&m.name).is_some(),
                        })
                    })
                })
                .collect();
            (group, serde_json::Value::Array(lines))
        })
        .collect();

    let interfaces: Vec<serde_json::Value> = service
        .interfaces
        .iter()
        .map(|int| {
            serde_json::json!({
                "name": int.name,
                "controller": names.controller_class(int),
                "methods": int.methods.iter().map(|m| &m.name).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "title": service.title,
        "major_version": service.major_version,
        "interfaces": interfaces,
        "types": service.types.iter().map(|t| &t.name).collect::<Vec<_>>(),
        "enums": service.enums.iter().map(|e| &e.name).collect::<Vec<_>>(),
        "routes": routes,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
