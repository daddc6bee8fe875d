use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use wl_config::{LauncherSettings, DEFAULT_SETTINGS_FILE};
use wl_launch::{launch, EditorLauncher, LaunchActions};
use wl_workspace::WorkspaceCatalog;
use wslaunch::{listing, open_catalog, picker, select};

#[derive(Parser)]
#[command(
    name = "wslaunch",
    version = wslaunch::VERSION,
    about = "Find and reopen VS Code workspaces"
)]
struct Cli {
    /// Settings file (JSON, or TOML when the name ends in .toml)
    #[arg(long, short, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List workspaces
    List {
        /// Only show workspaces whose name contains this text
        #[arg(long, short)]
        filter: Option<String>,
        /// Include workspaces whose folder is missing
        #[arg(long)]
        all: bool,
        /// Print JSON instead of display names
        #[arg(long)]
        json: bool,
    },
    /// Open one workspace, chosen by display name or unique filter match
    Open {
        query: String,
        #[command(flatten)]
        actions: ActionArgs,
    },
    /// Choose a workspace interactively (default)
    Pick {
        #[command(flatten)]
        actions: ActionArgs,
    },
    /// Delete storage folders whose workspace no longer exists
    Clean {
        /// Run even when clean_up_orphans is off in settings
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved settings
    Config,
    /// Print version
    Version,
}

#[derive(clap::Args, Default)]
struct ActionArgs {
    /// Do not open the workspace in the editor
    #[arg(long)]
    no_editor: bool,
    /// Open the repository URL in the browser
    #[arg(long)]
    repo: bool,
}

impl From<&ActionArgs> for LaunchActions {
    fn from(args: &ActionArgs) -> Self {
        LaunchActions {
            editor: !args.no_editor,
            repository: args.repo,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wslaunch=info,wl_workspace=info,wl_config=info,wl_launch=info".into()
            }),
        )
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Pick {
        actions: ActionArgs::default(),
    });

    match command {
        Commands::List { filter, all, json } => {
            let settings = LauncherSettings::load(&cli.settings)?;
            let catalog = open_catalog(&settings.catalog)?;
            let workspaces = listing(&catalog, filter.as_deref(), all);
            if json {
                println!("{}", serde_json::to_string_pretty(&workspaces)?);
            } else {
                for workspace in workspaces {
                    println!("{}", workspace.display_name());
                }
            }
            Ok(())
        }

        Commands::Open { query, actions } => {
            let settings = LauncherSettings::load(&cli.settings)?;
            let launcher = EditorLauncher::new(&settings.exe_path);
            let catalog = open_catalog(&settings.catalog)?;
            let workspace = select(&catalog, &query)?;
            launch(&launcher, workspace, LaunchActions::from(&actions))?;
            Ok(())
        }

        Commands::Pick { actions } => {
            let settings = LauncherSettings::load(&cli.settings)?;
            let launcher = EditorLauncher::new(&settings.exe_path);
            let mut catalog = open_catalog(&settings.catalog)?;
            let actions = LaunchActions::from(&actions);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            picker::run(&mut catalog, stdin.lock(), &mut stdout, |workspace| {
                println!("Opening {}", workspace.display_name());
                Ok(launch(&launcher, workspace, actions)?)
            })?;
            Ok(())
        }

        Commands::Clean { force } => {
            let settings = LauncherSettings::load(&cli.settings)?;
            if !settings.catalog.clean_up_orphans && !force {
                anyhow::bail!(
                    "Orphan cleanup is disabled. Set \"clean_up_orphans\": true in {} or pass --force.",
                    cli.settings.display()
                );
            }
            let mut catalog_settings = settings.catalog.clone();
            catalog_settings.clean_up_orphans = true;
            let mut catalog = WorkspaceCatalog::new(catalog_settings);
            catalog.scan();
            let report = catalog.clean_up_orphans()?;
            if report.is_empty() {
                println!("No orphaned workspaces.");
            } else {
                for folder in &report.removed {
                    println!("Removed {}", folder.display());
                }
                println!("{} orphaned workspaces removed.", report.removed.len());
            }
            Ok(())
        }

        Commands::Config => {
            let settings = LauncherSettings::load(&cli.settings)?;
            println!("Settings file: {}", cli.settings.display());
            let json = serde_json::to_string_pretty(&settings)
                .context("failed to serialize settings")?;
            println!("{}", json);
            Ok(())
        }

        Commands::Version => {
            println!("wslaunch {}", wslaunch::VERSION);
            Ok(())
        }
    }
}
