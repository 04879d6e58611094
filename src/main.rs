use clap::{Parser, Subcommand};
use emugames_list::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emugames-list")]
#[command(about = "Static site builder for the EmuGames retro games catalog")]
#[command(long_about = "\
Static site builder for the EmuGames retro games catalog

Reads the INI catalog and writes crawlable static pages, mirrored assets,
and a sitemap next to the catalog's single-page app.

Source structure:

  ./
  ├── Systems.ini                    # [System] sections, optional Dir=
  ├── index.html                     # Page template
  ├── emugames.toml                  # Build config (optional)
  ├── assets/                        # Static files → copied to output
  └── Systems/
      └── nes/
          ├── Info/Info.txt          # System description (enables system page)
          ├── Emulators.ini          # [entry] Name= Dir= Year= Rating= Comment=
          ├── Games.ini
          ├── Demos.ini
          └── Games/
              └── mario/
                  ├── Info.txt       # Entry description
                  └── Screenshots/   # .jpg .jpeg .png

Set RUST_LOG=info (or debug) for detailed logging.
Run 'emugames-list gen-config' to print a documented emugames.toml.")]
#[command(version)]
struct Cli {
    /// Catalog source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory (deleted and recreated on build)
    #[arg(long, default_value = "pages", global = true)]
    output: PathBuf,

    /// Build config file [default: <source>/emugames.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the output directory (default)
    Build,
    /// Load the catalog and report what would be generated, writing nothing
    Check,
    /// Print a stock emugames.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let build_config = resolve_build_config(cli.source, cli.output, cli.config)?;
            println!("==> Building {}", build_config.source_dir.display());
            let today = chrono::Local::now().date_naive();
            let report = pipeline::build(&build_config, today)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", build_config.output_dir.display());
        }
        Command::Check => {
            let build_config = resolve_build_config(cli.source, cli.output, cli.config)?;
            println!("==> Checking {}", build_config.source_dir.display());
            let report = pipeline::check(&build_config)?;
            output::print_build_output(&report);
            println!("==> Catalog is readable");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `emugames.toml` (explicit path, or the one in the source directory).
fn resolve_build_config(
    source: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<config::BuildConfig, config::ConfigError> {
    let config_path = config_path.unwrap_or_else(|| source.join(config::CONFIG_FILE_NAME));
    let site = config::load_config(&config_path)?;
    Ok(config::BuildConfig::new(source, output, site))
}
