use clap::{Parser, Subcommand};
use status_tint::{MetaTagSink, StatusBarCoordinator, config, output, render, scenario};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("STATUS_TINT_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("STATUS_TINT_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "status-tint")]
#[command(about = "Status-bar tint coordination for scroll-driven pages")]
#[command(long_about = "\
Status-bar tint coordination for scroll-driven pages

A page is a stack of sections, each with its own status-bar color. As
sections scroll into view, the first visible one (in registration order)
tints the bar; with none visible the default color applies. Night mode
forces a black bar with light content.

Site structure:

  site/
  └── config.toml       # default_color, night_mode, [viewport], [[sections]]

Scenario scripts (for `replay`) are TOML files of [[step]] entries:

  [[step]]
  action = \"scroll\"     # register | unregister | show | hide |
  offset = 1200.0       # default-color | night-mode | scroll

Run 'status-tint gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate config.toml and list sections
    Check,
    /// Resolve the status bar for a set of visible sections
    Resolve {
        /// Section ids to mark visible, in any order
        #[arg(long = "visible", value_name = "ID")]
        visible: Vec<String>,
        /// Enable night mode
        #[arg(long)]
        night: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay a scenario script and print the resulting trace
    Replay {
        /// Scenario TOML file
        script: PathBuf,
        /// Also write an HTML report
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Print every coordinator event
        #[arg(long, short)]
        verbose: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.site.join("config.toml").display());
            let config = config::load_config(&cli.site)?;
            output::print_check_output(&config);
            println!("==> Config is valid");
        }
        Command::Resolve {
            visible,
            night,
            json,
        } => {
            let config = config::load_config(&cli.site)?;
            let mut coordinator =
                StatusBarCoordinator::new(MetaTagSink::new(), config.coordinator_config());
            config.register_all(&mut coordinator);
            for id in &visible {
                coordinator.set_visibility(id, true);
            }
            if night {
                coordinator.set_night_mode(true);
            }
            let resolution = coordinator.last_resolution();
            if json {
                println!("{}", serde_json::to_string_pretty(resolution)?);
            } else {
                output::print_resolution(resolution);
                println!();
                println!("{}", coordinator.sink().tags().into_string());
            }
        }
        Command::Replay {
            script,
            html,
            json,
            verbose,
        } => {
            let config = config::load_config(&cli.site)?;
            let scenario = scenario::Scenario::load(&script)?;

            let events = if verbose {
                let (tx, rx) = std::sync::mpsc::channel();
                let printer = std::thread::spawn(move || {
                    for event in rx {
                        for line in output::format_event(&event) {
                            println!("{}", line);
                        }
                    }
                });
                Some((tx, printer))
            } else {
                None
            };
            let (tx, printer) = events.unzip();

            let result = scenario::replay(&config, &scenario, MetaTagSink::new(), tx);
            if let Some(printer) = printer {
                printer.join().map_err(|_| "event printer panicked")?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result.trace)?);
            } else {
                output::print_trace(&result.trace);
            }
            if let Some(path) = html {
                let report = render::render_report(&config, &result.trace);
                std::fs::write(&path, report.into_string())?;
                println!("==> Report written to {}", path.display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
