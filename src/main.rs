use anyhow::Context;
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use toolswitch::Config;
use toolswitch::input::{Tool, ToolPicker, ToolSlot};
use toolswitch::script::{self, Script};

#[derive(Parser, Debug)]
#[command(name = "toolswitch")]
#[command(
    version,
    about = "Replay keyboard and pointer input through a drawing tool picker"
)]
struct Cli {
    /// Event script to replay ("-" reads from stdin)
    #[arg(
        value_name = "SCRIPT",
        required_unless_present_any = ["print_bindings", "init_config"]
    )]
    script: Option<PathBuf>,

    /// Config file to use instead of ~/.config/toolswitch/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the debounce window in milliseconds
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Tool persisted by the host before the replay starts
    #[arg(long, short = 't', value_name = "TOOL", default_value = "none")]
    tool: Tool,

    /// Print the effective key bindings and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_bindings: bool,

    /// Write a default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "print_bindings")]
    init_config: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn read_script(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => path,
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(ms) = cli.debounce_ms {
        log::info!("Debounce window overridden to {}ms", ms);
        config.set_debounce_ms(ms);
    }

    let picker = ToolPicker::from_config(&config).context("Invalid keybindings")?;
    log::debug!("Debounce window: {:?}", picker.debounce_window());

    if cli.print_bindings {
        for (binding, action) in picker.bindings() {
            println!("{:<6} {}", binding.key(), action);
        }
        return Ok(());
    }

    let Some(script_path) = cli.script else {
        return Err(anyhow::anyhow!("No script given"));
    };
    let script = Script::parse(&read_script(&script_path)?)?;
    log::debug!("Replaying {} steps", script.steps.len());

    let host = ToolSlot {
        tool: cli.tool,
        shortcuts_disabled: !config.keyboard.shortcuts_enabled,
        updates: 0,
    };

    let stdout = io::stdout();
    let summary = script::replay(&script, picker, host, &mut stdout.lock())?;
    log::info!(
        "Replay finished: displayed={} persisted={}",
        summary.displayed,
        summary.persisted
    );

    Ok(())
}
