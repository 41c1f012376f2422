use anyhow::Context;
use clap::{Parser, Subcommand};
use orbit_core::ipc::{self, Command};
use orbit_core::launch::{self, DEFAULT_OPENER};
use orbit_core::{LinkTarget, Presentation};

#[derive(Parser, Debug)]
#[command(name = "orbitctl", version, about = "Control the orbit launcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the launcher at the cursor
    Show,
    /// Hide the launcher
    Hide,
    /// Show the launcher if hidden, hide it otherwise
    Toggle,
    /// Switch between the flat and the orbital presentation
    Present {
        /// "flat" (or "2d") / "orbital" (or "3d")
        presentation: Presentation,
    },
    /// Open a link the way the launcher would
    Open {
        target: String,

        /// Command the link is handed to
        #[arg(short, long, default_value = DEFAULT_OPENER)]
        opener: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command(Command::Show),
        Commands::Hide => send_command(Command::Hide),
        Commands::Toggle => send_command(Command::Toggle),
        Commands::Present { presentation } => send_command(Command::from(presentation)),
        Commands::Open { target, opener } => {
            launch::open_target(&LinkTarget::new(target), &opener)?;
            Ok(())
        }
    }
}

fn send_command(command: Command) -> anyhow::Result<()> {
    ipc::send(command).with_context(|| {
        format!(
            "Failed to reach orbit at {}. Is the daemon running?",
            ipc::socket_path().display()
        )
    })
}
