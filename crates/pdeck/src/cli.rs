use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdeck")]
#[command(author, version, about)]
#[command(long_about = "A dual-window PDF presenter.\n\n\
    One window shows slides to the audience, the other shows your notes. \
    By default odd pages are slides and each even page holds the notes for \
    the page before it. A page list file (e.g. `1, 4, 8`) names the audience \
    pages instead; the pages after each one are its notes.\n\n\
    Examples:\n  \
    pdeck talk.pdf                 Present with odd/even pages\n  \
    pdeck talk.pdf pages.txt       Present with a page list\n  \
    pdeck mapping talk.pdf         Show which pages form each slide")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// PDF file to present
    pub file: Option<PathBuf>,

    /// File listing the audience pages, comma-separated and 1-indexed
    pub pages: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open the audience window fullscreen
    #[arg(long, global = false)]
    pub fullscreen: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print which pages make up each slide
    Mapping {
        /// PDF file
        file: PathBuf,

        /// File listing the audience pages
        pages: Option<PathBuf>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Mapping { file, pages }) => {
                crate::commands::mapping::run(&file, pages.as_deref())
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("pdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    let options = crate::app::Options {
                        start_slide: self.slide,
                        fullscreen: self.fullscreen,
                    };
                    crate::app::run(file, self.pages, options)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    anyhow::bail!("no PDF file given")
                }
            }
        }
    }
}
