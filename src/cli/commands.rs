// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password and show its statistics
    Generate {
        /// Password length (8-30)
        #[arg(long, short)]
        length: Option<usize>,

        /// Never use I, l, 1, |, O or 0
        #[arg(long)]
        avoid_ambiguous: bool,

        /// Allow ambiguous characters even when PWDGEN_AVOID_AMBIGUOUS is set
        #[arg(long, conflicts_with = "avoid_ambiguous")]
        allow_ambiguous: bool,

        /// Do not add the password to the history
        #[arg(long)]
        no_save: bool,
    },

    /// List recent passwords, newest first
    History,

    /// Copy a recent password
    Copy {
        /// Position in the history (0 is the newest)
        #[arg(required = true)]
        index: usize,
    },

    /// Remove a password from the history
    Remove {
        #[arg(required = true)]
        password: String,
    },

    /// Remove every password from the history
    Clear,

    /// Interactive menu
    Menu,
}
