use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nota")]
#[command(version, about = "A small local-first note pad")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note and make it the active one
    New {
        /// Note title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Note body
        #[arg(long, short = 'b', conflicts_with = "stdin")]
        body: Option<String>,

        /// Read the body from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, newest first
    List {
        /// Only show notes whose title or body contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the title and/or body of a note
    Edit {
        /// Note ID
        id: String,

        /// New title (keeps the current one if omitted)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New body (keeps the current one if omitted)
        #[arg(long, short = 'b', conflicts_with = "stdin")]
        body: Option<String>,

        /// Read the new body from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note after confirmation
    Delete {
        /// Note ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print a greeting for the time of day
    Greet,
}
