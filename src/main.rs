use clap::Parser;
use nota::cli::{
    handle_delete, handle_edit, handle_greet, handle_list, handle_new, handle_show, Cli, Commands,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NOTA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New {
            title,
            body,
            stdin,
            json,
        } => handle_new(title, body, stdin, json),
        Commands::List { search, json } => handle_list(search, json),
        Commands::Show { id, json } => handle_show(id, json),
        Commands::Edit {
            id,
            title,
            body,
            stdin,
            json,
        } => handle_edit(id, title, body, stdin, json),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Greet => handle_greet(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
