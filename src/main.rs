use clap::Parser;
use passkeep::cli::{user_message, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    passkeep::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => passkeep::cli::commands::init::execute(&cli),
        Commands::Set {
            ref domain,
            ref value,
        } => passkeep::cli::commands::set::execute(&cli, domain, value.as_deref()),
        Commands::Get { ref domain } => passkeep::cli::commands::get::execute(&cli, domain),
        Commands::Remove { ref domain, force } => {
            passkeep::cli::commands::remove::execute(&cli, domain, force)
        }
        Commands::Dump { raw } => passkeep::cli::commands::dump::execute(&cli, raw),
        Commands::Verify => passkeep::cli::commands::verify::execute(&cli),
    };

    if let Err(e) = result {
        passkeep::cli::output::error(&user_message(&e));
        std::process::exit(1);
    }
}
