use clap::Parser;
use genealogy_tools::cli::{Args, Commands};
use genealogy_tools::commands;
use genealogy_tools::config::Config;
use genealogy_tools::genealogy::Lineage;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match args.config {
        Some(path) => match Config::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: failed to read config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::load(),
    };

    let result = match args.command {
        Commands::Render {
            events_file,
            output_dir,
            particle_table,
            threads,
            events,
            quiet,
        } => commands::render::run(
            &config,
            events_file,
            output_dir,
            particle_table,
            threads,
            events,
            quiet,
        ),
        Commands::LastHadrons {
            events_file,
            output_file,
            particle_table,
            threads,
            quark,
            resonance,
            events,
            quiet,
        } => {
            let lineage = (quark.is_some() || resonance.is_some()).then(|| Lineage {
                quark: quark.unwrap_or(config.lineage.quark),
                resonance: resonance.unwrap_or(config.lineage.resonance),
            });
            commands::last_hadrons::run(
                &config,
                events_file,
                output_file,
                particle_table,
                threads,
                lineage,
                events,
                quiet,
            )
        }
        Commands::InitConfig { particle_table } => {
            let mut config = config;
            if particle_table.is_some() {
                config.particle_table = particle_table;
            }
            config.save().map(|path| println!("Wrote {}", path.display()))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
