use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file to use instead of the user config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the generator-level decay tree of every event, one file per event
    Render {
        /// JSON Lines file with one generator record per event
        events_file: PathBuf,

        /// Directory receiving event_<n>.txt files
        #[arg(short = 'o', long = "output-dir", default_value = "decay_chains")]
        output_dir: PathBuf,

        /// Particle table (pdgId,name,type,charge)
        #[arg(long)]
        particle_table: Option<PathBuf>,

        /// Worker threads (default: from config)
        #[arg(long)]
        threads: Option<usize>,

        /// Only these event numbers, comma separated
        #[arg(long, value_delimiter = ',')]
        events: Vec<u64>,

        /// Hide progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the last hadrons of the b-from-Higgs lineage in every event
    LastHadrons {
        /// JSON Lines file with one generator record per event
        events_file: PathBuf,

        /// Output TSV report
        #[arg(short = 'o', long = "output", default_value = "last_hadrons.tsv")]
        output_file: PathBuf,

        /// Particle table (pdgId,name,type,charge)
        #[arg(long)]
        particle_table: Option<PathBuf>,

        /// Worker threads (default: from config)
        #[arg(long)]
        threads: Option<usize>,

        /// Quark ancestor |pdgId| (default: 5)
        #[arg(long)]
        quark: Option<i32>,

        /// Resonance ancestor |pdgId| (default: 25)
        #[arg(long)]
        resonance: Option<i32>,

        /// Only these event numbers, comma separated
        #[arg(long, value_delimiter = ',')]
        events: Vec<u64>,

        /// Hide progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the current settings to the user config.toml
    InitConfig {
        /// Particle table to record as the default
        #[arg(long)]
        particle_table: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_last_hadrons() {
        let args = Args::try_parse_from([
            "genealogy-tools",
            "last-hadrons",
            "events.jsonl",
            "--quark",
            "4",
            "--events",
            "905,906",
        ])
        .unwrap();
        match args.command {
            Commands::LastHadrons {
                output_file,
                quark,
                resonance,
                events,
                ..
            } => {
                assert_eq!(output_file, PathBuf::from("last_hadrons.tsv"));
                assert_eq!(quark, Some(4));
                assert_eq!(resonance, None);
                assert_eq!(events, vec![905, 906]);
            }
            _ => panic!("expected last-hadrons"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let args = Args::try_parse_from([
            "genealogy-tools",
            "render",
            "events.jsonl",
            "--config",
            "my.toml",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(args.command, Commands::Render { quiet: true, .. }));
    }
}
