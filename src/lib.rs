pub mod cli;
pub mod commands;
pub mod config;
pub mod decay_chain;
pub mod error;
pub mod events;
pub mod genealogy;
pub mod kinematics;
pub mod mass_table;
pub mod particle_db;
pub mod types;
pub mod utils;

// Re-export main API
pub use decay_chain::{render_event, RenderContext, RenderSummary};
pub use error::{GenealogyError, Result};
pub use genealogy::{
    ancestors_of, children_of, find_last_hadrons, find_terminal_hadrons, Lineage, VisitationSet,
};
pub use particle_db::{ParticleDb, ParticleInfo};
pub use types::GeneratorRecord;
