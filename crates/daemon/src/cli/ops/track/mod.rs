use clap::Subcommand;

pub mod save;
pub mod show;

pub use save::Save;
pub use show::Show;

#[derive(Subcommand, Debug, Clone)]
pub enum Track {
    /// Save a track record under its display name
    Save(Save),
    /// Fetch a track record by display name
    Show(Show),
}
