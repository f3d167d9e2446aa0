use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "extgate")]
#[command(about = "Extension update server")]
#[command(version)]
pub struct Cli {
    /// Config file (toml, json or yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen address from the config
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Load the catalog from this JSON file instead of the built-in list
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}
