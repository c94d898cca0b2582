use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Buffer capacity for file reads and writes, in bytes
    #[arg(long, global = true, default_value_t = 64 * 1024)]
    pub buffer_capacity: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the header and entries of an index file
    InspectIndex {
        /// Path of the index (.shx) file
        path: PathBuf,

        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rebuild an index file from the record headers of a shape file
    RebuildIndex {
        /// Path of the shape (.shp) file
        shape: PathBuf,

        /// Path of the index (.shx) file to create or overwrite
        index: PathBuf,

        /// Skip syncing the index file to disk when done
        #[arg(long)]
        no_sync: bool,
    },
}
