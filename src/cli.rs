use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::form::PackageMatch;

/// Protoform - request forms for protorpc service methods
#[derive(Parser, Debug, Clone)]
#[command(name = "protoform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "PROTOFORM_CONFIG", default_value = "protoform.toml", global = true)]
    pub config: PathBuf,

    /// Base path of the service; the file set is fetched from <service-path>/form/file_set
    #[arg(long, env = "PROTOFORM_SERVICE_PATH", global = true)]
    pub service_path: Option<String>,

    /// Fully qualified name of the request type that needs no form
    #[arg(long, env = "PROTOFORM_VOID_MESSAGE_TYPE", global = true)]
    pub void_message_type: Option<String>,

    /// How a package claims a fully qualified name
    #[arg(long, env = "PROTOFORM_PACKAGE_MATCH", value_enum, global = true)]
    pub package_match: Option<PackageMatchArg>,

    /// Server host address
    #[arg(long, env = "PROTOFORM_HOST", global = true)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "PROTOFORM_PORT", global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the request form for one method
    Render {
        /// Fully qualified service name, e.g. "music.MusicService"
        service: String,
        /// Method name within the service
        method: String,
        /// Read the file set from a local JSON file instead of fetching it
        #[arg(long)]
        file_set: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// List every service method in the file set
    List {
        /// Read the file set from a local JSON file instead of fetching it
        #[arg(long)]
        file_set: Option<PathBuf>,
    },
    /// Serve form pages over HTTP
    Serve,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageMatchArg {
    Prefix,
    Boundary,
}

impl From<PackageMatchArg> for PackageMatch {
    fn from(arg: PackageMatchArg) -> Self {
        match arg {
            PackageMatchArg::Prefix => PackageMatch::Prefix,
            PackageMatchArg::Boundary => PackageMatch::Boundary,
        }
    }
}
