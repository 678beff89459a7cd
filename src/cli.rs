use clap::Parser;
use pixi_build_ros::application::dto::OutputFormat;
use pixi_build_ros::ros_generation::domain::Platform;
use std::path::PathBuf;

/// Generate conda recipes for ROS packages
#[derive(Parser, Debug)]
#[command(name = "pixi-build-ros")]
#[command(version)]
#[command(about = "Generate conda recipes from ROS package.xml manifests", long_about = None)]
pub struct Args {
    /// Path to the ROS package directory or its package.xml (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// ROS distribution to build for (overrides the config file)
    #[arg(short, long)]
    pub distro: Option<String>,

    /// Path to a config file (YAML, or a pixi.toml with [package.build.configuration])
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Additional package map file, layered over the built-in table
    /// Can be specified multiple times; later files win
    #[arg(short = 'm', long = "extra-package-mapping", value_name = "FILE")]
    pub extra_package_mappings: Vec<PathBuf>,

    /// Build an architecture independent (noarch: generic) package
    #[arg(long)]
    pub noarch: bool,

    /// Target platform as a conda subdir, e.g. linux-64 (defaults to the current platform)
    #[arg(long, value_name = "SUBDIR")]
    pub host_platform: Option<Platform>,

    /// Output format: yaml or json
    #[arg(short, long, default_value = "yaml")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file describing the host project model (fallback metadata)
    #[arg(long, value_name = "FILE")]
    pub project_model: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default tracing filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
