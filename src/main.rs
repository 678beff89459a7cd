mod cli;

use anyhow::Context;
use cli::Args;
use owo_colors::OwoColorize;
use pixi_build_ros::adapters::outbound::console::StderrProgressReporter;
use pixi_build_ros::adapters::outbound::filesystem::FileSystemReader;
use pixi_build_ros::application::dto::RecipeRequest;
use pixi_build_ros::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use pixi_build_ros::application::use_cases::GenerateRecipeUseCase;
use pixi_build_ros::config::{self, RosBackendConfig};
use pixi_build_ros::ros_generation::domain::{Platform, ProjectModel};
use pixi_build_ros::shared::error::{ExitCode, RosBackendError};
use pixi_build_ros::shared::security::read_file_checked;
use pixi_build_ros::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.log_level());

    if let Err(e) = run(args) {
        eprintln!("\n{}\n", "❌ An error occurred:".red());
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// RUST_LOG wins over the -v flags
fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> Result<()> {
    let manifest_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_manifest_path(&manifest_path)?;

    let manifest_dir = if manifest_path.is_dir() {
        manifest_path.clone()
    } else {
        manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };

    let backend_config = resolve_config(&args, &manifest_dir)?;
    let model = load_project_model(args.project_model.as_deref())?;
    let host_platform = args.host_platform.unwrap_or_else(Platform::current);

    tracing::debug!(
        distro = %backend_config.distro,
        platform = %host_platform,
        mappings = backend_config.extra_package_mappings.len(),
        "configuration resolved"
    );

    // Create adapters (Dependency Injection)
    let use_case = GenerateRecipeUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        StderrProgressReporter::new(),
    );

    let request = RecipeRequest::new(model, backend_config, manifest_path, host_platform);
    let generated = use_case.execute(request)?;

    eprintln!("{}", FormatterFactory::progress_message(args.format));
    let formatted_output = FormatterFactory::create(args.format).format(&generated.recipe)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output));
    presenter.present(&formatted_output)?;

    Ok(())
}

/// Loads the config file and applies the command-line overrides
fn resolve_config(args: &Args, manifest_dir: &Path) -> Result<RosBackendConfig> {
    let from_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(manifest_dir)?,
    };

    let mut backend_config = match (from_file, &args.distro) {
        (Some(file_config), _) => file_config,
        (None, Some(_)) => RosBackendConfig::default(),
        (None, None) => {
            return Err(RosBackendError::InvalidConfig {
                message: "No ROS distribution configured".to_string(),
                hint: "Pass --distro, or add 'distro' to pixi-build-ros.config.yml or to [package.build.configuration] in pixi.toml".to_string(),
            }
            .into())
        }
    };

    if let Some(distro) = &args.distro {
        backend_config.distro = distro.clone();
    }
    if args.noarch {
        backend_config.noarch = Some(true);
    }

    // Command-line paths are relative to the working directory, not the package.
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    backend_config.extra_package_mappings.extend(
        args.extra_package_mappings
            .iter()
            .map(|path| if path.is_absolute() { path.clone() } else { cwd.join(path) }),
    );

    backend_config.validate()?;
    Ok(backend_config)
}

fn load_project_model(path: Option<&Path>) -> Result<ProjectModel> {
    let Some(path) = path else {
        return Ok(ProjectModel::new());
    };
    let content = read_file_checked(path, "project model")?;
    ProjectModel::from_json_str(&content)
        .with_context(|| format!("Failed to parse project model: {}", path.display()))
}

fn validate_manifest_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RosBackendError::InvalidManifestPath {
            path: path.to_path_buf(),
            reason: "Path does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for manifest paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| RosBackendError::InvalidManifestPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(RosBackendError::InvalidManifestPath {
            path: path.to_path_buf(),
            reason: "Security: Manifest path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() && path.file_name().is_none_or(|name| name != "package.xml") {
        return Err(RosBackendError::InvalidManifestPath {
            path: path.to_path_buf(),
            reason: "Not a directory or a package.xml file".to_string(),
        }
        .into());
    }

    Ok(())
}
