use crate::application::dto::{GeneratedRecipe, OutputFormat, RecipeRequest};
use crate::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use crate::application::use_cases::load_package_maps::merge_package_maps;
use crate::config::RosBackendConfig;
use crate::ports::inbound::RecipeGenerator;
use crate::ports::outbound::{PackageMapReader, PackageXmlReader, ProgressReporter};
use crate::ros_generation::domain::{
    About, BuildType, Distro, Extra, NoArchKind, PackageMap, Platform, ProjectModel, Recipe,
    RosPackageManifest, Source,
};
use crate::ros_generation::services::{BuildScriptGenerator, PackageXmlParser, RequirementsBuilder};
use crate::shared::error::RosBackendError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

const DEBUG_RECIPE_FILENAME: &str = "recipe.yaml";

/// Sources a CMake based package build reads
const CMAKE_INPUT_GLOBS: &[&str] = &[
    "**/CMakeLists.txt",
    "**/*.cmake",
    "**/*.{c,cc,cpp,cxx,h,hh,hpp,hxx}",
    "**/*.{msg,srv,action}",
    "**/*.{py,launch,xml,yaml}",
];

/// Sources an ament_python package build reads
const PYTHON_INPUT_GLOBS: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "resource/**",
    "**/*.py",
    "**/*.{launch,xml,yaml}",
];

/// GenerateRecipeUseCase - Core use case for recipe generation
///
/// Orchestrates reading package.xml, layering package maps and assembling the
/// recipe, with generic dependency injection for all infrastructure.
///
/// # Type Parameters
/// * `XR` - PackageXmlReader implementation
/// * `MR` - PackageMapReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateRecipeUseCase<XR, MR, PR> {
    package_xml_reader: XR,
    package_map_reader: MR,
    progress_reporter: PR,
}

impl<XR, MR, PR> GenerateRecipeUseCase<XR, MR, PR>
where
    XR: PackageXmlReader,
    MR: PackageMapReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateRecipeUseCase with injected dependencies
    pub fn new(package_xml_reader: XR, package_map_reader: MR, progress_reporter: PR) -> Self {
        Self {
            package_xml_reader,
            package_map_reader,
            progress_reporter,
        }
    }

    /// Executes the recipe generation use case
    ///
    /// # Arguments
    /// * `request` - Project model, backend configuration, manifest location
    ///   and host platform
    ///
    /// # Returns
    /// The recipe together with the input globs the host should watch
    pub fn execute(&self, request: RecipeRequest) -> Result<GeneratedRecipe> {
        let manifest_root = request.manifest_root();

        // Step 1-2: Read and parse package.xml
        let manifest = self.read_manifest(&request.manifest_path)?;

        // Step 3: Resolve the distro
        let distro = Distro::new(&request.config.distro)?;

        // Step 4: Layer the package maps
        let mapping_files = Self::resolve_mapping_paths(&request.config, &manifest_root);
        let package_map = self.load_package_map(&mapping_files)?;

        // Step 5: Recipe skeleton and metadata
        let build_type = Self::effective_build_type(&manifest, &distro);
        let mut recipe = Recipe::new(distro.package_name(&manifest.name), manifest.version.clone());
        recipe.source.push(Source::Path {
            path: Self::source_path(&manifest_root),
        });
        recipe.about = Self::build_about(&manifest, &request.model);
        recipe.extra = Extra {
            recipe_maintainers: manifest.maintainers.iter().map(ToString::to_string).collect(),
        };

        // Step 6: Requirements
        self.progress_reporter.report(&format!(
            "🔗 Resolving dependencies for {} ({})",
            distro, request.host_platform
        ));
        recipe.requirements = RequirementsBuilder::build(
            &manifest,
            &build_type,
            &distro,
            request.host_platform,
            &package_map,
            &request.config.env,
        );

        // Step 7: Build section
        if request.config.is_noarch() {
            recipe.build.noarch = Some(NoArchKind::Generic);
        }
        recipe.build.script = BuildScriptGenerator::generate(
            &build_type,
            &distro,
            request.host_platform,
            &request.config.env,
        );

        // Step 8: Input globs
        let generated = GeneratedRecipe {
            recipe,
            metadata_input_globs: Self::metadata_input_globs(&mapping_files, &manifest_root),
            build_input_globs: Self::build_input_globs(&build_type, &request.config),
        };

        // Step 9: Debug copy of the recipe
        if let Some(debug_dir) = &request.config.debug_dir {
            self.write_debug_recipe(debug_dir, &generated.recipe)?;
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Generated recipe for {}",
            generated.package_name().unwrap_or(&manifest.name)
        ));

        Ok(generated)
    }

    fn read_manifest(&self, manifest_path: &Path) -> Result<RosPackageManifest> {
        self.progress_reporter.report(&format!(
            "📖 Loading package.xml from: {}",
            manifest_path.display()
        ));

        let content = self.package_xml_reader.read_package_xml(manifest_path)?;
        let manifest = PackageXmlParser::parse(&content).map_err(|e| {
            RosBackendError::ManifestParseError {
                path: manifest_path.to_path_buf(),
                details: format!("{:#}", e),
            }
        })?;

        tracing::debug!(
            name = %manifest.name,
            version = %manifest.version,
            format = manifest.format,
            "package.xml parsed"
        );
        Ok(manifest)
    }

    /// Built-in table first, then every extra mapping in order
    fn load_package_map(&self, mapping_files: &[PathBuf]) -> Result<PackageMap> {
        let builtin = PackageMap::builtin()?;
        if mapping_files.is_empty() {
            return Ok(builtin);
        }

        self.progress_reporter.report(&format!(
            "🗺️  Loading {} extra package map(s)...",
            mapping_files.len()
        ));

        merge_package_maps(
            &self.package_map_reader,
            builtin,
            mapping_files,
            |current, total, path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.progress_reporter
                    .report_progress(current, total, Some(name.as_str()));
            },
        )
    }

    fn resolve_mapping_paths(config: &RosBackendConfig, manifest_root: &Path) -> Vec<PathBuf> {
        config
            .extra_package_mappings
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    manifest_root.join(path)
                }
            })
            .collect()
    }

    /// The declared build type, or the distro's default one
    fn effective_build_type(manifest: &RosPackageManifest, distro: &Distro) -> BuildType {
        match &manifest.build_type {
            Some(build_type) => build_type.clone(),
            None if distro.is_ros1() => BuildType::Catkin,
            None => BuildType::AmentCmake,
        }
    }

    fn source_path(manifest_root: &Path) -> PathBuf {
        std::fs::canonicalize(manifest_root).unwrap_or_else(|_| manifest_root.to_path_buf())
    }

    fn build_about(manifest: &RosPackageManifest, model: &ProjectModel) -> About {
        let description = manifest
            .description
            .as_deref()
            .map(collapse_whitespace)
            .filter(|d| !d.is_empty())
            .or_else(|| model.description.clone());

        About {
            homepage: manifest
                .url("website")
                .map(String::from)
                .or_else(|| model.homepage.clone()),
            repository: manifest
                .url("repository")
                .map(String::from)
                .or_else(|| model.repository.clone()),
            documentation: model.documentation.clone(),
            license: manifest
                .license_expression()
                .or_else(|| model.license.clone()),
            summary: description.as_deref().map(first_sentence),
            description,
        }
    }

    fn metadata_input_globs(mapping_files: &[PathBuf], manifest_root: &Path) -> Vec<String> {
        let mut globs = vec!["package.xml".to_string()];
        globs.extend(mapping_files.iter().map(|path| {
            path.strip_prefix(manifest_root)
                .unwrap_or(path)
                .display()
                .to_string()
        }));
        globs
    }

    fn build_input_globs(build_type: &BuildType, config: &RosBackendConfig) -> Vec<String> {
        let defaults = if build_type.is_python() {
            PYTHON_INPUT_GLOBS
        } else {
            CMAKE_INPUT_GLOBS
        };
        let mut globs: Vec<String> = defaults.iter().map(|g| g.to_string()).collect();
        for glob in &config.extra_input_globs {
            if !globs.contains(glob) {
                globs.push(glob.clone());
            }
        }
        globs
    }

    fn write_debug_recipe(&self, debug_dir: &Path, recipe: &Recipe) -> Result<()> {
        std::fs::create_dir_all(debug_dir).map_err(|e| RosBackendError::FileWriteError {
            path: debug_dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let content = FormatterFactory::create(OutputFormat::Yaml).format(recipe)?;
        PresenterFactory::create(PresenterType::File(debug_dir.join(DEBUG_RECIPE_FILENAME)))
            .present(&content)?;

        self.progress_reporter.report(&format!(
            "🐞 Debug recipe written to {}",
            debug_dir.join(DEBUG_RECIPE_FILENAME).display()
        ));
        Ok(())
    }
}

impl<XR, MR, PR> RecipeGenerator for GenerateRecipeUseCase<XR, MR, PR>
where
    XR: PackageXmlReader,
    MR: PackageMapReader,
    PR: ProgressReporter,
{
    fn generate_recipe(
        &self,
        model: &ProjectModel,
        config: &RosBackendConfig,
        manifest_path: &Path,
        host_platform: Platform,
    ) -> Result<GeneratedRecipe> {
        self.execute(RecipeRequest::new(
            model.clone(),
            config.clone(),
            manifest_path.to_path_buf(),
            host_platform,
        ))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text up to and including the first full stop followed by a space
fn first_sentence(text: &str) -> String {
    match text.find(". ") {
        Some(end) => text[..=end].to_string(),
        None => text.to_string(),
    }
}
