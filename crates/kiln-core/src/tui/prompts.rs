//! Charm-style CLI prompts using cliclack
//!
//! The two flows here drive everything: they collect answers, render the
//! template pack into a staged file set, record the generated modules in
//! the registry, and only then flush to disk.

use crate::config::{ConfigStore, JsonConfigStore};
use crate::product::ProductConfig;
use crate::registry::{Location, ModuleRegistry, ModuleSpec, Packaging, War};
use crate::runtime::check;
use crate::staging::{self, MemStore, StagedFiles};
use crate::templates::{check_compatibility, render, xml, TemplatePack};
use anyhow::{Context, Result};
use colored::Colorize;
use indexmap::IndexMap;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use as the template pack instead of the built-in one
    pub template_dir: Option<PathBuf>,

    /// Maven group id
    pub group_id: Option<String>,

    /// Maven artifact id (also the project directory name by default)
    pub artifact_id: Option<String>,

    /// Project version
    pub version: Option<String>,

    /// Root Java package
    pub package: Option<String>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Print every staged file before flushing
    pub dump_files: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// CLI arguments for the add-module command
#[derive(Debug, Clone, Default)]
pub struct AddModuleArgs {
    /// Local directory to use as the template pack instead of the built-in one
    pub template_dir: Option<PathBuf>,

    /// Artifact id of the new module
    pub artifact_id: Option<String>,

    /// Module version (defaults to the project version)
    pub version: Option<String>,

    /// Module packaging: amp or jar
    pub packaging: Option<String>,

    /// Target webapp: repo or share
    pub war: Option<String>,

    /// Module location: source, local or remote
    pub location: Option<String>,

    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Print every staged file before flushing
    pub dump_files: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

struct ProjectAnswers {
    group_id: String,
    artifact_id: String,
    version: String,
    package: String,
}

impl ProjectAnswers {
    fn repo_module(&self) -> String {
        format!("{}-repo", self.artifact_id)
    }

    fn share_module(&self) -> String {
        format!("{}-share", self.artifact_id)
    }
}

struct ModuleAnswers {
    module_id: String,
    version: String,
    packaging: String,
    war: String,
    location: String,
    path: String,
}

/// Create a new extension project
pub async fn run_create<C: ProductConfig>(
    config: &C,
    args: CreateArgs,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    check_required_runtimes()?;

    let pack = load_pack(&args.template_dir)?;
    warn_on_old_cli(cli_version, &pack, config)?;

    let answers = gather_project_answers(config, &args)?;
    let project_dir = select_directory(&args, &answers.artifact_id)?;

    let spinner = cliclack::spinner();
    spinner.start("Generating project...");

    let mut store = MemStore::new();
    stage_project(&pack, &answers, &mut store)?;

    let mut config_store = JsonConfigStore::new();
    config_store.set("groupId", json!(answers.group_id));
    config_store.set("artifactId", json!(answers.artifact_id));
    config_store.set("version", json!(answers.version));
    config_store.set("package", json!(answers.package));

    let mut registry = ModuleRegistry::load(&config_store);
    for (module_dir, war) in [
        (answers.repo_module(), War::Repo),
        (answers.share_module(), War::Share),
    ] {
        registry.add(ModuleSpec::from_parts(
            Some(answers.group_id.as_str()),
            Some(module_dir.as_str()),
            Some(answers.version.as_str()),
            Some(Packaging::Amp.as_str()),
            Some(war.as_str()),
            Some(Location::Source.as_str()),
            Some(module_dir.as_str()),
        ))?;
    }
    registry.save(&mut config_store);

    if args.dump_files {
        staging::dump_file_names(&store);
    }

    let written = staging::flush(&store, &project_dir).await?;
    config_store.save(&project_dir.join(config.config_file_name()))?;

    spinner.stop(format!(
        "Created {} files in {}",
        written.len() + 1,
        project_dir.display()
    ));

    print_next_steps(config, &project_dir)?;

    Ok(())
}

/// Add a module to an existing project
pub async fn run_add_module<C: ProductConfig>(
    config: &C,
    args: AddModuleArgs,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let project_dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let config_path = project_dir.join(config.config_file_name());
    if !config_path.exists() {
        anyhow::bail!(
            "No {} found in {} - run `{} create` first",
            config.config_file_name(),
            project_dir.display(),
            config.name()
        );
    }
    let mut config_store = JsonConfigStore::load(&config_path)?;

    let group_id = required_config_string(&config_store, "groupId", config)?;
    let project_artifact_id = required_config_string(&config_store, "artifactId", config)?;
    let project_version = required_config_string(&config_store, "version", config)?;

    let mut registry = ModuleRegistry::load(&config_store);
    if !registry.modules().is_empty() {
        let listing: Vec<String> = registry
            .named_modules()
            .iter()
            .map(|named| format!("  - {}", named.name))
            .collect();
        cliclack::log::info(format!("Existing modules:\n{}", listing.join("\n")))?;
    }

    let answers = gather_module_answers(&args, &project_version)?;

    let spec = ModuleSpec::from_parts(
        Some(group_id.as_str()),
        Some(answers.module_id.as_str()),
        Some(answers.version.as_str()),
        Some(answers.packaging.as_str()),
        Some(answers.war.as_str()),
        Some(answers.location.as_str()),
        Some(answers.path.as_str()),
    );
    if registry.find(spec.clone()).is_some() {
        cliclack::outro("Module already registered; nothing to do.")?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Adding module...");

    let mut store = MemStore::new();

    // Only source modules get a skeleton; local/remote artifacts are
    // registered and resolved by the build.
    if answers.location == Location::Source.as_str() {
        let pack = load_pack(&args.template_dir)?;
        warn_on_old_cli(cli_version, &pack, config)?;

        stage_module(
            &pack,
            &group_id,
            &project_artifact_id,
            &project_version,
            &answers,
            &mut store,
        )?;

        let pom_path = project_dir.join("pom.xml");
        let pom = std::fs::read_to_string(&pom_path)
            .with_context(|| format!("Failed to read {}", pom_path.display()))?;
        store.write("pom.xml", xml::insert_module_entry(&pom, &answers.module_id));
    }

    registry.add(spec)?;
    registry.save(&mut config_store);

    if args.dump_files {
        staging::dump_file_names(&store);
    }

    let written = staging::flush(&store, &project_dir).await?;
    config_store.save(&config_path)?;

    spinner.stop(format!(
        "Registered module {} ({} files written)",
        answers.module_id,
        written.len()
    ));

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn check_required_runtimes() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes() {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes and try again.");
        }
    }
}

fn load_pack(template_dir: &Option<PathBuf>) -> Result<TemplatePack> {
    match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using template pack from {}", path.display()))?;
            TemplatePack::from_dir(path)
        }
        None => Ok(TemplatePack::embedded()),
    }
}

fn warn_on_old_cli<C: ProductConfig>(
    cli_version: &str,
    pack: &TemplatePack,
    config: &C,
) -> Result<()> {
    if let Some(warning) = check_compatibility(
        cli_version,
        &pack.manifest.version,
        config.upgrade_command(),
    ) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }
    Ok(())
}

fn gather_project_answers<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
) -> Result<ProjectAnswers> {
    let group_id = answer_or_input(
        args.group_id.as_deref(),
        args.yes,
        "Group id",
        config.default_group_id(),
    )?;
    let artifact_id = answer_or_input(args.artifact_id.as_deref(), args.yes, "Artifact id", "demo")?;
    let version = answer_or_input(
        args.version.as_deref(),
        args.yes,
        "Version",
        "1.0.0-SNAPSHOT",
    )?;

    let default_package = format!("{}.{}", group_id, artifact_id.replace('-', ""));
    let package = answer_or_input(args.package.as_deref(), args.yes, "Java package", &default_package)?;

    cliclack::log::success(format!("Project: {}:{}:{}", group_id, artifact_id, version))?;

    Ok(ProjectAnswers {
        group_id,
        artifact_id,
        version,
        package,
    })
}

fn gather_module_answers(args: &AddModuleArgs, project_version: &str) -> Result<ModuleAnswers> {
    let module_id = answer_or_input(args.artifact_id.as_deref(), args.yes, "Module artifact id", "extension")?;
    let version = answer_or_input(args.version.as_deref(), args.yes, "Module version", project_version)?;

    let packaging = match &args.packaging {
        Some(value) => {
            Packaging::from_str(value)
                .map_err(|_| anyhow::anyhow!("Unknown packaging '{}': expected amp or jar", value))?
                .as_str()
                .to_string()
        }
        None if args.yes => Packaging::Amp.as_str().to_string(),
        None => {
            let choice: &str = cliclack::select("Module packaging")
                .item("amp", "amp", "installable module package")
                .item("jar", "jar", "plain jar library")
                .interact()?;
            choice.to_string()
        }
    };

    let war = match &args.war {
        Some(value) => {
            War::from_str(value)
                .map_err(|_| anyhow::anyhow!("Unknown war '{}': expected repo or share", value))?
                .as_str()
                .to_string()
        }
        None if args.yes => War::Repo.as_str().to_string(),
        None => {
            let choice: &str = cliclack::select("Target webapp")
                .item("repo", "repo", "repository tier")
                .item("share", "share", "share tier")
                .interact()?;
            choice.to_string()
        }
    };

    let location = match &args.location {
        Some(value) => {
            Location::from_str(value)
                .map_err(|_| {
                    anyhow::anyhow!("Unknown location '{}': expected source, local or remote", value)
                })?
                .as_str()
                .to_string()
        }
        None if args.yes => Location::Source.as_str().to_string(),
        None => {
            let choice: &str = cliclack::select("Module location")
                .item("source", "source", "generate sources into this project")
                .item("local", "local", "artifact file already on disk")
                .item("remote", "remote", "artifact resolved from a repository")
                .interact()?;
            choice.to_string()
        }
    };

    // Source modules live in a directory named after the module; for
    // artifact-only modules the path points at the artifact instead.
    let path = if location == Location::Source.as_str() {
        module_id.clone()
    } else {
        let default_path = format!("modules/{}.amp", module_id);
        answer_or_input(None, args.yes, "Artifact path", &default_path)?
    };

    Ok(ModuleAnswers {
        module_id,
        version,
        packaging,
        war,
        location,
        path,
    })
}

/// Use a flag-provided answer, fall back to the default in `--yes` mode, or prompt
fn answer_or_input(
    provided: Option<&str>,
    yes: bool,
    prompt: &str,
    default: &str,
) -> Result<String> {
    if let Some(value) = provided {
        return Ok(value.to_string());
    }
    if yes {
        return Ok(default.to_string());
    }
    let value: String = cliclack::input(prompt)
        .placeholder(default)
        .default_input(default)
        .interact()?;
    Ok(value)
}

fn select_directory(args: &CreateArgs, artifact_id: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir.join(artifact_id)
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(artifact_id)
            .default_input(artifact_id)
            .interact()?;
        let p = PathBuf::from(&input);
        if p.is_absolute() {
            p
        } else {
            current_dir.join(p)
        }
    };

    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn project_context(answers: &ProjectAnswers) -> IndexMap<String, String> {
    IndexMap::from([
        ("groupId".to_string(), answers.group_id.clone()),
        ("artifactId".to_string(), answers.artifact_id.clone()),
        ("version".to_string(), answers.version.clone()),
        ("package".to_string(), answers.package.clone()),
        ("repoModule".to_string(), answers.repo_module()),
        ("shareModule".to_string(), answers.share_module()),
    ])
}

/// Render the pack's project payloads into the staged store and shape the
/// result: the share module reuses the repo context scaffold, the repo
/// service context gets imported, and the staged skeleton directories are
/// relocated to their final module and package paths.
fn stage_project(pack: &TemplatePack, answers: &ProjectAnswers, store: &mut MemStore) -> Result<()> {
    let context = project_context(answers);

    for (path, contents) in pack.project_files() {
        let text = std::str::from_utf8(contents)
            .with_context(|| format!("Template payload '{}' is not valid UTF-8", path))?;
        if staging::exists_in_memory(store, path) {
            cliclack::log::warning(format!("Skipping duplicate payload: {}", path))?;
            continue;
        }
        store.write(path, render(text, &context));
    }

    let repo_module = answers.repo_module();
    let share_module = answers.share_module();

    // The share module reuses the repo module's context scaffold.
    staging::in_memory_copy(
        store,
        "repo/src/main/amp/config/module-context.xml",
        "share/src/main/amp/config",
    );

    // Wire the repo service context into the repo module context.
    let context_path = "repo/src/main/amp/config/module-context.xml";
    if let Some(contents) = store.get(context_path).and_then(|e| e.contents.clone()) {
        let text = String::from_utf8_lossy(&contents).into_owned();
        let resource = format!(
            "classpath:modules/{}/context/service-context.xml",
            repo_module
        );
        store.write(context_path, xml::insert_import(&text, &resource));
    }

    staging::in_memory_move(store, "repo", &repo_module);
    staging::in_memory_move(store, "share", &share_module);

    // Relocate the Java stub from the pack's placeholder package.
    let package_path = answers.package.replace('.', "/");
    staging::in_memory_move(
        store,
        &format!("{}/src/main/java/demo", repo_module),
        &format!("{}/src/main/java/{}", repo_module, package_path),
    );

    Ok(())
}

/// Render the pack's module skeleton and relocate it to the module directory
fn stage_module(
    pack: &TemplatePack,
    group_id: &str,
    project_artifact_id: &str,
    project_version: &str,
    answers: &ModuleAnswers,
    store: &mut MemStore,
) -> Result<()> {
    let context = IndexMap::from([
        ("groupId".to_string(), group_id.to_string()),
        ("artifactId".to_string(), project_artifact_id.to_string()),
        ("version".to_string(), project_version.to_string()),
        ("moduleId".to_string(), answers.module_id.clone()),
        ("moduleVersion".to_string(), answers.version.clone()),
        ("packaging".to_string(), answers.packaging.clone()),
    ]);

    for (path, contents) in pack.module_files() {
        let text = std::str::from_utf8(contents)
            .with_context(|| format!("Template payload '{}' is not valid UTF-8", path))?;
        if staging::exists_in_memory(store, path) {
            cliclack::log::warning(format!("Skipping duplicate payload: {}", path))?;
            continue;
        }
        store.write(path, render(text, &context));
    }

    // Wire the module's service context into its module context.
    let context_path = "module/src/main/amp/config/module-context.xml";
    if let Some(contents) = store.get(context_path).and_then(|e| e.contents.clone()) {
        let text = String::from_utf8_lossy(&contents).into_owned();
        let resource = format!(
            "classpath:modules/{}/context/service-context.xml",
            answers.module_id
        );
        store.write(context_path, xml::insert_import(&text, &resource));
    }

    staging::in_memory_move(store, "module", &answers.module_id);

    Ok(())
}

fn required_config_string<C: ProductConfig>(
    store: &JsonConfigStore,
    key: &str,
    config: &C,
) -> Result<String> {
    store
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .with_context(|| {
            format!(
                "{} is missing '{}' - was this project generated by {}?",
                config.config_file_name(),
                key,
                config.name()
            )
        })
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  {}", "Next steps".cyan());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", format!("{}", i + 1).dimmed(), step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
