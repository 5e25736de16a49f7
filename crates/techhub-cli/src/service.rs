use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use techhub_catalog::SkillCatalog;
use techhub_router::Router;
use techhub_types::SkillRecord;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::display;

/// Role with its skills, for JSON listings
#[derive(Debug, Serialize)]
struct RoleListing<'a> {
    name: &'a str,
    title: &'a str,
    skills: Vec<&'a SkillRecord>,
}

/// Runs one CLI command against the configured catalog
pub struct CliService {
    config: Config,
    /// `--catalog` flag, wins over the configured path
    catalog_override: Option<PathBuf>,
}

impl CliService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog_override: None,
        }
    }

    pub fn with_catalog(mut self, path: Option<PathBuf>) -> Self {
        self.catalog_override = path;
        self
    }

    /// Initialize logging and dispatch the command
    pub fn run(self, cli: Cli) -> Result<()> {
        techhub_logging::init_logging(&self.config.logging.level, self.config.logging.format)?;
        debug!("Running command {:?}", cli.command);

        match cli.command {
            Commands::Route {
                text,
                format,
                max_matches,
                no_dependencies,
            } => {
                let catalog = self.load_catalog()?;
                let router = Router::new(&catalog)
                    .with_max_matches(max_matches.unwrap_or(self.config.routing.max_matches))
                    .with_dependencies(self.config.routing.dependencies && !no_dependencies);

                let plan = router.route(&Commands::route_text(&text));
                match self.format(format) {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                    OutputFormat::Text => print!("{}", display::render_plan(&plan, &catalog)),
                }
            }
            Commands::Skills { role, format } => {
                let catalog = self.load_catalog()?;
                if let Some(name) = &role {
                    catalog.role(name)?;
                }

                match self.format(format) {
                    OutputFormat::Json => {
                        let listing: Vec<RoleListing<'_>> = catalog
                            .roles()
                            .iter()
                            .filter(|r| role.as_deref().map_or(true, |name| r.name == name))
                            .map(|r| RoleListing {
                                name: &r.name,
                                title: r.display_name(),
                                skills: catalog.all().filter(|s| r.owns(&s.id)).collect(),
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&listing)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", display::render_roles(&catalog, role.as_deref()));
                    }
                }
            }
            Commands::Show { skill_id, format } => {
                let catalog = self.load_catalog()?;
                let skill = catalog.get(&skill_id)?;
                match self.format(format) {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(skill)?),
                    OutputFormat::Text => print!("{}", display::render_skill(skill, &catalog)),
                }
            }
            Commands::Validate { path } => {
                let catalog = match &path {
                    Some(path) => load_catalog_file(path)?,
                    None => self.load_catalog()?,
                };
                println!(
                    "Catalog OK: {} roles, {} skills, {} dependencies",
                    catalog.roles().len(),
                    catalog.len(),
                    catalog.dependencies().len()
                );
            }
            Commands::Init { force } => init_home(force)?,
        }

        Ok(())
    }

    fn format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.unwrap_or(self.config.output.format)
    }

    /// Catalog from `--catalog`, then `catalog.path`, then the bundled one
    fn load_catalog(&self) -> Result<SkillCatalog> {
        match self
            .catalog_override
            .clone()
            .or_else(|| self.config.catalog.path())
        {
            Some(path) => load_catalog_file(&path),
            None => {
                info!("Using bundled skill catalog");
                SkillCatalog::bundled().context("Bundled skill catalog is invalid")
            }
        }
    }
}

fn load_catalog_file(path: &Path) -> Result<SkillCatalog> {
    SkillCatalog::from_path(path)
        .with_context(|| format!("Failed to load skill catalog {}", path.display()))
}

/// Create ~/.techhub with the default config and a copy of the bundled catalog
fn init_home(force: bool) -> Result<()> {
    let (config_path, written) = Config::ensure_global_config(force)?;
    if written {
        println!("Wrote default config: {}", config_path.display());
    } else {
        println!("Config already exists: {}", config_path.display());
    }

    let catalog_path = Config::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
        .join("catalog.yaml");

    if catalog_path.exists() && !force {
        println!("Catalog already exists: {}", catalog_path.display());
    } else {
        fs::write(&catalog_path, SkillCatalog::bundled_source())
            .with_context(|| format!("Failed to write {}", catalog_path.display()))?;
        println!("Wrote default catalog: {}", catalog_path.display());
        println!("Set catalog.path in the config to use it.");
    }

    Ok(())
}
