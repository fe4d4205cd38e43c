//! CLI command implementations.

pub(crate) mod breadcrumb;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use docit_config::{CliSettings, Config};
use docit_menus::{Hooks, MENU_DONE, Menu, MenuDefinition, PrefixLinks};

use crate::error::CliError;

pub(crate) use breadcrumb::BreadcrumbArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by commands that build a menu.
#[derive(Args, Debug, Default)]
pub(crate) struct MenuArgs {
    /// Path to configuration file (default: auto-discover docit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Menu definition file (overrides config).
    #[arg(short, long)]
    definition: Option<PathBuf>,

    /// View used to render the menu (overrides config).
    #[arg(long)]
    view: Option<String>,

    /// Base URL for document links (overrides config).
    #[arg(long, env = "DOCIT_BASE_URL")]
    base_url: Option<String>,
}

impl MenuArgs {
    /// Load configuration and build the menu from its definition.
    ///
    /// The definition is applied from a `menu:done` hook, so it lands
    /// under the root node.
    pub(crate) fn build(self) -> Result<(Config, Menu), CliError> {
        let cli_settings = CliSettings {
            view: self.view,
            definition: self.definition,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        tracing::info!(
            definition = %config.menu_resolved.definition.display(),
            "Loading menu definition"
        );
        let definition = MenuDefinition::load(&config.menu_resolved.definition)?;
        definition.validate()?;
        let links = PrefixLinks::new(config.links.base_url.clone());

        let mut hooks = Hooks::new();
        hooks.on(MENU_DONE, move |menu: &mut Menu| {
            definition.apply(menu, &links)?;
            Ok(())
        });
        let menu = Menu::with_view(config.menu_resolved.view.clone(), &hooks)?;

        Ok((config, menu))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    const DEFINITION: &str = "
- name: Guide
  document: guide
  children:
    - name: Install
      document: guide/install
";

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docit.toml"),
            "[menu]\nview = \"theme::nav\"\n\n[links]\nbase_url = \"/docs/master\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("menu.yml"), DEFINITION).unwrap();
        dir
    }

    #[test]
    fn test_build_applies_definition_and_config() {
        let dir = project();
        let args = MenuArgs {
            config: Some(dir.path().join("docit.toml")),
            ..Default::default()
        };

        let (config, menu) = args.build().unwrap();

        assert_eq!(config.menu_resolved.view, "theme::nav");
        assert_eq!(menu.view(), "theme::nav");
        assert_eq!(
            menu.get("guide/install").unwrap().attribute("href"),
            Some("/docs/master/guide/install")
        );
    }

    #[test]
    fn test_build_cli_overrides() {
        let dir = project();
        let args = MenuArgs {
            config: Some(dir.path().join("docit.toml")),
            view: Some("docit::partials/menu".to_owned()),
            base_url: Some("/docs/1.0".to_owned()),
            ..Default::default()
        };

        let (_, menu) = args.build().unwrap();

        assert_eq!(menu.view(), "docit::partials/menu");
        assert_eq!(
            menu.get("guide").unwrap().attribute("href"),
            Some("/docs/1.0/guide")
        );
    }

    #[test]
    fn test_build_rejects_reserved_root_id() {
        let dir = project();
        fs::write(dir.path().join("menu.yml"), "- name: Home\n  id: root\n").unwrap();
        let args = MenuArgs {
            config: Some(dir.path().join("docit.toml")),
            ..Default::default()
        };

        let err = args.build().unwrap_err();

        assert!(matches!(
            err,
            CliError::Definition(docit_menus::DefinitionError::ReservedId { .. })
        ));
    }

    #[test]
    fn test_build_missing_definition() {
        let dir = project();
        let args = MenuArgs {
            config: Some(dir.path().join("docit.toml")),
            definition: Some(dir.path().join("missing.yml")),
            ..Default::default()
        };

        let err = args.build().unwrap_err();

        assert!(matches!(err, CliError::Definition(_)));
    }
}
