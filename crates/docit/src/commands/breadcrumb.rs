//! `docit breadcrumb` command implementation.

use clap::Args;
use docit_menus::ROOT_ID;

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the breadcrumb command.
#[derive(Args)]
pub(crate) struct BreadcrumbArgs {
    /// Link target to search for (matched against item hrefs).
    href: String,

    #[command(flatten)]
    menu: MenuArgs,
}

impl BreadcrumbArgs {
    /// Execute the breadcrumb command.
    ///
    /// Prints nothing but a warning when no item links to the href.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the definition fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, menu) = self.menu.build()?;

        let labels: Vec<&str> = menu
            .breadcrumb_to_href(&self.href)
            .into_iter()
            .filter(|node| node.id() != ROOT_ID)
            .map(|node| node.value())
            .collect();

        if labels.is_empty() {
            output.warning(&format!("No menu item links to {}", self.href));
        } else {
            output.trail(&labels);
        }
        Ok(())
    }
}
