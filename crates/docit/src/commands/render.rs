//! `docit render` command implementation.

use clap::{Args, ValueEnum};
use docit_views::TemplateViews;

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Output format for rendered menus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Render through the configured view.
    #[default]
    Html,
    /// Print the item tree passed to the view.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    menu: MenuArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the definition or the view fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, menu) = self.menu.build()?;

        let rendered = match self.format {
            Format::Html => {
                let views = TemplateViews::with_dirs(config.views_resolved.dirs.clone());
                menu.render(&views)?
            }
            Format::Json => serde_json::to_string_pretty(&menu.items())?,
        };

        output.result(&rendered);
        Ok(())
    }
}
