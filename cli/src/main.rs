//! Command-line host for progman.
//!
//! Loads the catalog once, applies one command, and saves on the way out when
//! the command changed anything.
use clap::{Args, Parser, Subcommand};
use log::debug;
use progman_core::types::{ProgramItem, Theme};
use progman_core::{Catalog, CatalogError, ConfigStore, LaunchResult, Launcher, LoadSource};
use std::path::PathBuf;
use std::process::ExitCode;

mod error;
mod icon;
mod target;

use error::CliError;
use target::Target;

#[derive(Parser, Debug)]
#[command(name = "progman", version)]
/// Organize programs into groups and launch them
///
/// Groups and items are addressed by their zero-based position in `list`
/// output or by exact title. Prefix a title with `=` when it is all digits,
/// e.g. `=2048`.
struct Cli {
    /// Config file to use instead of ~/.progman.json
    #[arg(long, short, env = "PROGMAN_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Clone, Debug)]
enum Action {
    /// Show every group and its items
    List,
    /// Add, rename or delete groups
    #[command(subcommand)]
    Group(GroupAction),
    /// Add, edit or delete items
    #[command(subcommand)]
    Item(ItemAction),
    /// Start an item's command as a detached process
    Launch {
        group: Target,
        item: Target,
    },
    /// Show or change the colour scheme preference
    Theme {
        #[arg(value_parser = ["system", "classic"], ignore_case = true)]
        theme: Option<String>,
    },
    /// Print the config file path
    Path,
}

#[derive(Subcommand, Clone, Debug)]
enum GroupAction {
    Add { title: String },
    Rename { group: Target, title: String },
    Delete { group: Target },
}

#[derive(Subcommand, Clone, Debug)]
enum ItemAction {
    Add {
        group: Target,
        #[command(flatten)]
        fields: ItemFields,
    },
    Edit {
        group: Target,
        item: Target,
        #[command(flatten)]
        fields: ItemFields,
    },
    Delete {
        group: Target,
        item: Target,
    },
}

#[derive(Args, Clone, Debug)]
struct ItemFields {
    title: String,
    command: String,
    #[arg(long, short = 'd', default_value = "")]
    working_dir: String,
    #[arg(long, short, default_value = "")]
    icon: String,
}

impl From<ItemFields> for ProgramItem {
    fn from(fields: ItemFields) -> Self {
        ProgramItem::new(fields.title, fields.command)
            .with_working_dir(fields.working_dir)
            .with_icon_path(fields.icon)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = cli
        .config
        .map(ConfigStore::new)
        .or_else(ConfigStore::at_default_path)
        .ok_or(CliError::NoHomeDir)
        .and_then(|store| run(&store, cli.action));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(store: &ConfigStore, action: Action) -> Result<(), CliError> {
    if let Action::Path = action {
        println!("{}", store.path().display());
        return Ok(());
    }

    debug!("using config {}", store.path().display());
    let (mut catalog, source) = store.load_detailed();
    match &source {
        LoadSource::Fallback(e) => eprintln!(
            "warning: {} is unreadable ({e}); showing defaults, saving will replace it",
            store.path().display()
        ),
        LoadSource::CreatedDefault {
            write_error: Some(e),
        } => eprintln!("warning: cannot create {}: {e}", store.path().display()),
        _ => {}
    }

    let changed = apply(&mut catalog, action)?;
    if changed {
        store.save(&catalog)?;
    }
    Ok(())
}

/// Runs one action against the catalog. Returns whether it needs saving.
fn apply(catalog: &mut Catalog, action: Action) -> Result<bool, CliError> {
    match action {
        Action::List => {
            print_catalog(catalog);
            Ok(false)
        }
        Action::Group(action) => apply_group(catalog, action).map(|()| true),
        Action::Item(action) => apply_item(catalog, action).map(|()| true),
        Action::Launch { group, item } => {
            let handle = target::item(catalog, &group, &item)?;
            let program = catalog
                .item(handle)
                .ok_or(CatalogError::ItemNotFound(handle))?;
            match Launcher::new().launch(program) {
                LaunchResult::Started => Ok(false),
                LaunchResult::Skipped => {
                    eprintln!("'{}' has no command, nothing launched", program.title);
                    Ok(false)
                }
                LaunchResult::Failed(failure) => Err(failure.into()),
            }
        }
        Action::Theme { theme: None } => {
            println!("{}", catalog.theme());
            Ok(false)
        }
        Action::Theme { theme: Some(theme) } => {
            catalog.set_theme(Theme::coerce(&theme));
            Ok(true)
        }
        Action::Path => Ok(false),
    }
}

fn apply_group(catalog: &mut Catalog, action: GroupAction) -> Result<(), CliError> {
    match action {
        GroupAction::Add { title } => {
            catalog.add_group(title);
        }
        GroupAction::Rename { group, title } => {
            let handle = target::group(catalog, &group)?;
            catalog.rename_group(handle, title)?;
        }
        GroupAction::Delete { group } => {
            let handle = target::group(catalog, &group)?;
            catalog.delete_group(handle)?;
        }
    }
    Ok(())
}

fn apply_item(catalog: &mut Catalog, action: ItemAction) -> Result<(), CliError> {
    match action {
        ItemAction::Add { group, fields } => {
            let handle = target::group(catalog, &group)?;
            catalog.add_item(handle, fields.into())?;
        }
        ItemAction::Edit {
            group,
            item,
            fields,
        } => {
            let handle = target::item(catalog, &group, &item)?;
            catalog.edit_item(handle, fields.into())?;
        }
        ItemAction::Delete { group, item } => {
            let handle = target::item(catalog, &group, &item)?;
            catalog.delete_item(handle)?;
        }
    }
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    for (g, group) in catalog.groups().enumerate() {
        println!("[{g}] {}", group.title());
        for (i, (_, item)) in group.items().enumerate() {
            let glyph = match icon::custom_icon(item) {
                Some(_) => '*',
                None => icon::fallback_glyph(&item.title),
            };
            println!("    [{i}] {glyph} {}  ({})", item.title, item.command);
        }
    }
}

#[cfg(test)]
mod tests;
