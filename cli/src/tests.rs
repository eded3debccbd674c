use super::*;
use clap::CommandFactory;
use progman_core::ConfigWriteError;
use progman_core::types::InvalidItem;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Action {
    let mut argv = vec!["progman"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().action
}

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let main = catalog.add_group("Main");
    catalog
        .add_item(main, ProgramItem::new("Terminal", "xterm"))
        .unwrap();
    catalog
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_group_add_then_item_add() {
    let mut catalog = sample_catalog();

    assert!(apply(&mut catalog, parse(&["group", "add", "Games"])).unwrap());
    assert!(
        apply(
            &mut catalog,
            parse(&["item", "add", "Games", "Chess", "chess", "-d", "/opt/games"])
        )
        .unwrap()
    );

    let games = catalog.find_group("Games").unwrap();
    let chess = catalog.group(games).unwrap().item_at(0).unwrap();
    assert_eq!(
        catalog.item(chess).unwrap(),
        &ProgramItem::new("Chess", "chess").with_working_dir("/opt/games")
    );
}

#[test]
fn test_item_add_rejects_blank_command() {
    let mut catalog = sample_catalog();

    let err = apply(&mut catalog, parse(&["item", "add", "0", "Chess", " "])).unwrap_err();

    assert!(matches!(
        err,
        CliError::Catalog(CatalogError::InvalidItem(InvalidItem::Command(_)))
    ));
    assert_eq!(catalog.groups().next().unwrap().len(), 1);
}

#[test]
fn test_item_edit_and_delete_by_index() {
    let mut catalog = sample_catalog();

    apply(
        &mut catalog,
        parse(&["item", "edit", "0", "0", "Console", "konsole"]),
    )
    .unwrap();
    let (_, item) = catalog.groups().next().unwrap().items().next().unwrap();
    assert_eq!(item.command, "konsole");

    apply(&mut catalog, parse(&["item", "delete", "Main", "Console"])).unwrap();
    assert!(catalog.groups().next().unwrap().is_empty());
}

#[test]
fn test_group_rename_and_delete() {
    let mut catalog = sample_catalog();

    apply(&mut catalog, parse(&["group", "rename", "0", "Accessories"])).unwrap();
    assert_eq!(catalog.find_group("Main"), None);

    apply(&mut catalog, parse(&["group", "delete", "Accessories"])).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_unknown_target_is_reported() {
    let mut catalog = sample_catalog();

    let err = apply(&mut catalog, parse(&["group", "delete", "7"])).unwrap_err();
    assert!(matches!(err, CliError::GroupNotFound(Target::Index(7))));

    let err = apply(&mut catalog, parse(&["launch", "Main", "Nope"])).unwrap_err();
    match err {
        CliError::ItemNotFound { group, item } => {
            assert_eq!(group, "Main");
            assert_eq!(item, Target::Title("Nope".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsaveable_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();
    let store = ConfigStore::new(blocker.join("progman.json"));

    let err = run(&store, parse(&["group", "add", "Games"])).unwrap_err();

    assert!(matches!(
        err,
        CliError::Save(ConfigWriteError::CreateDir { .. })
    ));
}

#[cfg(unix)]
#[test]
fn test_launch_failure_is_reported() {
    let mut catalog = Catalog::new();
    let main = catalog.add_group("Main");
    catalog
        .add_item(
            main,
            ProgramItem::new("Broken", "true").with_working_dir("/nonexistent/progman/dir"),
        )
        .unwrap();

    let err = apply(&mut catalog, parse(&["launch", "0", "0"])).unwrap_err();

    match err {
        CliError::Launch(failure) => assert_eq!(failure.title, "Broken"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_theme_is_coerced_and_saved() {
    let mut catalog = sample_catalog();

    assert!(apply(&mut catalog, parse(&["theme", "CLASSIC"])).unwrap());
    assert_eq!(catalog.theme(), Theme::Classic);

    assert!(!apply(&mut catalog, parse(&["theme"])).unwrap());
}

#[test]
fn test_list_does_not_request_save() {
    let mut catalog = sample_catalog();
    assert!(!apply(&mut catalog, parse(&["list"])).unwrap());
}

#[test]
fn test_run_persists_mutations() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new(temp.path().join("progman.json"));

    run(&store, parse(&["group", "add", "Games"])).unwrap();
    run(&store, parse(&["item", "add", "Games", "Chess", "chess"])).unwrap();

    let catalog = store.load();
    let titles: Vec<_> = catalog.groups().map(|g| g.title().to_string()).collect();
    assert_eq!(titles, vec!["Main", "Games"]);
}

#[test]
fn test_target_parsing() {
    assert_eq!("3".parse::<Target>().unwrap(), Target::Index(3));
    assert_eq!(
        "Games".parse::<Target>().unwrap(),
        Target::Title("Games".to_string())
    );
    assert_eq!(
        "=2048".parse::<Target>().unwrap(),
        Target::Title("2048".to_string())
    );
    assert_eq!("=".parse::<Target>().unwrap(), Target::Title(String::new()));
}

#[test]
fn test_numeric_title_is_reachable_with_prefix() {
    let mut catalog = sample_catalog();
    apply(&mut catalog, parse(&["group", "add", "2048"])).unwrap();

    let err = apply(&mut catalog, parse(&["group", "rename", "2048", "Puzzles"])).unwrap_err();
    assert!(matches!(err, CliError::GroupNotFound(Target::Index(2048))));

    apply(&mut catalog, parse(&["group", "rename", "=2048", "Puzzles"])).unwrap();
    assert!(catalog.find_group("2048").is_none());
    assert!(catalog.find_group("Puzzles").is_some());
}

#[test]
fn test_fallback_glyph() {
    assert_eq!(icon::fallback_glyph("  chess"), 'C');
    assert_eq!(icon::fallback_glyph("   "), '?');
    assert_eq!(icon::fallback_glyph(""), '?');
}

#[test]
fn test_missing_icon_file_is_ignored() {
    let temp = TempDir::new().unwrap();
    let icon_path = temp.path().join("chess.png");
    let item = ProgramItem::new("Chess", "chess").with_icon_path(icon_path.to_string_lossy());

    assert_eq!(icon::custom_icon(&item), None);

    std::fs::write(&icon_path, b"png").unwrap();
    assert_eq!(icon::custom_icon(&item), Some(icon_path.as_path()));
}
