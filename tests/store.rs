use rusqlite::Connection;
use shlist::db::{
    foreign_keys_enabled, list_name, show_list_by_name, table_exists, SEED_DATA,
};
use shlist::{
    add_item, add_list, delete_item, delete_list, initialize, list_id_from_name, list_lists,
    open_in_memory, open_store, reset, show_item, show_list, NewItem, ShlistError, SCHEMA,
};
use tempfile::TempDir;

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0))
        .expect("count query should succeed")
}

#[test]
fn test_add_list_then_lookup_by_name() {
    let mut conn = open_in_memory().expect("store should open");
    let id = add_list(&mut conn, "birthday").expect("add_list should succeed");

    assert_eq!(list_id_from_name(&conn, "birthday").unwrap(), id);
    assert_eq!(list_name(&conn, id).unwrap(), "birthday");
}

#[test]
fn test_lookup_unknown_name_is_not_found() {
    let conn = open_in_memory().unwrap();
    assert!(matches!(
        list_id_from_name(&conn, "nope"),
        Err(ShlistError::NotFound(_))
    ));
    assert!(matches!(
        show_list_by_name(&conn, "nope"),
        Err(ShlistError::NotFound(_))
    ));
}

#[test]
fn test_empty_and_duplicate_names_are_accepted() {
    let mut conn = open_in_memory().unwrap();
    let first = add_list(&mut conn, "").unwrap();
    let a = add_list(&mut conn, "dup").unwrap();
    let b = add_list(&mut conn, "dup").unwrap();

    assert_ne!(a, b);
    assert_ne!(first, a);
    assert_eq!(list_lists(&conn).unwrap().len(), 3);

    let found = list_id_from_name(&conn, "dup").unwrap();
    assert!(found == a || found == b);
}

#[test]
fn test_show_list_contains_exactly_its_items() {
    let mut conn = open_in_memory().unwrap();
    let gifts = add_list(&mut conn, "gifts").unwrap();
    let other = add_list(&mut conn, "other").unwrap();

    let mut expected = Vec::new();
    for name in ["kettle", "lamp", "socks"] {
        expected.push(add_item(&mut conn, gifts, &NewItem::named(name)).unwrap());
    }
    add_item(&mut conn, other, &NewItem::named("not mine")).unwrap();

    let contents = show_list(&conn, gifts).unwrap();
    assert_eq!(contents.name, "gifts");

    let mut ids: Vec<i64> = contents.items.iter().map(|item| item.id).collect();
    ids.sort_unstable();
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[test]
fn test_show_list_unknown_id_is_not_found() {
    let conn = open_in_memory().unwrap();
    assert!(matches!(show_list(&conn, 99), Err(ShlistError::NotFound(_))));
}

#[test]
fn test_show_item_returns_every_field() {
    let mut conn = open_in_memory().unwrap();
    let list_id = add_list(&mut conn, "tools").unwrap();
    let item = NewItem {
        name: "drill".into(),
        description: Some("cordless".into()),
        url: Some("https://tools.example/drill".into()),
        price: Some(12999),
    };
    let id = add_item(&mut conn, list_id, &item).unwrap();

    let detail = show_item(&conn, id).unwrap();
    assert_eq!(detail.list.as_deref(), Some("tools"));
    assert_eq!(detail.id, id);
    assert_eq!(detail.list_id, Some(list_id));
    assert_eq!(detail.name, "drill");
    assert_eq!(detail.description.as_deref(), Some("cordless"));
    assert_eq!(detail.url.as_deref(), Some("https://tools.example/drill"));
    assert_eq!(detail.price, Some(12999));
}

#[test]
fn test_show_item_unknown_id_is_not_found() {
    let conn = open_in_memory().unwrap();
    assert!(matches!(show_item(&conn, 7), Err(ShlistError::NotFound(_))));
}

#[test]
fn test_show_item_with_null_list_id_has_no_list() {
    let conn = open_in_memory().unwrap();
    conn.execute("INSERT INTO item (list_id, name) VALUES (NULL, 'stray')", [])
        .unwrap();
    let id = conn.last_insert_rowid();

    let detail = show_item(&conn, id).unwrap();
    assert_eq!(detail.list, None);
    assert_eq!(detail.list_id, None);
    assert_eq!(detail.name, "stray");
}

#[test]
fn test_add_item_with_unknown_list_is_integrity_error() {
    let mut conn = open_in_memory().unwrap();
    let err = add_item(&mut conn, 404, &NewItem::named("ghost")).unwrap_err();

    assert!(matches!(err, ShlistError::Integrity(_)));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM item"), 0);
}

#[test]
fn test_delete_item_removes_only_that_item() {
    let mut conn = open_in_memory().unwrap();
    let list_id = add_list(&mut conn, "l").unwrap();
    let keep = add_item(&mut conn, list_id, &NewItem::named("keep")).unwrap();
    let drop = add_item(&mut conn, list_id, &NewItem::named("drop")).unwrap();

    assert_eq!(delete_item(&mut conn, drop).unwrap(), 1);

    assert!(matches!(show_item(&conn, drop), Err(ShlistError::NotFound(_))));
    assert_eq!(show_item(&conn, keep).unwrap().name, "keep");
}

#[test]
fn test_delete_missing_item_is_noop() {
    let mut conn = open_in_memory().unwrap();
    let removed = delete_item(&mut conn, 12345).expect("deleting a missing item should not fail");
    assert_eq!(removed, 0);
}

#[test]
fn test_delete_list_cascades_to_items() {
    let mut conn = open_in_memory().unwrap();
    reset(&mut conn, true).unwrap();
    let breakfast = list_id_from_name(&conn, "breakfast").unwrap();
    let lunch = list_id_from_name(&conn, "lunch").unwrap();

    delete_list(&mut conn, breakfast).unwrap();

    let names: Vec<String> = list_lists(&conn).unwrap().into_iter().map(|l| l.name).collect();
    assert!(!names.contains(&"breakfast".to_string()));
    assert_eq!(
        count(&conn, &format!("SELECT COUNT(*) FROM item WHERE list_id = {breakfast}")),
        0
    );
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM item WHERE list_id NOT IN (SELECT id FROM list)"),
        0
    );
    assert_eq!(show_list(&conn, lunch).unwrap().items.len(), 1);
}

#[test]
fn test_delete_list_cascades_without_foreign_key_enforcement() {
    let mut conn = open_in_memory().unwrap();
    let list_id = add_list(&mut conn, "doomed").unwrap();
    add_item(&mut conn, list_id, &NewItem::named("a")).unwrap();
    add_item(&mut conn, list_id, &NewItem::named("b")).unwrap();

    conn.execute("PRAGMA foreign_keys = OFF", []).unwrap();
    assert!(!foreign_keys_enabled(&conn).unwrap());

    delete_list(&mut conn, list_id).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM item"), 0);
}

#[test]
fn test_reset_populates_sample_data() {
    let mut conn = open_in_memory().unwrap();
    add_list(&mut conn, "leftover").unwrap();

    reset(&mut conn, true).unwrap();

    let mut names: Vec<String> = list_lists(&conn).unwrap().into_iter().map(|l| l.name).collect();
    names.sort();
    assert_eq!(names, ["breakfast", "lunch", "supper"]);

    let breakfast = list_id_from_name(&conn, "breakfast").unwrap();
    let mut items: Vec<String> = show_list(&conn, breakfast)
        .unwrap()
        .items
        .into_iter()
        .map(|item| item.name)
        .collect();
    items.sort();
    assert_eq!(items, ["eggs", "ham", "spam"]);

    let total: usize = SEED_DATA.iter().map(|(_, items)| items.len()).sum();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM item") as usize, total);
}

#[test]
fn test_reset_without_populate_leaves_empty_tables() {
    let mut conn = open_in_memory().unwrap();
    reset(&mut conn, true).unwrap();
    reset(&mut conn, false).unwrap();

    assert!(list_lists(&conn).unwrap().is_empty());
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM item"), 0);
    assert!(foreign_keys_enabled(&conn).unwrap());
}

#[test]
fn test_file_store_persists_and_cascades_after_reopen() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("nested").join("shlist.db");

    let list_id = {
        let mut conn = open_store(&path).expect("store should open");
        let list_id = add_list(&mut conn, "books").unwrap();
        add_item(&mut conn, list_id, &NewItem::named("dune")).unwrap();
        list_id
    };
    assert!(path.exists());

    // Reopen runs initialize with force = false.
    let mut conn = open_store(&path).unwrap();
    assert!(table_exists(&conn, "list").unwrap());
    assert_eq!(show_list(&conn, list_id).unwrap().items.len(), 1);

    delete_list(&mut conn, list_id).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM item"), 0);
}

#[test]
fn test_initialize_is_idempotent() {
    let mut conn = open_in_memory().unwrap();
    let id = add_list(&mut conn, "stay").unwrap();

    initialize(&mut conn, SCHEMA, false).unwrap();
    initialize(&mut conn, SCHEMA, false).unwrap();

    assert_eq!(list_id_from_name(&conn, "stay").unwrap(), id);
}
