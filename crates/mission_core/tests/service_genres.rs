use mission_core::{
    FixedClock, GenreStore, JsonGenreStore, MemoryGenreStore, MissionService, ServiceError,
};

fn clock() -> FixedClock {
    FixedClock::parse("2025-03-10 09:00").unwrap()
}

fn service_with(names: &[&str]) -> MissionService<MemoryGenreStore, FixedClock> {
    let mut service = MissionService::with_clock(MemoryGenreStore::new(), clock()).unwrap();
    for name in names {
        service.add_genre(*name, None).unwrap();
    }
    service
}

fn names(service: &MissionService<MemoryGenreStore, FixedClock>) -> Vec<&str> {
    service.genres().iter().map(|genre| genre.name.as_str()).collect()
}

#[test]
fn empty_store_add_genre_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data.json");

    let mut service = MissionService::new(JsonGenreStore::open(&path).unwrap()).unwrap();
    assert!(service.genres().is_empty());
    service.add_genre("Work", None).unwrap();

    let reloaded = JsonGenreStore::open(&path).unwrap().load_genres().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].name, "Work");
    assert!(reloaded[0].missions.is_empty());
}

#[test]
fn every_mutation_saves_once() {
    let mut service = service_with(&["A", "B"]);
    assert_eq!(service.store().save_count(), 2);

    service.rename_genre(0, "Alpha").unwrap();
    service.set_genre_summary(1, Some("second")).unwrap();
    service.move_genre_down(0).unwrap();
    service.move_genre_up(1).unwrap();
    service.delete_genre(1).unwrap();

    assert_eq!(service.store().save_count(), 7);
    assert_eq!(names(&service), vec!["Alpha"]);
}

#[test]
fn rename_out_of_range_leaves_list_unchanged() {
    let mut service = service_with(&["A", "B"]);
    let saves = service.store().save_count();

    let err = service.rename_genre(5, "X").unwrap_err();
    assert!(matches!(err, ServiceError::IndexOutOfRange { index: 5, len: 2 }));
    assert_eq!(names(&service), vec!["A", "B"]);
    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn every_index_operation_checks_bounds() {
    let mut service = service_with(&["A"]);
    let saves = service.store().save_count();

    assert!(matches!(
        service.set_genre_summary(1, Some("x")),
        Err(ServiceError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        service.delete_genre(1),
        Err(ServiceError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        service.move_genre_up(1),
        Err(ServiceError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        service.move_genre_down(3),
        Err(ServiceError::IndexOutOfRange { .. })
    ));
    assert_eq!(service.store().save_count(), saves);
    assert_eq!(names(&service), vec!["A"]);
}

#[test]
fn boundary_moves_are_noops_without_save() {
    let mut service = service_with(&["A", "B", "C"]);
    let saves = service.store().save_count();

    service.move_genre_up(0).unwrap();
    service.move_genre_down(2).unwrap();

    assert_eq!(names(&service), vec!["A", "B", "C"]);
    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn moves_swap_neighbours() {
    let mut service = service_with(&["A", "B", "C"]);

    service.move_genre_up(2).unwrap();
    assert_eq!(names(&service), vec!["A", "C", "B"]);

    service.move_genre_down(0).unwrap();
    assert_eq!(names(&service), vec!["C", "A", "B"]);
}

#[test]
fn empty_summary_clears_field() {
    let mut service = MissionService::with_clock(MemoryGenreStore::new(), clock()).unwrap();
    service.add_genre("Work", Some("desk")).unwrap();
    assert_eq!(service.genres()[0].summary.as_deref(), Some("desk"));

    service.set_genre_summary(0, Some("")).unwrap();
    assert_eq!(service.genres()[0].summary, None);

    service.set_genre_summary(0, Some("again")).unwrap();
    service.set_genre_summary(0, None).unwrap();
    assert_eq!(service.genres()[0].summary, None);
}

#[test]
fn add_genre_returns_resolvable_handle() {
    let mut service = service_with(&[]);
    let id = service.add_genre("Work", Some("desk")).unwrap();

    let genre = service.genre(id).expect("added genre should resolve");
    assert_eq!(genre.name, "Work");
    assert_eq!(service.list_genres().len(), 1);
}

#[test]
fn save_failure_keeps_in_memory_change() {
    let mut service = service_with(&["A"]);
    service.store().set_fail_saves(true);

    let err = service.rename_genre(0, "Renamed").unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(names(&service), vec!["Renamed"]);

    service.store().set_fail_saves(false);
    service.add_genre("B", None).unwrap();
    let persisted = service.store().load_genres().unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].name, "Renamed");
}

#[test]
fn service_loads_existing_document_once() {
    let store = MemoryGenreStore::with_document(
        r#"{"genres": [{"name": "Work"}, {"name": 1}, {"name": "Home", "missions": []}]}"#,
    );
    let service = MissionService::with_clock(store, clock()).unwrap();
    assert_eq!(names(&service), vec!["Work", "Home"]);
    assert_eq!(service.store().save_count(), 0);
}

#[test]
fn service_construction_propagates_storage_errors() {
    let store = MemoryGenreStore::with_document(r#"{"genres": 3}"#);
    let err = MissionService::with_clock(store, clock()).err().unwrap();
    assert!(matches!(err, ServiceError::Storage(_)));
}
