use mission_core::{
    FixedClock, MemoryGenreStore, MissionId, MissionService, ServiceError, TaskId,
};

type Service = MissionService<MemoryGenreStore, FixedClock>;

fn setup() -> (Service, MissionId, TaskId, TaskId) {
    let clock = FixedClock::parse("2025-03-10 09:00").unwrap();
    let mut service = MissionService::with_clock(MemoryGenreStore::new(), clock).unwrap();
    let genre = service.add_genre("Work", None).unwrap();
    let mission = service.add_mission(genre, "Launch", None, None).unwrap();
    let design = service.add_task(mission, "Design", None).unwrap();
    let build = service.add_task(mission, "Build", None).unwrap();
    (service, mission, design, build)
}

fn task_names(service: &Service, mission: MissionId) -> Vec<String> {
    service
        .mission(mission)
        .unwrap()
        .tasks
        .iter()
        .map(|task| task.name.clone())
        .collect()
}

#[test]
fn completing_tasks_propagates_to_mission() {
    let (mut service, mission, design, build) = setup();

    service.toggle_task_done(mission, design, true).unwrap();
    let stored = service.mission(mission).unwrap();
    assert_eq!(stored.progress(), 0.5);
    assert_eq!(stored.completed_at, None);
    assert_eq!(
        service.task(mission, design).unwrap().completed_at.as_deref(),
        Some("2025-03-10 09:00")
    );

    service.clock().advance_minutes(30);
    service.toggle_task_done(mission, build, true).unwrap();
    let stored = service.mission(mission).unwrap();
    assert_eq!(stored.progress(), 1.0);
    assert_eq!(stored.completed_at.as_deref(), Some("2025-03-10 09:30"));
}

#[test]
fn toggling_done_twice_restamps_without_changing_state() {
    let (mut service, mission, design, build) = setup();
    service.toggle_task_done(mission, build, true).unwrap();

    service.toggle_task_done(mission, design, true).unwrap();
    service.clock().advance_minutes(5);
    service.toggle_task_done(mission, design, true).unwrap();

    let task = service.task(mission, design).unwrap();
    assert!(task.done);
    assert_eq!(task.completed_at.as_deref(), Some("2025-03-10 09:05"));
    assert_eq!(
        service.mission(mission).unwrap().completed_at.as_deref(),
        Some("2025-03-10 09:05")
    );
}

#[test]
fn unchecking_clears_task_and_mission_stamps() {
    let (mut service, mission, design, build) = setup();
    service.toggle_task_done(mission, design, true).unwrap();
    service.toggle_task_done(mission, build, true).unwrap();

    service.toggle_task_done(mission, build, false).unwrap();

    let task = service.task(mission, build).unwrap();
    assert!(!task.done);
    assert_eq!(task.completed_at, None);
    assert_eq!(service.mission(mission).unwrap().completed_at, None);
}

#[test]
fn deleting_the_last_task_of_a_complete_mission_resets_completion() {
    let (mut service, mission, design, build) = setup();
    service.delete_task(mission, build).unwrap();
    service.toggle_task_done(mission, design, true).unwrap();
    assert!(service.mission(mission).unwrap().completed_at.is_some());

    service.delete_task(mission, design).unwrap();

    let stored = service.mission(mission).unwrap();
    assert!(stored.tasks.is_empty());
    assert_eq!(stored.progress(), 0.0);
    assert_eq!(stored.completed_at, None);
}

#[test]
fn deleting_the_only_open_task_completes_the_mission() {
    let (mut service, mission, design, build) = setup();
    service.toggle_task_done(mission, design, true).unwrap();

    service.delete_task(mission, build).unwrap();

    assert_eq!(
        service.mission(mission).unwrap().completed_at.as_deref(),
        Some("2025-03-10 09:00")
    );
}

#[test]
fn adding_a_task_reopens_a_complete_mission() {
    let (mut service, mission, design, build) = setup();
    service.toggle_task_done(mission, design, true).unwrap();
    service.toggle_task_done(mission, build, true).unwrap();

    let review = service.add_task(mission, "Review", Some("2025-03-20")).unwrap();

    let stored = service.mission(mission).unwrap();
    assert_eq!(stored.completed_at, None);
    assert!((stored.progress() - 2.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(
        service.task(mission, review).unwrap().due_date.as_deref(),
        Some("2025-03-20")
    );
}

#[test]
fn task_edits_and_moves() {
    let (mut service, mission, design, build) = setup();
    let saves = service.store().save_count();

    service.rename_task(mission, design, "Sketch").unwrap();
    service.set_task_due(mission, design, Some("2025-03-15")).unwrap();
    assert_eq!(
        service.task(mission, design).unwrap().due_date.as_deref(),
        Some("2025-03-15")
    );
    service.set_task_due(mission, design, Some("")).unwrap();
    assert_eq!(service.task(mission, design).unwrap().due_date, None);

    service.move_task_up(mission, design).unwrap();
    service.move_task_down(mission, build).unwrap();
    assert_eq!(service.store().save_count(), saves + 3);
    assert_eq!(task_names(&service, mission), vec!["Sketch", "Build"]);

    service.move_task_down(mission, design).unwrap();
    assert_eq!(task_names(&service, mission), vec!["Build", "Sketch"]);
    service.move_task_up(mission, design).unwrap();
    assert_eq!(task_names(&service, mission), vec!["Sketch", "Build"]);
    assert_eq!(service.find_task_index(mission, build).unwrap(), 1);
    assert_eq!(service.store().save_count(), saves + 5);
}

#[test]
fn task_from_another_mission_is_not_found() {
    let (mut service, mission, design, _) = setup();
    let genre = service.genres()[0].id();
    let other = service.add_mission(genre, "Other", None, None).unwrap();
    let saves = service.store().save_count();

    let err = service.toggle_task_done(other, design, true).unwrap_err();
    assert!(matches!(err, ServiceError::TaskNotFound(id) if id == design));
    assert!(matches!(
        service.delete_task(other, design),
        Err(ServiceError::TaskNotFound(_))
    ));
    assert!(!service.task(mission, design).unwrap().done);
    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn unknown_mission_is_not_found() {
    let (mut service, _, design, _) = setup();
    let unknown = uuid::Uuid::new_v4();
    let saves = service.store().save_count();

    assert!(matches!(
        service.add_task(unknown, "Lost", None),
        Err(ServiceError::MissionNotFound(id)) if id == unknown
    ));
    assert!(matches!(
        service.rename_task(unknown, design, "x"),
        Err(ServiceError::MissionNotFound(_))
    ));
    assert_eq!(service.store().save_count(), saves);
}

#[test]
fn identical_tasks_are_resolved_by_handle() {
    let (mut service, mission, _, _) = setup();
    let first = service.add_task(mission, "Twin", None).unwrap();
    let second = service.add_task(mission, "Twin", None).unwrap();

    service.toggle_task_done(mission, second, true).unwrap();

    assert!(!service.task(mission, first).unwrap().done);
    assert!(service.task(mission, second).unwrap().done);
}

#[test]
fn completion_state_survives_reload() {
    let (mut service, mission, design, build) = setup();
    service.toggle_task_done(mission, design, true).unwrap();
    service.toggle_task_done(mission, build, true).unwrap();

    let document = service.store().document().unwrap();
    let reloaded = MissionService::with_clock(
        MemoryGenreStore::with_document(document),
        FixedClock::parse("2025-03-11 08:00").unwrap(),
    )
    .unwrap();

    let stored = &reloaded.genres()[0].missions[0];
    assert_eq!(stored.completed_at.as_deref(), Some("2025-03-10 09:00"));
    assert!(stored.tasks.iter().all(|task| task.done));
    assert_eq!(reloaded.genres(), service.genres());
}
