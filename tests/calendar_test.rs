use chrono::NaiveDate;

use planner_backend::calendar::tasks_for_day;
use planner_backend::models::Task;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn deadline(id: &str, due: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {}", id),
        due_date: Some(due.to_string()),
        ..Task::default()
    }
}

fn duration(id: &str, start: &str, end: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {}", id),
        is_duration: true,
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        ..Task::default()
    }
}

#[test]
fn deadline_matches_by_string_equality() {
    let tasks = vec![deadline("a", "2025-03-31"), deadline("b", "2025-04-01")];

    let matched = tasks_for_day(&tasks, day("2025-03-31"));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "a");
}

#[test]
fn duplicate_ids_in_input_match_once() {
    let tasks = vec![deadline("a", "2025-03-31"), deadline("a", "2025-03-31")];

    let matched = tasks_for_day(&tasks, day("2025-03-31"));
    assert_eq!(matched.len(), 1);
}

#[test]
fn duration_spans_inclusive_range() {
    let tasks = vec![duration("a", "2025-03-01", "2025-03-05")];

    for target in ["2025-03-01", "2025-03-03", "2025-03-05"] {
        assert_eq!(tasks_for_day(&tasks, day(target)).len(), 1, "{}", target);
    }
    for target in ["2025-02-28", "2025-03-06"] {
        assert!(tasks_for_day(&tasks, day(target)).is_empty(), "{}", target);
    }
}

#[test]
fn deadline_rule_wins_over_duration_rule() {
    let mut task = duration("a", "2025-03-01", "2025-03-31");
    task.due_date = Some("2025-03-31".to_string());

    // Matches exactly once on the due date, classified by the deadline rule.
    let matched = tasks_for_day(std::slice::from_ref(&task), day("2025-03-31"));
    assert_eq!(matched.len(), 1);
}

#[test]
fn legacy_timestamp_matches_its_local_calendar_day() {
    let task = Task {
        id: "legacy".to_string(),
        title: "old task".to_string(),
        date: Some("2025-03-15T10:00:00Z".to_string()),
        ..Task::default()
    };
    let tasks = vec![task];

    assert_eq!(tasks_for_day(&tasks, day("2025-03-15")).len(), 1);
    assert!(tasks_for_day(&tasks, day("2025-03-14")).is_empty());
    assert!(tasks_for_day(&tasks, day("2025-03-16")).is_empty());
}

#[test]
fn due_date_suppresses_legacy_timestamp() {
    // A task carrying both fields is governed by the deadline rule only.
    let mut task = deadline("a", "2025-03-20");
    task.date = Some("2025-03-15T10:00:00Z".to_string());
    let tasks = vec![task];

    assert!(tasks_for_day(&tasks, day("2025-03-15")).is_empty());
    assert_eq!(tasks_for_day(&tasks, day("2025-03-20")).len(), 1);
}

#[test]
fn duration_missing_a_bound_matches_nowhere() {
    let mut task = duration("a", "2025-03-01", "2025-03-05");
    task.end_date = None;
    let tasks = vec![task];

    assert!(tasks_for_day(&tasks, day("2025-03-03")).is_empty());
}

#[test]
fn task_without_any_date_field_matches_nowhere() {
    let task = Task {
        id: "bare".to_string(),
        title: "no dates".to_string(),
        ..Task::default()
    };

    assert!(tasks_for_day(&[task], day("2025-03-15")).is_empty());
}

#[test]
fn output_preserves_input_order() {
    let tasks = vec![
        deadline("b", "2025-03-31"),
        duration("c", "2025-03-30", "2025-04-01"),
        deadline("a", "2025-03-31"),
    ];

    let matched = tasks_for_day(&tasks, day("2025-03-31"));
    let ids: Vec<&str> = matched.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}
