use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::models::Task;

/// Selects the tasks that should render on `target`, preserving input order.
///
/// Each task is evaluated by exactly one date rule, in order:
/// 1. a present `due_date` matches by plain string equality;
/// 2. otherwise a legacy `date` timestamp matches when its calendar day
///    (local time) equals `target`;
/// 3. a duration task whose earlier rules did not match belongs to every day
///    of its inclusive `start_date..end_date` range.
///
/// Duplicate ids in the input are suppressed; only the first occurrence can
/// match.
pub fn tasks_for_day(tasks: &[Task], target: NaiveDate) -> Vec<Task> {
    let target_str = target.format("%Y-%m-%d").to_string();
    let mut counted: HashSet<&str> = HashSet::new();
    let mut matched = Vec::new();

    for task in tasks {
        if counted.contains(task.id.as_str()) {
            continue;
        }
        if belongs_to_day(task, target, &target_str) {
            counted.insert(task.id.as_str());
            matched.push(task.clone());
        }
    }

    matched
}

fn belongs_to_day(task: &Task, target: NaiveDate, target_str: &str) -> bool {
    // String comparison of YYYY-MM-DD values keeps deadline tasks immune to
    // timezone shifts; only the legacy path touches a parsed timestamp.
    if let Some(due) = task.due_date.as_deref() {
        if due == target_str {
            return true;
        }
    } else if let Some(raw) = task.date.as_deref() {
        if legacy_day(raw) == Some(target) {
            return true;
        }
    }

    // Zero-padded date strings order lexicographically, so the inclusive
    // range check needs no parsing either.
    if task.is_duration {
        if let (Some(start), Some(end)) = (task.start_date.as_deref(), task.end_date.as_deref()) {
            return start <= target_str && target_str <= end;
        }
    }

    false
}

/// Calendar day of a legacy timestamp, interpreted in local time. Unparsable
/// timestamps yield no day, so the task silently matches nothing.
fn legacy_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
