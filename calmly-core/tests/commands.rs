//! The calendar commands run end to end against a caldir on disk.

use std::fs;
use std::path::Path;

use calmly_core::{Caldir, CalendarKind, CalmlyError, CommandEngine, WindowDays};
use chrono::NaiveDate;
use chrono_tz::Tz;
use chrono_tz::America::New_York;
use tempfile::TempDir;

const TZ: Tz = New_York;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_calendar(root: &Path, slug: &str, config: Option<&str>) {
    let dir = root.join(slug);
    fs::create_dir_all(&dir).unwrap();
    if let Some(config) = config {
        fs::create_dir_all(dir.join(".calmly")).unwrap();
        fs::write(dir.join(".calmly/config.toml"), config).unwrap();
    }
}

fn setup() -> (TempDir, CommandEngine<Caldir>) {
    let dir = tempfile::tempdir().unwrap();
    make_calendar(dir.path(), "family", Some("name = \"Family\"\n"));
    make_calendar(dir.path(), "work", Some("name = \"Work\"\nkind = \"remote\"\n"));
    make_calendar(dir.path(), "EmptyCal", None);

    let engine = CommandEngine::authorize(Caldir::new(dir.path(), TZ), TZ).unwrap();
    (dir, engine)
}

fn ics_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "ics"))
        .count()
}

#[test]
fn test_list_shows_names_and_kinds() {
    let (_dir, engine) = setup();
    let lines: Vec<String> = engine
        .list()
        .unwrap()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.kind))
        .collect();

    assert_eq!(lines, vec!["EmptyCal (Local)", "Family (Local)", "Work (iCloud/CalDAV)"]);
}

#[test]
fn test_vacation_is_listed_as_range() {
    let (dir, mut engine) = setup();
    engine.add("Family", "Vacation", "2025-07-01", Some("2025-07-14")).unwrap();
    assert!(dir.path().join("family/2025-07-01__vacation.ics").exists());

    let lines = engine.events_from("family", WindowDays::parse(Some("30")), day("2025-06-20")).unwrap();
    assert_eq!(lines, vec!["2025-07-01 → 2025-07-14: Vacation"]);
}

#[test]
fn test_standup_round_trip_and_delete() {
    let (dir, mut engine) = setup();
    engine.add_timed("Work", "Standup", "2025-03-10", "09:00", "09:15").unwrap();
    assert!(dir.path().join("work/2025-03-10T0900__standup.ics").exists());

    let lines = engine.events_from("Work", WindowDays::new(30), day("2025-03-01")).unwrap();
    assert_eq!(lines, vec!["2025-03-10: Standup (09:00-09:15)"]);

    let report = engine.delete("Work", "Standup", "2025-03-10").unwrap();
    assert_eq!(report.deleted.len(), 1);
    assert!(report.failures.is_empty());
    assert_eq!(ics_count(&dir.path().join("work")), 0);

    assert!(matches!(
        engine.delete("Work", "Standup", "2025-03-10"),
        Err(CalmlyError::NoMatchFound { .. })
    ));
}

#[test]
fn test_empty_calendar_prints_single_line() {
    let (_dir, engine) = setup();
    let lines = engine.events_from("emptycal", WindowDays::new(7), day("2025-03-01")).unwrap();
    assert_eq!(lines, vec!["No events in 'emptycal' for the next 7 days."]);
}

#[test]
fn test_bad_days_falls_back_to_thirty() {
    let (_dir, mut engine) = setup();
    engine.add("Family", "Late", "2025-03-25", None).unwrap();

    let lines = engine
        .events_from("Family", WindowDays::parse(Some("soon")), day("2025-03-01"))
        .unwrap();
    assert_eq!(lines, vec!["2025-03-25: Late"]);

    let lines = engine.events_from("Family", WindowDays::new(7), day("2025-03-01")).unwrap();
    assert_eq!(lines, vec!["No events in 'Family' for the next 7 days."]);
}

#[test]
fn test_delete_removes_all_same_titled_events_that_day() {
    let (dir, mut engine) = setup();
    engine.add("Family", "Dentist", "2025-05-02", None).unwrap();
    engine.add_timed("Family", "dentist", "2025-05-02", "14:00", "15:00").unwrap();
    engine.add("Family", "Dentist", "2025-05-03", None).unwrap();

    let report = engine.delete("family", "DENTIST", "2025-05-02").unwrap();
    assert_eq!(report.deleted.len(), 2);
    assert_eq!(ics_count(&dir.path().join("family")), 1);
}

#[test]
fn test_foreign_files_are_listed() {
    let (dir, engine) = setup();
    fs::write(
        dir.path().join("family/imported.ics"),
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Other//EN\r\nBEGIN:VEVENT\r\nUID:imported-1\r\nDTSTART;TZID=Europe/Berlin:20250402T150000\r\nDTEND;TZID=Europe/Berlin:20250402T160000\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
    )
    .unwrap();
    fs::write(dir.path().join("family/garbage.ics"), "not ics").unwrap();

    let lines = engine.events_from("Family", WindowDays::new(30), day("2025-04-01")).unwrap();
    assert_eq!(lines, vec!["2025-04-02: Untitled (09:00-10:00)"]);
}

#[test]
fn test_missing_calendar_dir_denies_access() {
    let dir = tempfile::tempdir().unwrap();
    let caldir = Caldir::new(dir.path().join("missing"), TZ);

    assert!(matches!(
        CommandEngine::authorize(caldir, TZ),
        Err(CalmlyError::AccessDenied(_))
    ));
}

#[test]
fn test_calendar_kind_parsed_from_config() {
    let (_dir, engine) = setup();
    let work = engine.list().unwrap().into_iter().find(|c| c.slug == "work").unwrap();
    assert_eq!(work.kind, CalendarKind::Remote);
}
