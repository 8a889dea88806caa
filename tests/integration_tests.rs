// Integration tests for Volunteer Match

use std::collections::BTreeSet;
use volunteer_match::core::{match_volunteers, validate_assignment, MatchError};
use volunteer_match::models::{Event, Profile};

fn create_profile(name: &str, city: &str, state: &str, skills: &[&str], dates: &[&str]) -> Profile {
    Profile {
        account_id: format!("acct-{}", name.to_lowercase()),
        full_name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        preferences: None,
        available_dates: dates.iter().map(|d| d.parse().unwrap()).collect(),
    }
}

fn create_event(id: &str, state: &str, skills: &[&str], date: &str) -> Event {
    Event {
        event_id: id.to_string(),
        title: format!("Event {}", id),
        description: None,
        location: None,
        urgency: Some("High".to_string()),
        state: Some(state.to_string()),
        skills_required: Some(skills.iter().map(|s| s.to_string()).collect()),
        date: Some(date.parse().unwrap()),
        max_volunteers: 3,
        assigned_volunteers: vec![],
        malformed: vec![],
    }
}

/// Roster mirroring the fixtures the matching rules were written against
fn roster() -> Vec<Profile> {
    vec![
        create_profile("Alice", "Houston", "TX", &["Cooking", "Gardening"], &["2025-08-07", "2025-08-10"]),
        create_profile("Bob", "Austin", "TX", &["Gardening"], &["2025-08-09"]),
        create_profile("Charlie", "Dallas", "TX", &["First-Aid", "Team Work"], &["2025-08-12T09:00"]),
        create_profile("Diana", "Houston", "AK", &["Cooking", "Gardening"], &["2025-08-07"]),
        create_profile("Eric", "Austin", "OK", &["Gardening"], &["2025-08-09"]),
        create_profile("Gio", "Houston", "TX", &["Painting"], &["2025-08-07"]),
        create_profile("Hannah", "Austin", "TX", &["Gardening"], &["2025-08-11"]),
        create_profile("Iggy", "Houston", "tx", &["Cooking"], &["2025-08-07T18:30:00-05:00"]),
        create_profile("Jess", "Dallas", "TX", &["First-Aid"], &["2025-08-12"]),
    ]
}

fn names(matches: &[Profile]) -> Vec<&str> {
    matches.iter().map(|p| p.full_name.as_str()).collect()
}

#[test]
fn test_community_cooking_excludes_other_state() {
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");
    let result = match_volunteers(&roster(), &event).unwrap();

    assert_eq!(names(&result.matches), vec!["Alice", "Iggy"]);
    // Diana shares Alice's city but lives in AK
    assert!(result.matches.iter().all(|p| p.full_name != "Diana"));
    // Gio is in the right place on the right day without the skill
    assert!(result.matches.iter().all(|p| p.full_name != "Gio"));
}

#[test]
fn test_church_gardening_single_match() {
    let event = create_event("2", "TX", &["Gardening"], "2025-08-09");
    let result = match_volunteers(&roster(), &event).unwrap();

    // Eric has the skill but the wrong state, Hannah the wrong date
    assert_eq!(names(&result.matches), vec!["Bob"]);
}

#[test]
fn test_marathon_setup_requires_both_skills() {
    let event = create_event("3", "TX", &["First-Aid", "Team Work"], "2025-08-12");
    let result = match_volunteers(&roster(), &event).unwrap();

    assert_eq!(names(&result.matches), vec!["Charlie"]);
}

#[test]
fn test_no_one_holds_both_skills() {
    let event = create_event("1", "TX", &["Cooking", "Gardening"], "2025-08-07");
    let mut roster = roster();
    roster.retain(|p| p.full_name != "Alice");

    let result = match_volunteers(&roster, &event).unwrap();
    assert!(result.matches.is_empty());
}

#[test]
fn test_no_one_available_on_date() {
    let event = create_event("2", "TX", &["Gardening"], "2025-08-07");
    let mut roster = roster();
    roster.retain(|p| p.full_name != "Alice");

    let result = match_volunteers(&roster, &event).unwrap();
    assert!(result.matches.is_empty());
    assert_eq!(result.total_candidates, roster.len());
}

#[test]
fn test_empty_roster() {
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");
    let result = match_volunteers(&[], &event).unwrap();

    assert!(result.matches.is_empty());
    assert_eq!(result.total_candidates, 0);
}

#[test]
fn test_idempotent() {
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");
    let roster = roster();

    let first = match_volunteers(&roster, &event).unwrap();
    let second = match_volunteers(&roster, &event).unwrap();
    assert_eq!(first.matches, second.matches);
}

#[test]
fn test_skill_relaxation_is_monotonic() {
    let roster = roster();
    let strict = create_event("1", "TX", &["Cooking", "Gardening"], "2025-08-07");

    let required = strict.skills_required.clone().unwrap();
    let subsets: Vec<BTreeSet<String>> = vec![
        required.clone(),
        required.iter().take(1).cloned().collect(),
        required.iter().skip(1).cloned().collect(),
        BTreeSet::new(),
    ];

    let strict_ids: Vec<String> = match_volunteers(&roster, &strict)
        .unwrap()
        .matches
        .into_iter()
        .map(|p| p.account_id)
        .collect();

    for subset in subsets {
        let relaxed = Event {
            skills_required: Some(subset),
            ..strict.clone()
        };
        let relaxed_ids: Vec<String> = match_volunteers(&roster, &relaxed)
            .unwrap()
            .matches
            .into_iter()
            .map(|p| p.account_id)
            .collect();

        assert!(strict_ids.iter().all(|id| relaxed_ids.contains(id)));
    }
}

#[test]
fn test_empty_requirement_filters_on_state_and_date_only() {
    let event = create_event("4", "TX", &[], "2025-08-07");
    let result = match_volunteers(&roster(), &event).unwrap();

    assert_eq!(names(&result.matches), vec!["Alice", "Gio", "Iggy"]);
}

#[test]
fn test_state_exclusivity_despite_same_city() {
    let roster = vec![
        create_profile("Diana", "Houston", "AK", &["Cooking"], &["2025-08-07"]),
        create_profile("Missing", "Houston", "", &["Cooking"], &["2025-08-07"]),
    ];
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");

    assert!(match_volunteers(&roster, &event).unwrap().matches.is_empty());
}

#[test]
fn test_calendar_day_equality_across_time_of_day() {
    let roster = vec![create_profile("Late", "Houston", "TX", &[], &["2025-08-07T23:00"])];
    let event = create_event("1", "TX", &[], "2025-08-07T01:00");

    assert_eq!(match_volunteers(&roster, &event).unwrap().matches.len(), 1);
}

#[test]
fn test_order_preserved() {
    let roster = vec![
        create_profile("A", "Houston", "TX", &["Cooking"], &["2025-08-07"]),
        create_profile("B", "Houston", "AK", &["Cooking"], &["2025-08-07"]),
        create_profile("C", "Houston", "TX", &["Cooking"], &["2025-08-07"]),
    ];
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");

    assert_eq!(names(&match_volunteers(&roster, &event).unwrap().matches), vec!["A", "C"]);

    let reversed: Vec<Profile> = roster.into_iter().rev().collect();
    assert_eq!(names(&match_volunteers(&reversed, &event).unwrap().matches), vec!["C", "A"]);
}

#[test]
fn test_malformed_event_rejected_not_coerced() {
    let mut event = create_event("5", "TX", &["Cooking"], "2025-08-07");
    event.skills_required = None;

    assert!(matches!(
        match_volunteers(&roster(), &event),
        Err(MatchError::MissingField { field: "skillsRequired", .. })
    ));
}

#[test]
fn test_profiles_from_documents_with_gaps() {
    let roster: Vec<Profile> = serde_json::from_value(serde_json::json!([
        { "accountId": "a1", "fullName": "No Skills", "state": "TX", "availableDates": ["2025-08-07"] },
        { "accountId": "a2", "fullName": "No Dates", "state": "TX", "skills": ["Cooking"] },
        { "accountId": "a3", "fullName": "Entity State", "state": { "code": "TX" }, "skills": ["Cooking"], "availableDates": ["2025-08-07T10:00:00.000Z"] },
    ]))
    .unwrap();
    let event = create_event("1", "TX", &["Cooking"], "2025-08-07");

    assert_eq!(names(&match_volunteers(&roster, &event).unwrap().matches), vec!["Entity State"]);
}

#[test]
fn test_match_then_assign_within_capacity() {
    let mut event = create_event("1", "TX", &["Cooking"], "2025-08-07");
    event.max_volunteers = 1;
    let matched = match_volunteers(&roster(), &event).unwrap().matches;

    let alice = vec!["acct-alice".to_string()];
    assert_eq!(validate_assignment(&event, &matched, &alice).unwrap(), alice);

    let both = vec!["acct-alice".to_string(), "acct-iggy".to_string()];
    assert!(validate_assignment(&event, &matched, &both).is_err());

    let diana = vec!["acct-diana".to_string()];
    assert!(validate_assignment(&event, &matched, &diana).is_err());
}
