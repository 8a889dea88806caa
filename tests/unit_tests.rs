// Unit tests for Volunteer Match

use volunteer_match::core::{
    filters::{covers_required_skills, is_available_on, is_eligible, matches_state},
    matcher::EventRequirements,
};
use volunteer_match::models::{CalendarDay, Event, Profile};

fn create_profile(state: &str, skills: &[&str], dates: &[&str]) -> Profile {
    Profile {
        account_id: "test".to_string(),
        full_name: "Test".to_string(),
        city: "Houston".to_string(),
        state: state.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        preferences: Some("Mornings".to_string()),
        available_dates: dates.iter().map(|d| d.parse().unwrap()).collect(),
    }
}

fn create_event(skills: &[&str]) -> Event {
    Event {
        event_id: "evt".to_string(),
        title: "Community Cooking".to_string(),
        description: Some("Cook for the shelter".to_string()),
        location: Some("Houston, TX".to_string()),
        urgency: None,
        state: Some("TX".to_string()),
        skills_required: Some(skills.iter().map(|s| s.to_string()).collect()),
        date: CalendarDay::from_ymd(2025, 8, 7),
        max_volunteers: 2,
        assigned_volunteers: vec![],
        malformed: vec![],
    }
}

#[test]
fn test_eligible_volunteer_passes_all_checks() {
    let profile = create_profile("TX", &["Cooking", "Gardening"], &["2025-08-07"]);
    let requirements = EventRequirements::from_event(&create_event(&["Cooking"])).unwrap();

    assert!(matches_state(&profile, requirements.state()));
    assert!(covers_required_skills(&profile, requirements.skills_required()));
    assert!(is_available_on(&profile, requirements.date()));
    assert!(is_eligible(&profile, &requirements));
}

#[test]
fn test_single_failed_check_excludes() {
    let requirements = EventRequirements::from_event(&create_event(&["Cooking"])).unwrap();

    let wrong_state = create_profile("AK", &["Cooking"], &["2025-08-07"]);
    let missing_skill = create_profile("TX", &["Gardening"], &["2025-08-07"]);
    let unavailable = create_profile("TX", &["Cooking"], &["2025-08-06"]);

    assert!(!is_eligible(&wrong_state, &requirements));
    assert!(!is_eligible(&missing_skill, &requirements));
    assert!(!is_eligible(&unavailable, &requirements));
}

#[test]
fn test_skill_tags_are_exact() {
    let profile = create_profile("TX", &["cooking"], &["2025-08-07"]);
    let requirements = EventRequirements::from_event(&create_event(&["Cooking"])).unwrap();

    assert!(!covers_required_skills(&profile, requirements.skills_required()));
}

#[test]
fn test_profile_without_skills_passes_empty_requirement() {
    let profile = create_profile("TX", &[], &["2025-08-07"]);
    let requirements = EventRequirements::from_event(&create_event(&[])).unwrap();

    assert!(is_eligible(&profile, &requirements));
}

#[test]
fn test_profile_without_dates_never_available() {
    let profile = create_profile("TX", &["Cooking"], &[]);
    let day = CalendarDay::from_ymd(2025, 8, 7).unwrap();

    assert!(!is_available_on(&profile, day));
}
