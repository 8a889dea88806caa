use std::collections::BTreeSet;
use crate::core::matcher::EventRequirements;
use crate::models::{CalendarDay, Profile};

/// Check that a volunteer lives in the event's state
///
/// Two-letter codes compare ASCII case-insensitively. City never takes part:
/// a volunteer in a same-named city of another state is out.
#[inline]
pub fn matches_state(profile: &Profile, state: &str) -> bool {
    let candidate = profile.state.trim();
    !candidate.is_empty() && candidate.eq_ignore_ascii_case(state)
}

/// Check that a volunteer holds every required skill
///
/// An empty requirement set is satisfied by everyone.
#[inline]
pub fn covers_required_skills(profile: &Profile, required: &BTreeSet<String>) -> bool {
    required.is_subset(&profile.skills)
}

/// Check that a volunteer listed the event's day as available
#[inline]
pub fn is_available_on(profile: &Profile, day: CalendarDay) -> bool {
    profile.available_dates.contains(&day)
}

/// All three eligibility checks; no partial credit
#[inline]
pub fn is_eligible(profile: &Profile, requirements: &EventRequirements) -> bool {
    matches_state(profile, requirements.state())
        && covers_required_skills(profile, requirements.skills_required())
        && is_available_on(profile, requirements.date())
}
