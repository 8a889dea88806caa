// Core algorithm exports
pub mod assignment;
pub mod filters;
pub mod matcher;

pub use assignment::{validate_assignment, AssignmentError, AssignmentSelection, SelectionChange};
pub use filters::{covers_required_skills, is_available_on, is_eligible, matches_state};
pub use matcher::{match_volunteers, EventRequirements, MatchError, MatchResult};
