// Model exports
pub mod calendar;
pub mod domain;
pub mod requests;
pub mod responses;

pub use calendar::{CalendarDay, CalendarDayError};
pub use domain::{Profile, Event, EventPatch, AssignmentRecord, MalformedField};
pub use requests::{AssignVolunteersRequest, PreviewMatchesRequest};
pub use responses::{MatchVolunteersResponse, AssignVolunteersResponse, VolunteerHistoryResponse, HealthResponse, ErrorResponse};
