// Declare submodules
pub mod meeting_dto;
pub mod meeting_handlers;
pub mod meeting_models;
pub mod meeting_repository;
pub mod meeting_service;

// Re-export public items
pub use meeting_dto::CreateMeetingRequest;
pub use meeting_handlers::{create_meeting, get_meetings, get_meetings_by_participant};
pub use meeting_models::Meeting;
pub use meeting_repository::MeetingRepository;
pub use meeting_service::MeetingService;
