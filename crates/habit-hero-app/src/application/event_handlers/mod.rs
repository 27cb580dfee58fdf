mod announcement_handler;

pub use announcement_handler::{AnnouncementEventHandler, Announcements};
