pub mod auth;
pub mod home;
pub mod likes;
pub mod messages;
pub mod users;
