//! One module per screen. Each page reads services and the session through
//! [`crate::app::use_app_context`] and reports outcomes through its notice callback.

pub mod about;
pub mod achievement_manager;
pub mod admin_panel;
pub mod contact;
pub mod help;
pub mod home;
pub mod login;
pub mod moderator_panel;
pub mod my_achievements;
pub mod not_found;
pub mod profile;
pub mod register;
pub mod route_detail;
pub mod route_list;
pub mod settings;
