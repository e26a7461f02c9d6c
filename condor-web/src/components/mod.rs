pub mod field;
pub mod footer;
pub mod header;
pub mod modal;
pub mod notification;
pub mod rating;
pub mod recover_password_modal;
pub mod route_card;
pub mod route_form;
