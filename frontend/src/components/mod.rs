// Reusable components live here.

pub mod chip_group;
pub mod error_banner;
pub mod header;
pub mod loading_spinner;
pub mod post_card;
pub mod post_form;
pub mod session_notice;
