pub mod api;
pub mod menus;
pub mod pages;
pub mod profile;
pub mod restaurants;
