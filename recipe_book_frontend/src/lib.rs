pub mod api;
pub mod auth;
pub mod config;
pub mod form_component;
pub mod modal;
pub mod recipe_book;
pub mod session;
pub mod util;

#[cfg(test)]
mod test_util;
