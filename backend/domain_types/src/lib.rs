pub mod errors;
pub mod form;
pub mod location;
pub mod merchant;
pub mod types;
pub mod validation;
