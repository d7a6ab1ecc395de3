pub mod catalog;
pub mod dispatcher;
pub mod install_state;
pub mod launcher;
pub mod logging;
pub mod resolver;
pub mod settings;
