pub mod file_set_client;
pub mod form_handler;
pub mod health_handler;
pub mod html_renderer;
