mod common;
mod form_page_test;
mod health_test;
