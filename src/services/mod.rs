pub mod cart_page;
pub mod cart_service;
pub mod mutation;
