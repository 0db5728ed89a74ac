pub mod cart;
pub mod page;
