pub mod balance;
pub mod forms;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod user;
