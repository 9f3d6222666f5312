pub mod cart;
pub mod checkout;
pub mod menu;
pub mod reservation;
