pub mod booking;
pub mod bus;
pub mod operator;
pub mod route;
