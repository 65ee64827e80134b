pub mod names;
pub mod phone;
pub mod reference;
pub mod travel;
