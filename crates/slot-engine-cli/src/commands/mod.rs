pub mod bounds;
pub mod layout;
