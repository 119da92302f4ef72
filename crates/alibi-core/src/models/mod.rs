pub mod contact;
pub mod context;
pub mod excuse;
pub mod generation;
