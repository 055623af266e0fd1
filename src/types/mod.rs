pub mod locale;
pub mod sort;
pub mod workout;
