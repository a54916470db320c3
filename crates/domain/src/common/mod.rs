pub mod string;

pub use string::{is_blank, none_if_blank};
