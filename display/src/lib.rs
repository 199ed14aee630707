pub use crate::display::{Display, DisplayError};

mod display;
