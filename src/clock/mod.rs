pub mod pll;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClockError {
    #[error("division by zero: {what}")]
    DivisionByZero { what: &'static str },
}
