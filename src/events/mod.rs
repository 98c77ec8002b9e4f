pub mod pointer;
pub mod viewport;
