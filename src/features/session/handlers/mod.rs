pub mod session_handler;

pub use session_handler::{get_me, login, logout};
