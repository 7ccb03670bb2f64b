pub mod form_handlers;
pub mod system_handlers;

pub use form_handlers::*;
pub use system_handlers::*;
