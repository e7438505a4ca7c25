pub mod alert;
pub mod market;
pub mod sentiment;
pub mod setup;
pub mod signals;

pub use alert::*;
pub use market::*;
pub use sentiment::*;
pub use setup::*;
pub use signals::*;
