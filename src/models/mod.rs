mod message;
mod report;
mod reward;
mod site;

pub use message::*;
pub use report::*;
pub use reward::*;
pub use site::*;
