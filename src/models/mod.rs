pub mod identifier;
pub mod severity;
pub mod catalog;
pub mod evidence;

pub use identifier::VulnId;
pub use severity::*;
pub use catalog::*;
pub use evidence::*;
