pub mod health;
pub mod evidence;
pub mod decide;
pub mod threats;
