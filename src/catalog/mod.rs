pub mod library;
pub mod record;
