pub mod catalog;
pub mod error;
pub mod image_upload;
pub mod room_filters;
pub mod room_resolver;
pub mod storage;
pub mod supabase_auth;
