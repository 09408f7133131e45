pub mod observe;
pub mod update;
