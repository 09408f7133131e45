pub mod user_resolver;
