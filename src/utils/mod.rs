pub mod event_pool;
pub mod progress_bar_builder;
