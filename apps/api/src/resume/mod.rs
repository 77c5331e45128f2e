// Resume repository: build, fetch-owned, list-mine.

pub mod builder;
pub mod handlers;
