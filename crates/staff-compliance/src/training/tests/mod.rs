mod aggregation;
mod common;
mod summary;
