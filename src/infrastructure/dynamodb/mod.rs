//! DynamoDB adapter for the organization store.

mod client;
mod item;

pub use client::{DEFAULT_TABLE_NAME, DynamoDbClient};
