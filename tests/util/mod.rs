mod test_utils;

pub use test_utils::{login, read_json, TestContextExt};
