#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use student_records::auth::{MemoryStorage, TokenStorage, TOKEN_KEY, USERNAME_KEY};
use student_records::config::ClientOptions;
use student_records::StudentRecords;

pub const TOKEN: &str = "test-token";

/// Client pointed at `uri` with no stored session
pub fn anonymous(uri: &str) -> StudentRecords {
    StudentRecords::new(uri)
}

/// Client pointed at `uri` that starts logged in as `alice`
pub fn logged_in(uri: &str) -> StudentRecords {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, TOKEN).unwrap();
    storage.set(USERNAME_KEY, "alice").unwrap();
    StudentRecords::new_with_storage(ClientOptions::default().with_api_url(uri), Arc::new(storage))
}

pub fn student(id: i64, username: &str, level: &str) -> Value {
    json!({"id": id, "username": username, "level": level})
}

pub fn page(content: Vec<Value>, number: u32, total_elements: u64) -> Value {
    let size = 10u64;
    let total_pages = ((total_elements + size - 1) / size) as u32;
    json!({
        "content": content,
        "totalElements": total_elements,
        "totalPages": total_pages,
        "size": size,
        "number": number,
        "first": number == 0,
        "last": number + 1 >= total_pages,
    })
}
