//! Transfer records of the students API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Academic level of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Bachelor,
    Master,
    Phd,
}

impl Level {
    /// Every level, in display order
    pub const ALL: [Level; 3] = [Level::Bachelor, Level::Master, Level::Phd];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bachelor => "BACHELOR",
            Level::Master => "MASTER",
            Level::Phd => "PHD",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Level::Bachelor => "Bachelor",
            Level::Master => "Master",
            Level::Phd => "PhD",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::general(format!("unknown level: {}", s)))
    }
}

/// A student record as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Server-assigned identifier
    pub id: i64,
    pub username: String,
    pub level: Level,
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    pub username: String,
    pub level: Level,
}

impl StudentRequest {
    pub fn new(username: &str, level: Level) -> Self {
        Self {
            username: username.to_string(),
            level,
        }
    }
}

impl From<&Student> for StudentRequest {
    fn from(student: &Student) -> Self {
        Self {
            username: student.username.clone(),
            level: student.level,
        }
    }
}

/// Pagination envelope returned by list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Page size
    pub size: u32,
    /// Zero-based page index
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A page of students
pub type StudentPage = Page<Student>;
