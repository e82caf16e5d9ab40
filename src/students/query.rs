//! Query-parameter construction for list endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction accepted by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an earlier value for the same key
    pub fn add_param(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get_params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }
}

/// Optional paging and sorting for list, search and level endpoints
///
/// Unset fields are left out of the query so the server defaults apply
/// (page 0, size 10, sort by `id`, `ASC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl StudentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort_by(mut self, field: &str) -> Self {
        self.sort_by = Some(field.to_string());
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    /// Build the query parameters
    pub fn to_builder(&self) -> QueryBuilder {
        let mut query = QueryBuilder::new();
        if let Some(page) = self.page {
            query.add_param("page", &page.to_string());
        }
        if let Some(size) = self.size {
            query.add_param("size", &size.to_string());
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            query.add_param("sortBy", sort_by);
        }
        if let Some(direction) = self.sort_direction {
            query.add_param("sortDirection", direction.as_str());
        }
        query
    }

    /// Parameters for the search endpoint
    pub fn to_search_builder(&self, text: &str) -> QueryBuilder {
        let mut query = self.to_builder();
        query.add_param("query", text);
        query
    }
}
