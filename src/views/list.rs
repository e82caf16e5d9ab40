//! Paged student table with search, level filter and sorting

use log::debug;

use super::{describe_error, DeleteModal, LoadState};
use crate::config::ClientOptions;
use crate::signal::Signal;
use crate::students::{Level, SortDirection, Student, StudentClient, StudentPage, StudentQuery};

const LOAD_FAILED: &str = "Failed to load students. Please try again.";
const DELETE_FAILED: &str = "Failed to delete student. Please try again.";

/// Pagination state mirrored from the last page envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
    pub first: bool,
    pub last: bool,
}

impl PageInfo {
    fn initial(size: u32) -> Self {
        Self {
            number: 0,
            total_pages: 0,
            total_elements: 0,
            size,
            first: true,
            last: true,
        }
    }
}

impl From<&StudentPage> for PageInfo {
    fn from(page: &StudentPage) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            size: page.size,
            first: page.first,
            last: page.last,
        }
    }
}

/// Current search, filter and sort selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    pub search_query: String,
    pub level: Option<Level>,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

/// Controller of the student list screen
///
/// Requests are not cancelled when a newer selection supersedes them; a slow
/// response may land after a faster, newer one and overwrite it.
pub struct StudentListView {
    client: StudentClient,
    default_sort_by: String,
    students: Signal<Vec<Student>>,
    state: Signal<LoadState>,
    page_info: Signal<PageInfo>,
    filters: Signal<ListFilters>,
    delete: Signal<DeleteModal>,
}

impl StudentListView {
    pub fn new(client: StudentClient, options: &ClientOptions) -> Self {
        Self {
            client,
            default_sort_by: options.default_sort_by.clone(),
            students: Signal::new(Vec::new()),
            state: Signal::default(),
            page_info: Signal::new(PageInfo::initial(options.default_page_size)),
            filters: Signal::new(ListFilters {
                search_query: String::new(),
                level: None,
                sort_by: options.default_sort_by.clone(),
                sort_direction: SortDirection::Asc,
            }),
            delete: Signal::default(),
        }
    }

    pub fn students(&self) -> Signal<Vec<Student>> {
        self.students.clone()
    }

    pub fn state(&self) -> Signal<LoadState> {
        self.state.clone()
    }

    pub fn page_info(&self) -> Signal<PageInfo> {
        self.page_info.clone()
    }

    pub fn filters(&self) -> Signal<ListFilters> {
        self.filters.clone()
    }

    pub fn delete_modal(&self) -> Signal<DeleteModal> {
        self.delete.clone()
    }

    /// Nothing to show after a finished load
    pub fn is_empty(&self) -> bool {
        !self.state.with(LoadState::is_loading) && self.students.with(|students| students.is_empty())
    }

    fn reset_page(&self) {
        self.page_info.update(|info| info.number = 0);
    }

    /// Fetch the current page with the current selection
    ///
    /// A non-blank search wins over the level filter, which wins over the
    /// plain list.
    pub async fn load(&self) {
        self.state.set(LoadState::Loading);

        let filters = self.filters.get();
        let (page, size) = self.page_info.with(|info| (info.number, info.size));
        let query = StudentQuery::new()
            .page(page)
            .size(size)
            .sort_by(&filters.sort_by)
            .sort_direction(filters.sort_direction);

        let search = filters.search_query.trim();
        let result = if !search.is_empty() {
            self.client.search(search, &query).await
        } else if let Some(level) = filters.level {
            self.client.by_level(level, &query).await
        } else {
            self.client.list(&query).await
        };

        match result {
            Ok(page) => {
                debug!("loaded page {} of {} students", page.number, page.total_elements);
                self.page_info.set(PageInfo::from(&page));
                self.students.set(page.content);
                self.state.set(LoadState::Success);
            }
            Err(err) => self.state.set(LoadState::Error(describe_error(&err, LOAD_FAILED))),
        }
    }

    /// Bind the search box without fetching
    pub fn set_search_query(&self, text: &str) {
        self.filters.update(|filters| filters.search_query = text.to_string());
    }

    /// Run the search; a non-blank query clears the level filter
    pub async fn search(&self) {
        self.filters.update(|filters| {
            if !filters.search_query.trim().is_empty() {
                filters.level = None;
            }
        });
        self.reset_page();
        self.load().await;
    }

    /// Filter by level, clearing any search
    pub async fn select_level(&self, level: Option<Level>) {
        self.filters.update(|filters| {
            filters.level = level;
            filters.search_query.clear();
        });
        self.reset_page();
        self.load().await;
    }

    /// Sort by another field, starting from the first page
    pub async fn set_sort_by(&self, field: &str) {
        self.filters.update(|filters| filters.sort_by = field.to_string());
        self.reset_page();
        self.load().await;
    }

    /// Flip the sort direction, staying on the current page
    pub async fn toggle_sort_direction(&self) {
        self.filters
            .update(|filters| filters.sort_direction = filters.sort_direction.toggled());
        self.load().await;
    }

    pub async fn go_to_page(&self, page: u32) {
        self.page_info.update(|info| info.number = page);
        self.load().await;
    }

    /// Back to the unfiltered list sorted by the default field, ascending
    pub async fn reset_filters(&self) {
        let sort_by = self.default_sort_by.clone();
        self.filters.update(|filters| {
            filters.search_query.clear();
            filters.level = None;
            filters.sort_by = sort_by;
            filters.sort_direction = SortDirection::Asc;
        });
        self.reset_page();
        self.load().await;
    }

    pub fn open_delete(&self, student: Student) {
        self.delete.update(|modal| modal.open_for(student));
    }

    pub fn close_delete(&self) {
        self.delete.update(DeleteModal::close);
    }

    /// Delete the record awaiting confirmation
    ///
    /// Success closes the modal and reloads; failure closes it and shows the
    /// error without reloading.
    pub async fn confirm_delete(&self) {
        let target = self.delete.with(|modal| {
            if modal.in_progress {
                None
            } else {
                modal.target.clone()
            }
        });
        let student = match target {
            Some(student) => student,
            None => return,
        };

        self.delete.update(|modal| modal.in_progress = true);
        let result = self.client.delete(student.id).await;
        self.delete.update(|modal| {
            modal.in_progress = false;
            modal.close();
        });

        match result {
            Ok(()) => self.load().await,
            Err(err) => self.state.set(LoadState::Error(describe_error(&err, DELETE_FAILED))),
        }
    }
}
