use crate::domain::grant::Grant;
use serde::Serialize;
use std::ops::Range;

/// Number of grants shown per page of the grants table.
pub const PAGE_SIZE: usize = 5;

/// Enabled/hidden state of a navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ButtonState {
    pub enabled: bool,
    pub hidden: bool,
}

impl ButtonState {
    pub const DISABLED: Self = Self::new(false, false);
    pub const ENABLED: Self = Self::new(true, false);
    /// Disabled and hidden: the last page has been reached.
    pub const EXHAUSTED: Self = Self::new(false, true);
    /// Enabled but hidden: back on the first page.
    pub const PARKED: Self = Self::new(true, true);

    pub const fn new(enabled: bool, hidden: bool) -> Self {
        Self { enabled, hidden }
    }
}

/// Snapshot of the grants table: the visible slice plus the controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageWindow {
    pub visible: Vec<Grant>,
    pub page: usize,
    pub prev: ButtonState,
    pub next: ButtonState,
}

/// Fixed-size paging over the grants of the selected role.
///
/// `next` slices with the page number *before* incrementing it and
/// `previous` slices with the page number *after* decrementing it, so the two
/// directions do not mirror each other. Stepping back onto page 1 shows
/// `[1, 6)`. Every bound is clamped to the grant count.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantsPaginator {
    page: usize,
    grants: Option<Vec<Grant>>,
    visible: Range<usize>,
    prev: ButtonState,
    next: ButtonState,
}

impl Default for GrantsPaginator {
    fn default() -> Self {
        Self {
            page: 1,
            grants: None,
            visible: 0..0,
            prev: ButtonState::DISABLED,
            next: ButtonState::DISABLED,
        }
    }
}

impl GrantsPaginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts paging over a newly selected role's grants.
    pub fn select_role(&mut self, grants: Option<&[Grant]>) -> PageWindow {
        self.page = 1;
        self.grants = grants.map(<[Grant]>::to_vec);
        match self.total() {
            Some(total) if total > PAGE_SIZE => {
                self.visible = 0..PAGE_SIZE;
                self.next = ButtonState::ENABLED;
                self.prev = ButtonState::EXHAUSTED;
            }
            Some(total) => {
                self.visible = 0..total;
                self.next = ButtonState::DISABLED;
                self.prev = ButtonState::DISABLED;
            }
            None => {
                self.visible = 0..0;
                self.next = ButtonState::DISABLED;
                self.prev = ButtonState::DISABLED;
            }
        }
        self.window()
    }

    /// Steps one page forward. A no-op while the next button is disabled.
    pub fn next(&mut self) -> PageWindow {
        let Some(total) = self.total() else {
            return self.window();
        };
        if !self.next.enabled {
            return self.window();
        }
        let start = self.page * PAGE_SIZE;
        if start + PAGE_SIZE <= total {
            self.visible = start..start + PAGE_SIZE;
            self.next = ButtonState::ENABLED;
        } else {
            self.visible = clamp(start..total, total);
            self.next = ButtonState::EXHAUSTED;
        }
        self.page += 1;
        self.prev = ButtonState::ENABLED;
        self.window()
    }

    /// Steps one page back. A no-op on page 1 or without grants.
    pub fn previous(&mut self) -> PageWindow {
        let Some(total) = self.total() else {
            return self.window();
        };
        if self.page <= 1 {
            return self.window();
        }
        self.page -= 1;
        let start = self.page * PAGE_SIZE;
        self.visible = clamp(start..start + PAGE_SIZE, total);
        if self.page == 1 {
            self.visible = clamp(self.page..self.page + PAGE_SIZE, total);
            self.prev = ButtonState::PARKED;
        }
        if total > PAGE_SIZE {
            self.next = ButtonState::ENABLED;
        }
        self.window()
    }

    /// Forgets the current role's grants.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_grants(&self) -> bool {
        self.grants.is_some()
    }

    /// Visible grants of the current page.
    pub fn visible(&self) -> &[Grant] {
        self.grants
            .as_deref()
            .and_then(|grants| grants.get(self.visible.clone()))
            .unwrap_or(&[])
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            visible: self.visible().to_vec(),
            page: self.page,
            prev: self.prev,
            next: self.next,
        }
    }

    fn total(&self) -> Option<usize> {
        self.grants.as_ref().map(Vec::len)
    }
}

fn clamp(range: Range<usize>, total: usize) -> Range<usize> {
    let end = range.end.min(total);
    range.start.min(end)..end
}
