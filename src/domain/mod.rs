// Domain layer: roles, grants and the pure screen state (selection, paging)
pub mod grant;
pub mod pagination;
pub mod role;
pub mod selection;
pub mod token;
