mod editor;
mod shell;
pub mod ui;

pub(crate) use editor::{EditorHeading, FilterSelect, FormActions, ListPlaceholder, RowActions};
pub(crate) use shell::{NoticeHost, SessionGuard};
