pub(crate) mod group;
pub use group::ProgramGroup;

pub(crate) mod handle;
pub use handle::{GroupHandle, ItemHandle};

pub(crate) mod item;
pub use item::{InvalidItem, ItemCommand, ItemCommandError, ItemTitle, ItemTitleError, ProgramItem};

pub(crate) mod theme;
pub use theme::Theme;
