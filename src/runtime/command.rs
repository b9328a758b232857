use crate::section::SectionId;
use crate::state::text_edit::TextEdit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    /// Scroll by whole rows; negative is up.
    Scroll(i32),
    /// Scroll by whole screens; negative is up.
    ScrollPage(i32),
    ScrollHome,
    ScrollEnd,
    JumpTo(SectionId),
    /// Enter: submits while editing, follows the hero call to action
    /// otherwise.
    Activate,
    NextFocus,
    PrevFocus,
    ClearFocus,
    ResetForm,
    CarouselPrev,
    CarouselNext,
    Edit(TextEdit),
    DismissToast,
    Tick,
    Noop,
}
