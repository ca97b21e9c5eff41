use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

/// Shows the modal state next to the prompt so an open form is never forgotten.
pub(crate) struct DeskPrompt {
    pub(crate) modal: String,
}

impl Prompt for DeskPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        match self.modal.is_empty() {
            true => "desk$ ".into(),
            false => format!("desk [{}]$ ", self.modal).into(),
        }
    }

    fn render_prompt_right(&self) -> Cow<str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _: PromptEditMode) -> Cow<str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(&self, _: PromptHistorySearch) -> Cow<str> {
        "".into()
    }
}
