use crate::view::SortKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SortBy(SortKey),
    ReverseSort,
    Faster,
    Slower,
    OpenFilterPrompt,
    OpenKillPrompt,
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    None,
}
