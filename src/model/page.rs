use super::blocks::Icon;

/// The slice of a page object the converter needs: its title and icon.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMetadata {
    /// Concatenated plain text of the page's title property, untrimmed.
    pub title: String,
    pub icon: Option<Icon>,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon = Some(Icon::Emoji(emoji.into()));
        self
    }
}
