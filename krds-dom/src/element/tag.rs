use std::fmt;

/// Element kind. Only the tags that matter for focus and activation are
/// spelled out; everything else goes through `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    #[default]
    Div,
    Span,
    A,
    Button,
    Input,
    Select,
    Textarea,
    Other(String),
}

impl Tag {
    /// Form controls honour the `disabled` flag.
    pub fn is_form_control(&self) -> bool {
        matches!(self, Tag::Button | Tag::Input | Tag::Select | Tag::Textarea)
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Button => "button",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::Textarea => "textarea",
            Tag::Other(name) => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "body" => Tag::Body,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "a" => Tag::A,
            "button" => Tag::Button,
            "input" => Tag::Input,
            "select" => Tag::Select,
            "textarea" => Tag::Textarea,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
