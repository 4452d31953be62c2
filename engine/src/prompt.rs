/// The user supplied prompt and the optional modifiers that get appended to it.
///
/// Empty modifiers are treated exactly like missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptParts {
    pub prompt: String,
    pub tag: Option<String>,
    pub style: Option<String>,
    pub mood: Option<String>,
    pub negative: Option<String>,
}

impl PromptParts {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.prompt.trim().is_empty()
    }

    /// Builds the text that is sent to the image service.
    ///
    /// Order is fixed: prompt, tag, style, mood, then the negative prompt marker.
    pub fn assemble(&self) -> String {
        let mut out = self.prompt.clone();
        for modifier in [&self.tag, &self.style, &self.mood]
            .into_iter()
            .filter_map(non_empty)
        {
            out.push(' ');
            out.push_str(modifier);
        }
        if let Some(negative) = non_empty(&self.negative) {
            out.push_str(" [negative prompt: ");
            out.push_str(negative);
            out.push(']');
        }
        out
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}
