//! Page script registration collaborator.

/// Placement hint for a registered script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPosition {
    Head,
    Body,
}

/// Records script URLs for emission into the outgoing page markup.
/// Registration order is preserved; the lookup runtime must be registered
/// before the dictionary script that depends on its namespace.
pub trait ScriptRegistry {
    fn register(&mut self, url: &str, position: ScriptPosition);
}

/// Vec-backed registry that renders `<script>` tags per section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScriptRegistry {
    head: Vec<String>,
    body: Vec<String>,
}

impl PageScriptRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs registered for the head section, in registration order.
    #[must_use]
    pub fn head_scripts(&self) -> &[String] {
        &self.head
    }

    /// URLs registered for the body section, in registration order.
    #[must_use]
    pub fn body_scripts(&self) -> &[String] {
        &self.body
    }

    /// Render the head-section script tags.
    #[must_use]
    pub fn render_head(&self) -> String {
        self.head
            .iter()
            .map(|url| format!("<script type=\"text/javascript\" src=\"{url}\"></script>"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ScriptRegistry for PageScriptRegistry {
    fn register(&mut self, url: &str, position: ScriptPosition) {
        match position {
            ScriptPosition::Head => self.head.push(url.to_string()),
            ScriptPosition::Body => self.body.push(url.to_string()),
        }
    }
}
