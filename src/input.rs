//! Single-line text prompt for axis values and curve names.

/// What the prompt text will be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The "x, y" value of a just-placed axis.
    AxisValue {
        /// Index the axis gets once its value is in.
        axis_index: usize,
    },
    /// A new name for a curve.
    CurveName {
        /// Curve being renamed.
        curve_id: usize,
    },
}

/// Line-editing state of the popup prompt.
#[derive(Debug, Default)]
pub struct TextPrompt {
    kind: Option<PromptKind>,
    buffer: String,
    error: Option<String>,
}

impl TextPrompt {
    /// Create an inactive prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the prompt is open.
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Target of the open prompt.
    pub fn kind(&self) -> Option<PromptKind> {
        self.kind
    }

    /// True while an axis value is being entered.
    pub fn is_axis_value(&self) -> bool {
        matches!(self.kind, Some(PromptKind::AxisValue { .. }))
    }

    /// Open the prompt for an axis value.
    pub fn start_axis(&mut self, axis_index: usize) {
        self.open(PromptKind::AxisValue { axis_index }, "");
    }

    /// Open the prompt to rename a curve, starting from its current name.
    pub fn start_rename(&mut self, curve_id: usize, current: &str) {
        self.open(PromptKind::CurveName { curve_id }, current);
    }

    fn open(&mut self, kind: PromptKind, text: &str) {
        self.kind = Some(kind);
        self.buffer.clear();
        self.buffer.push_str(text);
        self.error = None;
    }

    /// Add a character.
    ///
    /// Axis values take only characters that can appear in a number pair;
    /// names take anything printable.
    pub fn input(&mut self, c: char) {
        let accepted = match self.kind {
            Some(PromptKind::AxisValue { .. }) => {
                c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E' | ',' | ' ')
            },
            Some(PromptKind::CurveName { .. }) => !c.is_control(),
            None => false,
        };
        if accepted {
            self.buffer.push(c);
        }
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Text entered so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Last rejection message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Keep the prompt open and show why the text was refused.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Close the prompt.
    pub fn close(&mut self) {
        self.kind = None;
        self.buffer.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_non_numeric_input() {
        let mut prompt = TextPrompt::new();
        prompt.start_axis(1);
        for c in "1a.5, x-2".chars() {
            prompt.input(c);
        }
        assert_eq!(prompt.buffer(), "1.5, -2");
        prompt.backspace();
        assert_eq!(prompt.buffer(), "1.5, -");
    }

    #[test]
    fn rename_starts_from_current_name() {
        let mut prompt = TextPrompt::new();
        prompt.start_rename(2, "Curve2");
        assert_eq!(prompt.kind(), Some(PromptKind::CurveName { curve_id: 2 }));
        assert!(!prompt.is_axis_value());
        for c in " (dry)\t".chars() {
            prompt.input(c);
        }
        assert_eq!(prompt.buffer(), "Curve2 (dry)");
    }

    #[test]
    fn closed_prompt_ignores_input() {
        let mut prompt = TextPrompt::new();
        prompt.input('1');
        assert_eq!(prompt.buffer(), "");
    }

    #[test]
    fn reject_keeps_prompt_open() {
        let mut prompt = TextPrompt::new();
        prompt.start_axis(2);
        prompt.reject("collinear");
        assert!(prompt.is_active());
        assert_eq!(prompt.error(), Some("collinear"));
        prompt.close();
        assert!(!prompt.is_active());
        assert!(prompt.error().is_none());
    }
}
