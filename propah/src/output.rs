use std::fmt;

pub const DEFAULT_BASENAME: &str = "profile";
pub const DEFAULT_FORMAT: &str = "png";

const POSTSCRIPT_TERMINAL: &str = "postscript";
const POSTSCRIPT_EXTENSION: &str = "ps";
const POSTSCRIPT_ENHANCED: &str = "postscript enhanced color";

/// Longest basename kept (characters).
pub const MAX_BASENAME: usize = 254;

/// Longest extension and terminal kept (characters).
pub const MAX_FORMAT: usize = 10;

/// Where and how a rendered profile is written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutputDescriptor {
    /// File name without extension.
    pub basename: String,

    /// Lowercase file extension.
    pub extension: String,

    /// Renderer output format, as the user spelled it.
    pub terminal: String,
}

impl Default for OutputDescriptor {
    fn default() -> Self {
        Self {
            basename: DEFAULT_BASENAME.to_owned(),
            extension: DEFAULT_FORMAT.to_owned(),
            terminal: DEFAULT_FORMAT.to_owned(),
        }
    }
}

impl OutputDescriptor {
    /// Resolves a user supplied output name.
    ///
    /// An empty name, or one starting with `.`, selects the defaults.
    /// Otherwise the text after the last `.` names both the extension
    /// and the renderer terminal, falling back to png when there is
    /// none. `ps` and `postscript` are interchangeable. Overlong parts
    /// are truncated.
    pub fn resolve(name: &str) -> Self {
        if name.is_empty() || name.starts_with('.') {
            return Self::default();
        }

        let (basename, format) = match name.rfind('.').filter(|&idx| idx > 0) {
            Some(idx) => (&name[..idx], &name[idx + 1..]),
            None => (name, ""),
        };

        let mut descriptor = Self {
            basename: basename.chars().take(MAX_BASENAME).collect(),
            extension: format
                .chars()
                .take(MAX_FORMAT)
                .map(|c| c.to_ascii_lowercase())
                .collect(),
            terminal: format.chars().take(MAX_FORMAT).collect(),
        };

        if descriptor.extension.is_empty() {
            descriptor.extension = DEFAULT_FORMAT.to_owned();
            descriptor.terminal = DEFAULT_FORMAT.to_owned();
        }

        if descriptor.terminal == POSTSCRIPT_TERMINAL {
            descriptor.extension = POSTSCRIPT_EXTENSION.to_owned();
        } else if descriptor.extension == POSTSCRIPT_EXTENSION {
            descriptor.terminal = POSTSCRIPT_ENHANCED.to_owned();
        }

        descriptor
    }

    /// Returns `basename.extension`.
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.basename, self.extension)
    }
}
