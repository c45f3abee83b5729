//! Configuration for the parser.  Options are passed per parse call and
//! never held in global state.

/// Umbrella options struct.
///
/// The default enables every extension, matching what most documents
/// expect:
///
/// ```rust
/// use minimark::{parse_document, Arena, Options};
///
/// let arena = Arena::new();
/// let root = parse_document(&arena, "| a |\n|---|\n| b |\n", &Options::default());
/// assert!(root.first_child().is_some());
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Select which syntax extensions are recognized.
    pub extension: ExtensionOptions,
}

impl Options {
    /// Options with every extension enabled.  Same as `Options::default()`.
    pub fn all() -> Self {
        Options {
            extension: ExtensionOptions::all(),
        }
    }

    /// Options with every extension disabled.
    pub fn none() -> Self {
        Options {
            extension: ExtensionOptions::none(),
        }
    }
}

/// Options to select extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionOptions {
    /// Recognizes pipe-delimited tables.
    ///
    /// ```rust
    /// use minimark::nodes::NodeValue;
    /// use minimark::{parse_document, Arena, Options};
    ///
    /// let arena = Arena::new();
    /// let root = parse_document(&arena, "| a |\n|---|\n| b |\n", &Options::default());
    /// let table = root.first_child().unwrap();
    /// assert!(matches!(table.data.borrow().value, NodeValue::Table));
    /// ```
    pub tables: bool,

    /// Recognizes a `---`-delimited metadata block of `key: value` lines at
    /// the very start of the document.
    ///
    /// ```rust
    /// use minimark::nodes::metadata_value;
    /// use minimark::{parse_document, Arena, Options};
    ///
    /// let arena = Arena::new();
    /// let root = parse_document(&arena, "---\ntitle: Hi\n---\n", &Options::default());
    /// assert_eq!(metadata_value(root, "title").as_deref(), Some("Hi"));
    /// ```
    pub metadata: bool,
}

impl ExtensionOptions {
    /// Every extension enabled.
    pub fn all() -> Self {
        ExtensionOptions {
            tables: true,
            metadata: true,
        }
    }

    /// Every extension disabled.
    pub fn none() -> Self {
        ExtensionOptions {
            tables: false,
            metadata: false,
        }
    }
}

impl Default for ExtensionOptions {
    fn default() -> Self {
        ExtensionOptions::all()
    }
}
