/// The indentation of a stack trace line, if none is set.
pub const DEFAULT_INDENT: &str = "    ";
/// The text between the indentation and the frame, if none is set.
pub const DEFAULT_LINE_PREFIX: &str = "at ";

/// The line separator of the platform, used if none is set.
#[cfg(windows)]
pub const DEFAULT_LINE_SEPARATOR: &str = "\r\n";
/// The line separator of the platform, used if none is set.
#[cfg(not(windows))]
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Controls which parts of a method are rendered, and how a stack trace is laid out.
///
/// The default shows everything, with all names qualified, and doesn't limit the number of frames.
///
/// ```
/// use jfr_retrace::RenderOptions;
///
/// let options = RenderOptions::default()
///     .without_packages()
///     .with_max_visible_frames(10);
///
/// assert!(options.show_arguments);
/// assert!(!options.show_arguments_package);
/// assert_eq!(options.indent(), "    ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
	pub show_return_type: bool,
	pub show_return_type_package: bool,
	pub show_declaring_class: bool,
	pub show_declaring_class_package: bool,
	pub show_arguments: bool,
	pub show_arguments_package: bool,
	/// The number of frames rendered before the rest is cut off. `None` renders every frame.
	pub max_visible_frames: Option<usize>,
	pub indent: Option<String>,
	pub line_prefix: Option<String>,
	pub line_separator: Option<String>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		RenderOptions {
			show_return_type: true,
			show_return_type_package: true,
			show_declaring_class: true,
			show_declaring_class_package: true,
			show_arguments: true,
			show_arguments_package: true,
			max_visible_frames: None,
			indent: None,
			line_prefix: None,
			line_separator: None,
		}
	}
}

impl RenderOptions {
	/// Leaves out the package of every class name.
	pub fn without_packages(mut self) -> Self {
		self.show_return_type_package = false;
		self.show_declaring_class_package = false;
		self.show_arguments_package = false;
		self
	}

	pub fn without_return_type(mut self) -> Self {
		self.show_return_type = false;
		self
	}

	pub fn without_declaring_class(mut self) -> Self {
		self.show_declaring_class = false;
		self
	}

	/// Renders `(...)` in place of a non-empty parameter list.
	pub fn without_arguments(mut self) -> Self {
		self.show_arguments = false;
		self
	}

	pub fn with_max_visible_frames(mut self, max_visible_frames: usize) -> Self {
		self.max_visible_frames = Some(max_visible_frames);
		self
	}

	pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
		self.indent = Some(indent.into());
		self
	}

	pub fn with_line_prefix(mut self, line_prefix: impl Into<String>) -> Self {
		self.line_prefix = Some(line_prefix.into());
		self
	}

	pub fn with_line_separator(mut self, line_separator: impl Into<String>) -> Self {
		self.line_separator = Some(line_separator.into());
		self
	}

	pub fn indent(&self) -> &str {
		self.indent.as_deref().unwrap_or(DEFAULT_INDENT)
	}

	pub fn line_prefix(&self) -> &str {
		self.line_prefix.as_deref().unwrap_or(DEFAULT_LINE_PREFIX)
	}

	pub fn line_separator(&self) -> &str {
		self.line_separator.as_deref().unwrap_or(DEFAULT_LINE_SEPARATOR)
	}
}
