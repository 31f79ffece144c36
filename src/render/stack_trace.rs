use crate::render::{MethodRef, Renderer};
use crate::render::options::RenderOptions;
use crate::render::signature::UNAVAILABLE;

/// Stands in for the frames left out of a stack trace.
pub const TRUNCATION_MARKER: &str = "...";

impl Renderer {
	/// Renders frames in the given order, one line per frame.
	///
	/// Each line is `indent + line_prefix + method + line_separator`. Once [`RenderOptions::max_visible_frames`] lines
	/// are written and frames remain, a single `indent + "..." + line_separator` line ends the trace. Frames whose
	/// descriptor can't be decoded show up as [`UNAVAILABLE`].
	///
	/// ```
	/// use jfr_retrace::{MethodRef, Renderer, RenderOptions};
	///
	/// let frames = [
	///     MethodRef::new("Main", "run", "()V"),
	///     MethodRef::new("Main", "main", "([Ljava/lang/String;)V"),
	/// ];
	/// let options = RenderOptions::default()
	///     .without_packages()
	///     .with_line_separator("\n");
	///
	/// assert_eq!(
	///     Renderer::without_mappings().render_stack_trace(&frames, &options),
	///     "    at void Main.run()\n    at void Main.main(String[])\n"
	/// );
	/// ```
	pub fn render_stack_trace(&self, frames: &[MethodRef], options: &RenderOptions) -> String {
		let indent = options.indent();
		let line_prefix = options.line_prefix();
		let line_separator = options.line_separator();

		let mut s = String::new();
		for (index, frame) in frames.iter().enumerate() {
			if options.max_visible_frames == Some(index) {
				s.push_str(indent);
				s.push_str(TRUNCATION_MARKER);
				s.push_str(line_separator);
				break;
			}

			let text = self.render_method(frame, options);

			s.push_str(indent);
			s.push_str(line_prefix);
			s.push_str(text.as_deref().unwrap_or(UNAVAILABLE));
			s.push_str(line_separator);
		}
		s
	}
}
