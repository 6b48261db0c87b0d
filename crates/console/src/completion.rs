//! Completion results handed back to the console shell.

bitflags::bitflags! {
	/// How the shell should treat a completion option.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CompletionOptionFlags: u8 {
		/// The option is a prefix of longer candidates, not a full match.
		const PARTIAL_COMPLETION = 1 << 0;
	}
}

/// One suggested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOption {
	pub value: String,
	/// Human-readable label shown next to the value.
	pub hint: Option<String>,
	pub flags: CompletionOptionFlags,
}

impl CompletionOption {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			hint: None,
			flags: CompletionOptionFlags::empty(),
		}
	}

	/// A partial-completion option, the form every path candidate takes.
	pub fn partial(value: impl Into<String>) -> Self {
		Self::new(value).with_flags(CompletionOptionFlags::PARTIAL_COMPLETION)
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.hint = Some(hint.into());
		self
	}

	pub fn with_flags(mut self, flags: CompletionOptionFlags) -> Self {
		self.flags = flags;
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResult {
	pub options: Vec<CompletionOption>,
}

impl CompletionResult {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn from_options(options: impl IntoIterator<Item = CompletionOption>) -> Self {
		Self {
			options: options.into_iter().collect(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	/// Suggested values, in order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.options.iter().map(|o| o.value.as_str())
	}
}
