//! Markdown-to-block conversion.
//!
//! Deliberately not a CommonMark parser: each line is classified by an
//! ordered list of prefix/content rules, first match wins. The only state
//! carried across lines is the code-fence machine ([`FenceState`]).
//!
//! Inline formatting removal is a single non-recursive substitution pass;
//! nested or overlapping emphasis is not unwound. Accepted lossy behavior.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, DEFAULT_CODE_LANGUAGE, HeadingLevel, MAX_TEXT_LEN};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());

/// Lines containing any of these markers become callout blocks.
const CALLOUT_KEYWORDS: [&str; 5] = ["**重要", "**学び", "**注意", "**効果", "**理由"];

/// Parse state carried across lines: outside a fence, or accumulating the
/// body of an open one.
enum FenceState {
	Normal,
	InCodeBlock { language: String, lines: Vec<String> },
}

/// Convert one markdown document into an ordered block sequence.
///
/// An unterminated trailing fence drops its buffered lines, matching the
/// behavior existing documents were uploaded with.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
	let mut blocks = Vec::new();
	let mut state = FenceState::Normal;

	for line in markdown.lines() {
		// Fence toggle is checked before everything else so a closing fence
		// is never swallowed as code-block content.
		if line.starts_with("```") {
			state = match std::mem::replace(&mut state, FenceState::Normal) {
				FenceState::Normal => {
					let annotation = line[3..].trim();
					let language = if annotation.is_empty() { DEFAULT_CODE_LANGUAGE.to_string() } else { annotation.to_string() };
					FenceState::InCodeBlock { language, lines: Vec::new() }
				}
				FenceState::InCodeBlock { language, lines } => {
					blocks.push(Block::CodeBlock { text: lines.join("\n"), language });
					FenceState::Normal
				}
			};
			continue;
		}

		if let FenceState::InCodeBlock { lines, .. } = &mut state {
			lines.push(line.to_string());
			continue;
		}

		if let Some(block) = classify_line(line) {
			blocks.push(block);
		}
	}

	blocks
}

/// Classify one line outside a code fence. Rules are checked top to bottom,
/// first match wins. Returns None for lines that emit nothing (blank lines,
/// table separator rows).
fn classify_line(line: &str) -> Option<Block> {
	// Table separator rows are consumed silently; tables are flattened to
	// bullets rather than reconstructed.
	if line.starts_with('|') && line.contains("---") {
		return None;
	}

	// Table data row: cells joined into one bullet.
	if line.starts_with('|') {
		let cells: Vec<&str> = line.split('|').map(str::trim).filter(|cell| !cell.is_empty()).collect();
		if cells.is_empty() {
			return None;
		}
		return Some(Block::BulletedItem { text: cells.join(" | ") });
	}

	if line.trim().is_empty() {
		return None;
	}

	if let Some(rest) = line.strip_prefix("# ") {
		return Some(Block::Heading {
			level: HeadingLevel::One,
			text: rest.to_string(),
		});
	}
	if let Some(rest) = line.strip_prefix("## ") {
		return Some(Block::Heading {
			level: HeadingLevel::Two,
			text: rest.to_string(),
		});
	}
	if let Some(rest) = line.strip_prefix("### ") {
		return Some(Block::Heading {
			level: HeadingLevel::Three,
			text: rest.to_string(),
		});
	}
	// #### folds into Notion's deepest native heading; existing documents
	// depend on this output.
	if let Some(rest) = line.strip_prefix("#### ") {
		return Some(Block::Heading {
			level: HeadingLevel::Three,
			text: rest.to_string(),
		});
	}

	if line.starts_with("- ") || line.starts_with("* ") {
		let text = truncate_text(&strip_inline_formatting(line[2..].trim()));
		return Some(Block::BulletedItem { text });
	}

	// Unreachable under the rule order: the bullet rule above already matches
	// checkbox syntax, so `- [x] foo` comes out as a bullet with the literal
	// `[x]` kept. `checkbox_lines_emit_bullets` pins this.
	if let Some(rest) = line.strip_prefix("- [ ] ") {
		return Some(Block::CheckboxItem {
			text: truncate_text(rest.trim()),
			checked: false,
		});
	}
	if let Some(rest) = line.strip_prefix("- [x] ") {
		return Some(Block::CheckboxItem {
			text: truncate_text(rest.trim()),
			checked: true,
		});
	}

	if line.starts_with("---") {
		return Some(Block::Divider);
	}

	if CALLOUT_KEYWORDS.iter().any(|keyword| line.contains(keyword)) {
		return Some(Block::Callout {
			text: truncate_text(&strip_emphasis(line)),
		});
	}

	Some(Block::Paragraph {
		text: truncate_text(&strip_inline_formatting(line)),
	})
}

/// Single-pass removal of bold/italic/inline-code/link markers.
fn strip_inline_formatting(s: &str) -> String {
	let s = strip_emphasis(s);
	LINK.replace_all(&s, "$1").into_owned()
}

/// Like [`strip_inline_formatting`] but leaves links alone (callout path).
fn strip_emphasis(s: &str) -> String {
	let s = BOLD.replace_all(s, "$1");
	let s = ITALIC.replace_all(&s, "$1");
	INLINE_CODE.replace_all(&s, "$1").into_owned()
}

/// Truncate on a char boundary to the Notion per-text limit.
fn truncate_text(s: &str) -> String {
	match s.char_indices().nth(MAX_TEXT_LEN) {
		Some((idx, _)) => s[..idx].to_string(),
		None => s.to_string(),
	}
}
