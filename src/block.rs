//! Notion block model.
//!
//! Pure data types for the units of content Notion renders, plus the JSON
//! wire form the append-children endpoint expects. No I/O dependencies.

use serde_json::{Value, json};

/// Notion caps rich_text content at 2000 characters per text object.
pub const MAX_TEXT_LEN: usize = 2000;

/// Language tag used when a code fence carries no annotation.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Emoji attached to every callout block.
pub const CALLOUT_ICON: &str = "💡";

/// Heading depth. Notion has no native heading deeper than 3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeadingLevel {
	One,
	Two,
	Three,
}

impl HeadingLevel {
	fn type_name(self) -> &'static str {
		match self {
			HeadingLevel::One => "heading_1",
			HeadingLevel::Two => "heading_2",
			HeadingLevel::Three => "heading_3",
		}
	}
}

/// One structured unit of content sent to Notion.
///
/// Built once by the converter from one or more consecutive source lines,
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
	Paragraph { text: String },
	Heading { level: HeadingLevel, text: String },
	BulletedItem { text: String },
	CheckboxItem { text: String, checked: bool },
	Divider,
	Callout { text: String },
	CodeBlock { text: String, language: String },
}

impl Block {
	/// Serialize to one element of the `children` array of an
	/// append-children request.
	pub fn to_json(&self) -> Value {
		match self {
			Block::Paragraph { text } => json!({
				"object": "block",
				"type": "paragraph",
				"paragraph": { "rich_text": rich_text(text) },
			}),
			Block::Heading { level, text } => json!({
				"object": "block",
				"type": level.type_name(),
				(level.type_name()): { "rich_text": rich_text(text) },
			}),
			Block::BulletedItem { text } => json!({
				"object": "block",
				"type": "bulleted_list_item",
				"bulleted_list_item": { "rich_text": rich_text(text) },
			}),
			Block::CheckboxItem { text, checked } => json!({
				"object": "block",
				"type": "to_do",
				"to_do": { "rich_text": rich_text(text), "checked": checked },
			}),
			Block::Divider => json!({
				"object": "block",
				"type": "divider",
				"divider": {},
			}),
			Block::Callout { text } => json!({
				"object": "block",
				"type": "callout",
				"callout": { "rich_text": rich_text(text), "icon": { "emoji": CALLOUT_ICON } },
			}),
			Block::CodeBlock { text, language } => json!({
				"object": "block",
				"type": "code",
				"code": { "rich_text": rich_text(text), "language": language },
			}),
		}
	}
}

/// Notion rich_text array with a single plain-text entry.
fn rich_text(content: &str) -> Value {
	json!([{ "type": "text", "text": { "content": content } }])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paragraph_wire_form() {
		let json = Block::Paragraph { text: "hello".into() }.to_json();
		assert_eq!(json["object"], "block");
		assert_eq!(json["type"], "paragraph");
		assert_eq!(json["paragraph"]["rich_text"][0]["type"], "text");
		assert_eq!(json["paragraph"]["rich_text"][0]["text"]["content"], "hello");
	}

	#[test]
	fn heading_wire_form_uses_leveled_type_name() {
		let json = Block::Heading {
			level: HeadingLevel::Two,
			text: "Section".into(),
		}
		.to_json();
		assert_eq!(json["type"], "heading_2");
		assert_eq!(json["heading_2"]["rich_text"][0]["text"]["content"], "Section");
		// the payload key matches the discriminator, nothing else leaks in
		assert!(json.get("heading_1").is_none());
	}

	#[test]
	fn checkbox_wire_form_carries_checked() {
		let json = Block::CheckboxItem { text: "task".into(), checked: true }.to_json();
		assert_eq!(json["type"], "to_do");
		assert_eq!(json["to_do"]["checked"], true);
	}

	#[test]
	fn divider_wire_form_has_empty_payload() {
		let json = Block::Divider.to_json();
		assert_eq!(json["type"], "divider");
		assert_eq!(json["divider"], serde_json::json!({}));
	}

	#[test]
	fn callout_wire_form_has_icon() {
		let json = Block::Callout { text: "note".into() }.to_json();
		assert_eq!(json["callout"]["icon"]["emoji"], CALLOUT_ICON);
	}

	#[test]
	fn code_wire_form_carries_language() {
		let json = Block::CodeBlock {
			text: "fn main() {}".into(),
			language: "rust".into(),
		}
		.to_json();
		assert_eq!(json["type"], "code");
		assert_eq!(json["code"]["language"], "rust");
		assert_eq!(json["code"]["rich_text"][0]["text"]["content"], "fn main() {}");
	}
}
