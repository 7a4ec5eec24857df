//! Core block types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a block inside a [`BlockStore`](super::BlockStore).
///
/// Keys are lookup handles, never ownership edges: parent and sibling links
/// hold keys and resolve them through the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&BlockKey> for BlockKey {
    fn from(key: &BlockKey) -> Self {
        key.clone()
    }
}

/// ATX heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Level from its number, `None` outside `1..=6`.
    pub const fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }
}

/// Structural kind of a block.
///
/// Serialized with the short tag names the renderer uses (`p`, `h2`, `li`,
/// `pre`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    Heading(HeadingLevel),
    ListItem,
    OrderedList,
    UnorderedList,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    Figure,
    Table,
    /// Raw HTML kept as an opaque block.
    Html,
    /// Inline line container holding the text of its parent block.
    Span,
    /// Code element inside a code block.
    Code,
}

impl BlockType {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading(HeadingLevel::H1) => "h1",
            Self::Heading(HeadingLevel::H2) => "h2",
            Self::Heading(HeadingLevel::H3) => "h3",
            Self::Heading(HeadingLevel::H4) => "h4",
            Self::Heading(HeadingLevel::H5) => "h5",
            Self::Heading(HeadingLevel::H6) => "h6",
            Self::ListItem => "li",
            Self::OrderedList => "ol",
            Self::UnorderedList => "ul",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "pre",
            Self::HorizontalRule => "hr",
            Self::Figure => "figure",
            Self::Table => "table",
            Self::Html => "html",
            Self::Span => "span",
            Self::Code => "code",
        }
    }

    /// Blocks that can move on their own once they sit at container level.
    pub const fn is_content_level(self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading(_)
                | Self::HorizontalRule
                | Self::Blockquote
                | Self::CodeBlock
                | Self::Figure
        )
    }

    pub const fn is_list(self) -> bool {
        matches!(self, Self::OrderedList | Self::UnorderedList)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for an unrecognized block tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown block type `{0}`")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "p" => Self::Paragraph,
            "li" => Self::ListItem,
            "ol" => Self::OrderedList,
            "ul" => Self::UnorderedList,
            "blockquote" => Self::Blockquote,
            "pre" => Self::CodeBlock,
            "hr" => Self::HorizontalRule,
            "figure" => Self::Figure,
            "table" => Self::Table,
            "html" => Self::Html,
            "span" => Self::Span,
            "code" => Self::Code,
            _ => {
                let level = s
                    .strip_prefix('h')
                    .and_then(|n| n.parse::<u8>().ok())
                    .and_then(HeadingLevel::from_number)
                    .ok_or_else(|| UnknownBlockType(s.to_string()))?;
                Self::Heading(level)
            }
        };
        Ok(ty)
    }
}

impl TryFrom<String> for BlockType {
    type Error = UnknownBlockType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockType> for String {
    fn from(ty: BlockType) -> Self {
        ty.tag().to_string()
    }
}

/// Role of a leaf block within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionType {
    ParagraphContent,
    AtxLine,
    CodeContent,
    LanguageInput,
    Frontmatter,
    CellContent,
}

/// A node in the document tree.
///
/// Fields are read-only outside the `document` module; order and text only
/// change through [`BlockStore`](super::BlockStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub(super) key: BlockKey,
    #[serde(rename = "type")]
    pub(super) block_type: BlockType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) function_type: Option<FunctionType>,
    pub(super) text: String,
    pub(super) children: Vec<BlockKey>,
    pub(super) parent: Option<BlockKey>,
    pub(super) pre_sibling: Option<BlockKey>,
    pub(super) next_sibling: Option<BlockKey>,
    pub(super) editable: bool,
}

impl Block {
    pub const fn key(&self) -> &BlockKey {
        &self.key
    }

    pub const fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub const fn function_type(&self) -> Option<FunctionType> {
        self.function_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[BlockKey] {
        &self.children
    }

    pub const fn parent(&self) -> Option<&BlockKey> {
        self.parent.as_ref()
    }

    pub const fn pre_sibling(&self) -> Option<&BlockKey> {
        self.pre_sibling.as_ref()
    }

    pub const fn next_sibling(&self) -> Option<&BlockKey> {
        self.next_sibling.as_ref()
    }

    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// Whether this block holds the source of a code block.
    ///
    /// Markdown emphasis delimiters must not be inserted here.
    pub fn is_code_content(&self) -> bool {
        self.function_type == Some(FunctionType::CodeContent) || self.block_type == BlockType::Code
    }
}
