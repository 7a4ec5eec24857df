//! Nested block descriptions and their conversion to and from a store.

use serde::{Deserialize, Serialize};

use super::{Block, BlockKey, BlockStore, BlockType, FunctionType, HeadingLevel};

/// Owned, nested description of a block and its descendants.
///
/// This is the shape a parser hands over when a document loads, and the
/// shape [`BlockStore::to_trees`] produces for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTree {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_type: Option<FunctionType>,
    #[serde(default = "editable_default", skip_serializing_if = "is_editable")]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockTree>,
}

const fn editable_default() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_editable(editable: &bool) -> bool {
    *editable
}

impl BlockTree {
    pub const fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            text: String::new(),
            function_type: None,
            editable: true,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_function_type(mut self, function_type: FunctionType) -> Self {
        self.function_type = Some(function_type);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn non_editable(mut self) -> Self {
        self.editable = false;
        self
    }

    /// A text line as the renderer nests it inside content blocks.
    pub fn line(text: impl Into<String>, function_type: FunctionType) -> Self {
        Self::new(BlockType::Span)
            .with_text(text)
            .with_function_type(function_type)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockType::Paragraph)
            .with_children(vec![Self::line(text, FunctionType::ParagraphContent)])
    }

    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::new(BlockType::Heading(level))
            .with_children(vec![Self::line(text, FunctionType::AtxLine)])
    }

    pub fn list_item(children: Vec<Self>) -> Self {
        Self::new(BlockType::ListItem).with_children(children)
    }

    pub fn bullet_list(items: Vec<Self>) -> Self {
        Self::new(BlockType::UnorderedList).with_children(items)
    }

    pub fn ordered_list(items: Vec<Self>) -> Self {
        Self::new(BlockType::OrderedList).with_children(items)
    }

    pub fn blockquote(children: Vec<Self>) -> Self {
        Self::new(BlockType::Blockquote).with_children(children)
    }

    pub fn thematic_break() -> Self {
        Self::new(BlockType::HorizontalRule)
    }

    /// `pre > code > span` holding the code as a single line block.
    pub fn code_block(code: impl Into<String>) -> Self {
        Self::new(BlockType::CodeBlock).with_children(vec![
            Self::new(BlockType::Code)
                .with_children(vec![Self::line(code, FunctionType::CodeContent)]),
        ])
    }

    /// Front matter is a code block the user cannot move or edit in place.
    pub fn front_matter(source: impl Into<String>) -> Self {
        Self::code_block(source)
            .with_function_type(FunctionType::Frontmatter)
            .non_editable()
    }
}

impl BlockStore {
    /// Build a store from top-level block descriptions.
    ///
    /// Keys are assigned in document order.
    pub fn from_trees(trees: Vec<BlockTree>) -> Self {
        let mut store = Self::new();
        store.roots = store.insert_sequence(trees, None);
        store
    }

    /// Nested descriptions of the top-level blocks in document order.
    pub fn to_trees(&self) -> Vec<BlockTree> {
        self.roots
            .iter()
            .filter_map(|key| self.tree_at(key))
            .collect()
    }

    /// Nested description of one block and its descendants.
    pub fn tree_at(&self, key: &BlockKey) -> Option<BlockTree> {
        let block = self.get(key)?;
        Some(BlockTree {
            block_type: block.block_type,
            text: block.text.clone(),
            function_type: block.function_type,
            editable: block.editable,
            children: block
                .children
                .iter()
                .filter_map(|child| self.tree_at(child))
                .collect(),
        })
    }

    fn insert_sequence(
        &mut self,
        trees: Vec<BlockTree>,
        parent: Option<&BlockKey>,
    ) -> Vec<BlockKey> {
        let keys: Vec<BlockKey> = trees
            .into_iter()
            .map(|tree| self.insert_tree(tree, parent))
            .collect();
        for (idx, key) in keys.iter().enumerate() {
            if let Some(block) = self.blocks.get_mut(key) {
                block.pre_sibling = idx.checked_sub(1).map(|prev| keys[prev].clone());
                block.next_sibling = keys.get(idx + 1).cloned();
            }
        }
        keys
    }

    fn insert_tree(&mut self, tree: BlockTree, parent: Option<&BlockKey>) -> BlockKey {
        let key = BlockKey::new(format!("ag-{}", self.next_id));
        self.next_id += 1;
        self.blocks.insert(
            key.clone(),
            Block {
                key: key.clone(),
                block_type: tree.block_type,
                function_type: tree.function_type,
                text: tree.text,
                children: Vec::new(),
                parent: parent.cloned(),
                pre_sibling: None,
                next_sibling: None,
                editable: tree.editable,
            },
        );
        let children = self.insert_sequence(tree.children, Some(&key));
        if let Some(block) = self.blocks.get_mut(&key) {
            block.children = children;
        }
        key
    }
}
