//! Flat-to-nested list reconstruction
//!
//! One forward pass over the paragraph sequence rebuilds the nesting the
//! flat prefixes encode. A stack holds one entry per open nesting depth
//! (depth = indent level + 1); once a depth is closed it is never resumed,
//! even if an equal-styled list reappears later at the same depth. That is
//! deliberately different from the renumbering engine, which does resume a
//! level's sequence after a nested block.
//!
//! List-level style definitions are interned by the prefix shape, so two
//! lists sharing marker family, punctuation, and spacing share one named
//! style; run-level character styles are interned by their flag
//! combination.

use doc_model::{parse_list_line, ListType, Paragraph, ParsedListLine, StyledRun};
use std::collections::HashMap;

/// A node in the reconstructed document tree
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    /// A plain paragraph of styled runs
    Paragraph(Vec<StyledRun>),
    /// A (possibly nested) list
    List(ListNode),
}

/// A list element: an ordered sequence of items sharing one named style
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    /// Interned style name, e.g. "L1"
    pub style_name: String,
    pub list_type: ListType,
    pub items: Vec<ListItem>,
}

/// One list item: its content runs plus any lists nested under it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// The item's content with the list prefix removed, styling intact
    pub runs: Vec<StyledRun>,
    /// Lists nested one level deeper, anchored under this item
    pub children: Vec<ListNode>,
}

impl ListItem {
    fn with_runs(runs: Vec<StyledRun>) -> Self {
        Self {
            runs,
            children: Vec::new(),
        }
    }
}

/// Cache key for a named list style.
///
/// Numbered and lettered markers vary per line, so the key holds the
/// family's canonical marker (`1`, `a`, `A`) rather than the literal
/// digits; bullets key on the literal glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ListStyleKey {
    list_type: ListType,
    uppercase_letters: bool,
    marker: String,
    punctuation: String,
    spacing: String,
}

impl ListStyleKey {
    fn for_line(parsed: &ParsedListLine) -> Self {
        let marker = match parsed.list_type {
            ListType::Numbered => "1".to_string(),
            ListType::Lettered => {
                if parsed.is_uppercase_letter {
                    "A".to_string()
                } else {
                    "a".to_string()
                }
            }
            ListType::Bullet => parsed.marker.clone(),
        };
        Self {
            list_type: parsed.list_type,
            uppercase_letters: parsed.is_uppercase_letter,
            marker,
            punctuation: parsed.punctuation.clone(),
            spacing: parsed.spacing.clone(),
        }
    }
}

/// A named list style and the depths it has accumulated definitions for.
#[derive(Debug, Clone, PartialEq)]
pub struct ListStyleDef {
    /// Interned name, e.g. "L1"
    pub name: String,
    pub list_type: ListType,
    pub uppercase_letters: bool,
    /// Canonical marker: `1`, `a`, `A`, or the bullet glyph
    pub marker: String,
    pub punctuation: String,
    pub spacing: String,
    /// Depths (1-based) this style defines levels for, in first-use order
    pub levels: Vec<usize>,
}

impl ListStyleDef {
    /// Record a depth's first use under this style
    fn ensure_level(&mut self, depth: usize) {
        if !self.levels.contains(&depth) {
            self.levels.push(depth);
        }
    }
}

/// A character style used by at least one run in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterStyleDef {
    /// Flag-concatenation name, e.g. "BoldItalic" or "MonoUnderline"
    pub name: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospaced: bool,
}

/// The flag-concatenation style name for a run; `None` when unstyled.
pub fn character_style_name(run: &StyledRun) -> Option<String> {
    let mut name = String::new();
    if run.monospaced {
        name.push_str("Mono");
    }
    if run.bold {
        name.push_str("Bold");
    }
    if run.italic {
        name.push_str("Italic");
    }
    if run.underline {
        name.push_str("Underline");
    }
    if run.strikethrough {
        name.push_str("Strike");
    }
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// The reconstructed document: the node tree plus every interned style.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedDocument {
    pub nodes: Vec<DocNode>,
    /// List styles in interning order (named "L1", "L2", ...)
    pub list_styles: Vec<ListStyleDef>,
    /// Character styles in first-use order
    pub character_styles: Vec<CharacterStyleDef>,
}

/// An open list context, one per nesting depth during the walk.
struct OpenList {
    list_type: ListType,
    uppercase_letters: bool,
    /// Bullet glyph for bullet lists, empty otherwise
    bullet_symbol: String,
    style_name: String,
    node: ListNode,
}

impl OpenList {
    fn matches(&self, parsed: &ParsedListLine, style_name: &str) -> bool {
        let bullet_symbol = match parsed.list_type {
            ListType::Bullet => parsed.marker.as_str(),
            _ => "",
        };
        self.list_type == parsed.list_type
            && self.uppercase_letters == parsed.is_uppercase_letter
            && self.bullet_symbol == bullet_symbol
            && self.style_name == style_name
    }
}

struct StyleInterner {
    by_key: HashMap<ListStyleKey, usize>,
    defs: Vec<ListStyleDef>,
}

impl StyleInterner {
    fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            defs: Vec::new(),
        }
    }

    /// The index and name of the style for this line's prefix shape,
    /// creating it on first use.
    fn intern(&mut self, parsed: &ParsedListLine) -> (usize, String) {
        let key = ListStyleKey::for_line(parsed);
        if let Some(&index) = self.by_key.get(&key) {
            return (index, self.defs[index].name.clone());
        }
        let index = self.defs.len();
        let name = format!("L{}", index + 1);
        self.defs.push(ListStyleDef {
            name: name.clone(),
            list_type: key.list_type,
            uppercase_letters: key.uppercase_letters,
            marker: key.marker.clone(),
            punctuation: key.punctuation.clone(),
            spacing: key.spacing.clone(),
            levels: Vec::new(),
        });
        self.by_key.insert(key, index);
        (index, name)
    }
}

/// Close the top open list, attaching it under the parent level's last
/// item (creating an empty host item when the parent has none yet), or at
/// the document root when no parent remains.
fn close_top(stack: &mut Vec<OpenList>, root: &mut Vec<DocNode>) {
    let Some(closed) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some(parent) => {
            if parent.node.items.is_empty() {
                parent.node.items.push(ListItem::default());
            }
            if let Some(last_item) = parent.node.items.last_mut() {
                last_item.children.push(closed.node);
            }
        }
        None => root.push(DocNode::List(closed.node)),
    }
}

/// Rebuild the nested list/paragraph tree from a flat paragraph sequence.
///
/// This pass performs no I/O and cannot fail; a paragraph either carries a
/// recognized list prefix or lands at the root as plain text.
pub fn reconstruct_document(paragraphs: &[Paragraph]) -> ReconstructedDocument {
    let mut root: Vec<DocNode> = Vec::new();
    let mut stack: Vec<OpenList> = Vec::new();
    let mut interner = StyleInterner::new();
    let mut char_styles: Vec<CharacterStyleDef> = Vec::new();

    fn record_char_styles(runs: &[StyledRun], styles: &mut Vec<CharacterStyleDef>) {
        for run in runs {
            if let Some(name) = character_style_name(run) {
                if !styles.iter().any(|s| s.name == name) {
                    styles.push(CharacterStyleDef {
                        name,
                        bold: run.bold,
                        italic: run.italic,
                        underline: run.underline,
                        strikethrough: run.strikethrough,
                        monospaced: run.monospaced,
                    });
                }
            }
        }
    }

    for paragraph in paragraphs {
        let text = paragraph.plain_text();
        let Some(parsed) = parse_list_line(&text) else {
            // A non-list paragraph closes every open list.
            while !stack.is_empty() {
                close_top(&mut stack, &mut root);
            }
            record_char_styles(&paragraph.runs, &mut char_styles);
            root.push(DocNode::Paragraph(paragraph.runs.clone()));
            continue;
        };

        let runs = paragraph.split_runs_at(parsed.prefix_char_len());
        record_char_styles(&runs, &mut char_styles);

        let depth = parsed.indent_level + 1;
        let (style_index, style_name) = interner.intern(&parsed);

        // Entries deeper than the target depth close now and never resume.
        while stack.len() > depth {
            close_top(&mut stack, &mut root);
        }
        // A mismatched entry at the target depth is replaced by a fresh
        // list rather than mixed into.
        if stack.len() == depth {
            let top_matches = stack
                .last()
                .map(|top| top.matches(&parsed, &style_name))
                .unwrap_or(false);
            if !top_matches {
                close_top(&mut stack, &mut root);
            }
        }
        // Open levels until the stack reaches the target depth.
        while stack.len() < depth {
            let bullet_symbol = match parsed.list_type {
                ListType::Bullet => parsed.marker.clone(),
                _ => String::new(),
            };
            stack.push(OpenList {
                list_type: parsed.list_type,
                uppercase_letters: parsed.is_uppercase_letter,
                bullet_symbol,
                style_name: style_name.clone(),
                node: ListNode {
                    style_name: style_name.clone(),
                    list_type: parsed.list_type,
                    items: Vec::new(),
                },
            });
        }

        interner.defs[style_index].ensure_level(depth);

        if let Some(top) = stack.last_mut() {
            top.node.items.push(ListItem::with_runs(runs));
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }

    tracing::debug!(
        nodes = root.len(),
        list_styles = interner.defs.len(),
        "document reconstructed"
    );

    ReconstructedDocument {
        nodes: root,
        list_styles: interner.defs,
        character_styles: char_styles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(lines: &[&str]) -> Vec<Paragraph> {
        lines.iter().map(|l| Paragraph::from_plain(*l)).collect()
    }

    fn item_text(item: &ListItem) -> String {
        item.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_flat_list_single_node() {
        let doc = reconstruct_document(&paras(&["1. a", "2. b", "3. c"]));
        assert_eq!(doc.nodes.len(), 1);
        let DocNode::List(list) = &doc.nodes[0] else {
            panic!("expected a list node");
        };
        assert_eq!(list.items.len(), 3);
        assert_eq!(item_text(&list.items[0]), "a");
        assert_eq!(item_text(&list.items[2]), "c");
        assert_eq!(doc.list_styles.len(), 1);
        assert_eq!(doc.list_styles[0].levels, vec![1]);
    }

    #[test]
    fn test_depth_change_nests_under_last_item() {
        let doc = reconstruct_document(&paras(&["1. a", "  1. x", "2. b"]));
        assert_eq!(doc.nodes.len(), 1);
        let DocNode::List(outer) = &doc.nodes[0] else {
            panic!("expected a list node");
        };
        // "b" is a sibling of "a" at the root list, not nested under "x".
        assert_eq!(outer.items.len(), 2);
        assert_eq!(item_text(&outer.items[0]), "a");
        assert_eq!(item_text(&outer.items[1]), "b");

        let nested = &outer.items[0].children;
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].items.len(), 1);
        assert_eq!(item_text(&nested[0].items[0]), "x");
        // Same prefix shape at both depths: one interned style, two levels.
        assert_eq!(doc.list_styles.len(), 1);
        assert_eq!(doc.list_styles[0].levels, vec![1, 2]);
    }

    #[test]
    fn test_style_discontinuity_opens_new_list() {
        let doc = reconstruct_document(&paras(&["1. a", "a. b"]));
        // The numbered list closes before the lettered one opens; marker
        // families are never mixed inside one list node.
        assert_eq!(doc.nodes.len(), 2);
        let DocNode::List(first) = &doc.nodes[0] else {
            panic!("expected a list node");
        };
        let DocNode::List(second) = &doc.nodes[1] else {
            panic!("expected a list node");
        };
        assert_eq!(first.list_type, ListType::Numbered);
        assert_eq!(second.list_type, ListType::Lettered);
        assert_eq!(doc.list_styles.len(), 2);
    }

    #[test]
    fn test_non_list_paragraph_clears_stack() {
        let doc = reconstruct_document(&paras(&["1. a", "plain", "1. b"]));
        assert_eq!(doc.nodes.len(), 3);
        assert!(matches!(doc.nodes[1], DocNode::Paragraph(_)));
        // The list after the interruption is a fresh node, never a resume
        // of the closed one.
        let DocNode::List(second) = &doc.nodes[2] else {
            panic!("expected a list node");
        };
        assert_eq!(second.items.len(), 1);
        // But the style itself is interned once: same prefix shape.
        assert_eq!(doc.list_styles.len(), 1);
    }

    #[test]
    fn test_numbered_markers_share_one_style() {
        let doc = reconstruct_document(&paras(&["1. a", "2. b", "10. c"]));
        assert_eq!(doc.list_styles.len(), 1);
        assert_eq!(doc.list_styles[0].marker, "1");
    }

    #[test]
    fn test_punctuation_shape_splits_styles() {
        let doc = reconstruct_document(&paras(&["1. a", "2) b"]));
        // `.` and `)` are different prefix shapes, hence different styles
        // and different list nodes.
        assert_eq!(doc.list_styles.len(), 2);
        assert_eq!(doc.nodes.len(), 2);
    }

    #[test]
    fn test_prefix_stripped_with_styling_kept() {
        let para = Paragraph::from_runs(vec![
            StyledRun::plain("1. "),
            StyledRun::styled("bold", true, false, false, false, false),
            StyledRun::plain(" tail"),
        ]);
        let doc = reconstruct_document(&[para]);
        let DocNode::List(list) = &doc.nodes[0] else {
            panic!("expected a list node");
        };
        let item = &list.items[0];
        assert_eq!(item_text(item), "bold tail");
        assert!(item.runs[0].bold);
        assert_eq!(doc.character_styles.len(), 1);
        assert_eq!(doc.character_styles[0].name, "Bold");
    }

    #[test]
    fn test_character_styles_interned_once() {
        let runs = vec![
            StyledRun::styled("a", true, true, false, false, false),
            StyledRun::styled("b", true, true, false, false, false),
            StyledRun::styled("c", false, false, false, false, true),
        ];
        let doc = reconstruct_document(&[Paragraph::from_runs(runs)]);
        let names: Vec<&str> = doc.character_styles.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["BoldItalic", "Mono"]);
    }

    #[test]
    fn test_skipped_depth_gets_host_item() {
        // A nested line with no open outer level still nests.
        let doc = reconstruct_document(&paras(&["  1. deep"]));
        assert_eq!(doc.nodes.len(), 1);
        let DocNode::List(outer) = &doc.nodes[0] else {
            panic!("expected a list node");
        };
        assert_eq!(outer.items.len(), 1);
        assert!(outer.items[0].runs.is_empty());
        let inner = &outer.items[0].children[0];
        assert_eq!(item_text(&inner.items[0]), "deep");
    }

    #[test]
    fn test_bullet_glyph_distinguishes_styles() {
        let doc = reconstruct_document(&paras(&["\u{2022} a", "- b"]));
        assert_eq!(doc.list_styles.len(), 2);
        assert_eq!(doc.list_styles[0].marker, "\u{2022}");
        assert_eq!(doc.list_styles[1].marker, "-");
    }

    #[test]
    fn test_empty_input() {
        let doc = reconstruct_document(&[]);
        assert!(doc.nodes.is_empty());
        assert!(doc.list_styles.is_empty());
    }

    fn collect_list_text(node: &ListNode, out: &mut String) {
        for item in &node.items {
            for run in &item.runs {
                out.push_str(&run.text);
            }
            for child in &item.children {
                collect_list_text(child, out);
            }
        }
    }

    proptest::proptest! {
        /// Reconstruction drops prefixes and nothing else: the tree's text,
        /// walked in document order, equals the paragraphs' prefix-stripped
        /// text.
        #[test]
        fn prop_no_content_lost(
            lines in proptest::collection::vec(
                "( {0,4})?([0-9]{1,2}[.)]|[a-dA-D][.)]|[-*])? ?[a-z]{0,8}",
                0..12,
            )
        ) {
            let paragraphs: Vec<Paragraph> =
                lines.iter().map(Paragraph::from_plain).collect();
            let doc = reconstruct_document(&paragraphs);

            let mut tree_text = String::new();
            for node in &doc.nodes {
                match node {
                    DocNode::Paragraph(runs) => {
                        for run in runs {
                            tree_text.push_str(&run.text);
                        }
                    }
                    DocNode::List(list) => collect_list_text(list, &mut tree_text),
                }
            }

            let expected: String = lines
                .iter()
                .map(|line| match parse_list_line(line) {
                    Some(parsed) => parsed.content,
                    None => line.clone(),
                })
                .collect();
            proptest::prop_assert_eq!(tree_text, expected);
        }
    }
}
