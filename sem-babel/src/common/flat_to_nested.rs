//! Rebuilds nested lists from a flat stream of paragraphs and line markers.
//!
//! # The High-Level Concept
//!
//! Flat formats (Quill deltas) do not nest. A list item is a paragraph whose line end says
//! "this line is a list item of kind K at depth D". Reconstructing the tree means remembering,
//! for every depth, which list is currently open.
//!
//! # The Algorithm
//!
//! 1. **State:**
//!    - an arena of draft lists, addressed by index, so nested lists can be filled after
//!      their parent item has been placed
//!    - a frame stack holding `(kind, list id)` for each open depth
//!    - the flat output `elements` (paragraphs, headings and top-level list ids)
//!
//! 2. **Paragraph:** appended to `elements`. When the previous event was also a paragraph, that
//!    earlier paragraph stands on its own, so the list context ends and the stack is cleared.
//!
//! 3. **Header(level):** the last paragraph becomes a heading; the stack is cleared.
//!
//! 4. **ListItem(kind, depth):** the last paragraph becomes the body of a new item.
//!    - empty stack: `depth` must be 0, a new top-level list is started
//!    - `depth + 1 == stack.len()`: the item joins the open list at that depth when the kind
//!      matches, otherwise a fresh list replaces it at that depth
//!    - `depth == stack.len()`: a new list nested in the last item of the deepest list
//!    - `depth > stack.len()`: a skipped level, [`InvalidNestingError`]
//!    - shallower: the stack is truncated to `depth + 1` and the same-depth rule applies
//!
//! 5. **Completion:** the arena is folded into real [`List`] nodes. Empty top-level paragraphs
//!    (blank lines of the source) are dropped; empty paragraphs inside items are kept.

use crate::ast::{Block, Heading, Item, List, ListStyle, Paragraph, Text};
use crate::error::InvalidNestingError;
use crate::formats::delta::transforms::Reduced;

#[derive(Debug)]
struct DraftItem {
    paragraph: Paragraph,
    /// Ids of lists nested in this item, in order.
    lists: Vec<usize>,
}

#[derive(Debug)]
struct DraftList {
    style: ListStyle,
    items: Vec<DraftItem>,
}

#[derive(Debug)]
enum Element {
    Paragraph(Paragraph),
    Heading(Heading),
    List(usize),
}

#[derive(Debug, Default)]
struct Builder {
    arena: Vec<DraftList>,
    stack: Vec<(ListStyle, usize)>,
    elements: Vec<Element>,
    last_was_paragraph: bool,
}

impl Builder {
    fn paragraph(&mut self, paragraph: Paragraph) {
        if self.last_was_paragraph {
            self.stack.clear();
        }
        self.elements.push(Element::Paragraph(paragraph));
        self.last_was_paragraph = true;
    }

    fn header(&mut self, level: u8) {
        let paragraph = self.take_tip();
        self.elements
            .push(Element::Heading(Heading::from_paragraph(level, paragraph)));
        self.stack.clear();
        self.last_was_paragraph = false;
    }

    fn list_item(&mut self, style: ListStyle, depth: usize) -> Result<(), InvalidNestingError> {
        let paragraph = self.take_tip();
        self.last_was_paragraph = false;
        let item = DraftItem {
            paragraph,
            lists: Vec::new(),
        };

        let len = self.stack.len();
        if len == 0 {
            if depth != 0 {
                return Err(InvalidNestingError {
                    expected: 0,
                    got: depth,
                });
            }
            let id = self.new_list(style, item);
            self.elements.push(Element::List(id));
            self.stack.push((style, id));
            return Ok(());
        }

        if depth > len {
            return Err(InvalidNestingError {
                expected: len,
                got: depth,
            });
        }

        if depth == len {
            let parent = self.stack[len - 1].1;
            let id = self.new_list(style, item);
            self.attach_nested(parent, id);
            self.stack.push((style, id));
            return Ok(());
        }

        self.stack.truncate(depth + 1);
        let (open_style, open_id) = self.stack[depth];
        if open_style == style {
            self.arena[open_id].items.push(item);
            return Ok(());
        }

        let id = self.new_list(style, item);
        if depth == 0 {
            self.elements.push(Element::List(id));
        } else {
            let parent = self.stack[depth - 1].1;
            self.attach_nested(parent, id);
        }
        self.stack[depth] = (style, id);
        Ok(())
    }

    /// Removes the paragraph a structural event applies to.
    fn take_tip(&mut self) -> Paragraph {
        match self.elements.pop() {
            Some(Element::Paragraph(paragraph)) => paragraph,
            Some(other) => {
                self.elements.push(other);
                Paragraph::new(Vec::new())
            }
            None => Paragraph::new(Vec::new()),
        }
    }

    fn new_list(&mut self, style: ListStyle, item: DraftItem) -> usize {
        self.arena.push(DraftList {
            style,
            items: vec![item],
        });
        self.arena.len() - 1
    }

    fn attach_nested(&mut self, parent: usize, child: usize) {
        if let Some(last) = self.arena[parent].items.last_mut() {
            last.lists.push(child);
        }
    }

    fn finish(mut self) -> Text {
        let elements = std::mem::take(&mut self.elements);
        let blocks = elements
            .into_iter()
            .filter_map(|element| match element {
                Element::Paragraph(paragraph) if paragraph.is_empty() => None,
                Element::Paragraph(paragraph) => Some(Block::Paragraph(paragraph)),
                Element::Heading(heading) => Some(Block::Heading(heading)),
                Element::List(id) => Some(Block::List(self.build_list(id))),
            })
            .collect();
        Text::new(blocks)
    }

    fn build_list(&mut self, id: usize) -> List {
        let draft = std::mem::replace(
            &mut self.arena[id],
            DraftList {
                style: ListStyle::Dotted,
                items: Vec::new(),
            },
        );
        let items = draft
            .items
            .into_iter()
            .map(|item| {
                let mut children = vec![Block::Paragraph(item.paragraph)];
                children.extend(item.lists.into_iter().map(|id| Block::List(self.build_list(id))));
                Item::auto(children)
            })
            .collect();
        List::new(draft.style, items)
    }
}

/// Folds reduced delta events into a document.
pub fn events_to_text(
    events: impl IntoIterator<Item = Reduced>,
) -> Result<Text, InvalidNestingError> {
    let mut builder = Builder::default();
    for event in events {
        match event {
            Reduced::Paragraph(paragraph) => builder.paragraph(paragraph),
            Reduced::Header(level) => builder.header(level),
            Reduced::ListItem { style, depth } => builder.list_item(style, depth)?,
        }
    }
    Ok(builder.finish())
}
