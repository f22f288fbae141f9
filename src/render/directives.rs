//! Scoped formatting directives.
//!
//! The stack holds one frame per node whose children are being iterated.
//! An options node inserts into the frame of its parent, so the options
//! reach the following siblings and their subtrees, and disappear when the
//! parent's frame is popped.

/// A formatting option named by a child of an options node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveOption {
    /// Plain paragraphs instead of bullets
    NoList,
    /// Skip entries that are not bold
    OnlyBold,
    /// Skip entries without a marker
    OnlyTagged,
}

impl DirectiveOption {
    /// Parse an option name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "no-list" | "no-ul" | "no-li" => Some(DirectiveOption::NoList),
            "only-bold" => Some(DirectiveOption::OnlyBold),
            "only-tagged" => Some(DirectiveOption::OnlyTagged),
            _ => None,
        }
    }
}

/// Set of active options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    pub no_list: bool,
    pub only_bold: bool,
    pub only_tagged: bool,
}

impl DirectiveSet {
    /// Add an option to the set.
    pub fn insert(&mut self, option: DirectiveOption) {
        match option {
            DirectiveOption::NoList => self.no_list = true,
            DirectiveOption::OnlyBold => self.only_bold = true,
            DirectiveOption::OnlyTagged => self.only_tagged = true,
        }
    }

    /// Union of two sets.
    pub fn union(self, other: DirectiveSet) -> DirectiveSet {
        DirectiveSet {
            no_list: self.no_list || other.no_list,
            only_bold: self.only_bold || other.only_bold,
            only_tagged: self.only_tagged || other.only_tagged,
        }
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        *self == DirectiveSet::default()
    }
}

/// Stack of directive frames.
#[derive(Debug, Clone, Default)]
pub struct DirectiveStack {
    frames: Vec<DirectiveSet>,
}

impl DirectiveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame before iterating a node's children.
    pub fn enter(&mut self) {
        self.frames.push(DirectiveSet::default());
    }

    /// Close the frame opened by the matching `enter`.
    pub fn exit(&mut self) -> Option<DirectiveSet> {
        self.frames.pop()
    }

    /// Add an option to the innermost frame.
    ///
    /// Returns false when no frame is open (the option has no scope to live in).
    pub fn insert(&mut self, option: DirectiveOption) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(option);
                true
            }
            None => false,
        }
    }

    /// Options active at this point of the traversal.
    pub fn active(&self) -> DirectiveSet {
        self.frames
            .iter()
            .fold(DirectiveSet::default(), |acc, frame| acc.union(*frame))
    }
}
