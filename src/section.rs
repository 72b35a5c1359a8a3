/// One full-viewport-height region of the landing page, in scroll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Hero,
    About,
    Contact,
}

impl Section {
    pub const COUNT: usize = 3;
    pub const ALL: [Section; Self::COUNT] = [Section::Hero, Section::About, Section::Contact];

    /// Where the hero's scroll-down button takes the reader.
    pub const SCROLL_TARGET: Section = Section::About;

    pub const fn index(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::About => 1,
            Section::Contact => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
