use std::fmt;
use std::time::Duration;

/// The page sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Header,
    Hero,
    About,
    Highlights,
    Skills,
    Experience,
    Certifications,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Header,
        SectionId::Hero,
        SectionId::About,
        SectionId::Highlights,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Certifications,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Sections reachable from the header navigation, in order.
    pub const NAV: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Highlights,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Certifications,
        SectionId::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Header => "header",
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Highlights => "highlights",
            SectionId::Skills => "skills",
            SectionId::Experience => "experience",
            SectionId::Certifications => "certifications",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            SectionId::Header | SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Highlights => "Highlights",
            SectionId::Skills => "Skills",
            SectionId::Experience => "Experience",
            SectionId::Certifications => "Certifications",
            SectionId::Contact => "Contact",
            SectionId::Footer => "Footer",
        }
    }

    /// Header and footer are always shown; everything else fades in.
    pub fn reveals(self) -> bool {
        !matches!(self, SectionId::Header | SectionId::Footer)
    }

    /// Delay between consecutive list items appearing once revealed.
    pub fn item_stagger(self) -> Duration {
        match self {
            SectionId::Skills => Duration::from_millis(100),
            SectionId::Highlights | SectionId::Experience => Duration::from_millis(200),
            _ => Duration::ZERO,
        }
    }

    /// Whether list items carry their own reveal watch.
    pub fn watches_items(self) -> bool {
        matches!(
            self,
            SectionId::Highlights | SectionId::Skills | SectionId::Experience
        )
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Anything the page registers for reveal: a section root or one list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Section(SectionId),
    Item(SectionId, usize),
}

impl ElementId {
    pub fn section(self) -> SectionId {
        match self {
            ElementId::Section(section) | ElementId::Item(section, _) => section,
        }
    }

    /// Presentation-only delay applied after the element is revealed.
    pub fn stagger(self) -> Duration {
        match self {
            ElementId::Section(_) => Duration::ZERO,
            ElementId::Item(section, index) => {
                section.item_stagger().saturating_mul(index.min(u32::MAX as usize) as u32)
            }
        }
    }
}
