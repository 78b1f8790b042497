//! Character-level attribute values (font, colors, line decorations) and the
//! attribute map stored on every run of the buffer.

use std::rc::Rc;

use crate::ParagraphStyle;

bitflags::bitflags! {
    /// Symbolic font traits toggled from the toolbar.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FontTraits: u8 {
        const BOLD   = 0b0000_0001;
        const ITALIC = 0b0000_0010;
    }
}

/// A concrete font: family name, point size and symbolic traits.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub traits: FontTraits,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            traits: FontTraits::empty(),
        }
    }

    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    pub fn with_family(&self, family: &str) -> Self {
        Self {
            family: family.to_string(),
            ..self.clone()
        }
    }

    pub fn with_traits(&self, traits: FontTraits) -> Self {
        Self {
            traits,
            ..self.clone()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.traits.contains(FontTraits::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.traits.contains(FontTraits::ITALIC)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent; as a highlight color it means "remove highlight".
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn is_clear(&self) -> bool {
        self.a == 0
    }
}

/// Underline / strikethrough line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Single,
    Double,
    Thick,
}

/// Attribute map carried by a run of characters (and by the typing
/// attributes). Absent keys are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: Option<LineStyle>,
    pub strikethrough: Option<LineStyle>,
    /// Shared paragraph style; replaced wholesale, never mutated in place.
    pub paragraph: Option<Rc<ParagraphStyle>>,
}

impl Attributes {
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_paragraph(mut self, style: ParagraphStyle) -> Self {
        self.paragraph = Some(Rc::new(style));
        self
    }

    /// Paragraph style reference, if one is set.
    pub fn paragraph_style(&self) -> Option<&ParagraphStyle> {
        self.paragraph.as_deref()
    }
}
