//! Pagination - flowing wrapped lines onto fixed-layout pages
//!
//! Wrapped lines are placed top to bottom inside one-inch margins; a line
//! that would cross the bottom margin starts a new page. Each paragraph is
//! followed by half a line-height of spacing. The output is a sequence of
//! pages of positioned spans for a PDF-writing collaborator.

use crate::{wrap_paragraph, FontResolver, LineSpan, WrappedLine};
use doc_model::Paragraph;
use serde::{Deserialize, Serialize};

/// One-inch default margin on all sides, in points
pub const PAGE_MARGIN: f32 = 72.0;

/// Line height as a multiple of the tallest font on the line
pub const LINE_SPACING_FACTOR: f32 = 1.4;

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Custom size in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Width and height in points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.276, 841.89),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Letter
    }
}

/// A span positioned on a page. `y` is the top of the line the span sits
/// on, measured from the page top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedSpan {
    pub x: f32,
    pub y: f32,
    pub span: LineSpan,
}

/// One fixed-layout page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub spans: Vec<PositionedSpan>,
}

/// Pagination settings: page size and uniform margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_size: PageSize,
    pub margin: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin: PAGE_MARGIN,
        }
    }
}

impl PageLayout {
    /// Usable width between the left and right margins
    pub fn content_width(&self) -> f32 {
        let (width, _) = self.page_size.dimensions();
        width - 2.0 * self.margin
    }
}

struct PageFlow<'a> {
    layout: &'a PageLayout,
    pages: Vec<Page>,
    cursor_y: f32,
}

impl<'a> PageFlow<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        let mut flow = Self {
            layout,
            pages: Vec::new(),
            cursor_y: layout.margin,
        };
        flow.start_page();
        flow
    }

    fn start_page(&mut self) {
        let (width, height) = self.layout.page_size.dimensions();
        self.pages.push(Page {
            number: self.pages.len() + 1,
            width,
            height,
            spans: Vec::new(),
        });
        self.cursor_y = self.layout.margin;
    }

    fn place_line(&mut self, line: &WrappedLine, line_height: f32) {
        let (_, page_height) = self.layout.page_size.dimensions();
        if self.cursor_y + line_height > page_height - self.layout.margin {
            self.start_page();
        }

        let mut x = self.layout.margin;
        let y = self.cursor_y;
        // new() opens a page and start_page never removes one.
        if let Some(page) = self.pages.last_mut() {
            for span in &line.spans {
                let width = span.font.measure(&span.text);
                page.spans.push(PositionedSpan {
                    x,
                    y,
                    span: span.clone(),
                });
                x += width;
            }
        }

        self.cursor_y += line_height;
    }
}

/// Flow paragraphs onto pages.
///
/// Each paragraph is wrapped to the layout's content width, then its lines
/// are placed top to bottom; a blank line still occupies the default font's
/// line height. Deterministic given identical input, layout, and resolver.
pub fn paginate(
    paragraphs: &[Paragraph],
    layout: &PageLayout,
    resolver: &dyn FontResolver,
) -> Vec<Page> {
    let mut flow = PageFlow::new(layout);
    let default_height = resolver.default_font().height();

    for paragraph in paragraphs {
        let lines = wrap_paragraph(paragraph, layout.content_width(), resolver);
        let mut last_height = 0.0;
        for line in &lines {
            let font_height = line.max_font_height().unwrap_or(default_height);
            let line_height = font_height * LINE_SPACING_FACTOR;
            flow.place_line(line, line_height);
            last_height = line_height;
        }
        // Inter-paragraph spacing: an extra half line-height.
        flow.cursor_y += last_height * 0.5;
    }

    flow.pages
}
