// Visitor: exporters and statistics walk a fixed set of document elements
// through double dispatch. A second, enum-based hierarchy of shapes shows
// the same idea with one exhaustive `match` per visitor.

use std::f64::consts::PI;
use std::io;

use itertools::Itertools;

use crate::transcript::Transcript;

// ============================================================================
// Example: Double dispatch with trait objects
// ============================================================================

pub trait Element {
    fn accept(&self, visitor: &mut dyn DocumentVisitor);
}

pub trait DocumentVisitor {
    fn visit_heading(&mut self, heading: &Heading);
    fn visit_paragraph(&mut self, paragraph: &Paragraph);
    fn visit_code(&mut self, code: &CodeBlock);
}

pub struct Heading {
    pub level: u8,
    pub text: String,
}

pub struct Paragraph {
    pub text: String,
}

pub struct CodeBlock {
    pub language: String,
    pub source: String,
}

impl Element for Heading {
    fn accept(&self, visitor: &mut dyn DocumentVisitor) {
        visitor.visit_heading(self);
    }
}

impl Element for Paragraph {
    fn accept(&self, visitor: &mut dyn DocumentVisitor) {
        visitor.visit_paragraph(self);
    }
}

impl Element for CodeBlock {
    fn accept(&self, visitor: &mut dyn DocumentVisitor) {
        visitor.visit_code(self);
    }
}

#[derive(Default)]
pub struct Document {
    elements: Vec<Box<dyn Element>>,
}

impl Document {
    pub fn push(mut self, element: impl Element + 'static) -> Self {
        self.elements.push(Box::new(element));
        self
    }

    pub fn accept(&self, visitor: &mut dyn DocumentVisitor) {
        for element in &self.elements {
            element.accept(visitor);
        }
    }
}

#[derive(Default)]
pub struct HtmlExporter {
    pub output: Vec<String>,
}

impl DocumentVisitor for HtmlExporter {
    fn visit_heading(&mut self, heading: &Heading) {
        self.output
            .push(format!("<h{0}>{1}</h{0}>", heading.level, heading.text));
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.output.push(format!("<p>{}</p>", paragraph.text));
    }

    fn visit_code(&mut self, code: &CodeBlock) {
        self.output.push(format!(
            "<pre><code class=\"{}\">{}</code></pre>",
            code.language, code.source
        ));
    }
}

#[derive(Default)]
pub struct MarkdownExporter {
    pub output: Vec<String>,
}

impl DocumentVisitor for MarkdownExporter {
    fn visit_heading(&mut self, heading: &Heading) {
        let hashes = "#".repeat(usize::from(heading.level));
        self.output.push(format!("{hashes} {}", heading.text));
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.output.push(paragraph.text.clone());
    }

    fn visit_code(&mut self, code: &CodeBlock) {
        self.output
            .push(format!("```{} {} ```", code.language, code.source));
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Stats {
    pub headings: usize,
    pub paragraphs: usize,
    pub code_blocks: usize,
    pub words: usize,
}

impl DocumentVisitor for Stats {
    fn visit_heading(&mut self, heading: &Heading) {
        self.headings += 1;
        self.words += heading.text.split_whitespace().count();
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.paragraphs += 1;
        self.words += paragraph.text.split_whitespace().count();
    }

    fn visit_code(&mut self, _code: &CodeBlock) {
        self.code_blocks += 1;
    }
}

// ============================================================================
// Example: Closed enum, one match per visitor
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Triangle { base: f64, height: f64 },
}

pub trait ShapeVisitor {
    type Output;
    fn visit(&self, shape: &Shape) -> Self::Output;
}

pub struct Area;

impl ShapeVisitor for Area {
    type Output = f64;

    fn visit(&self, shape: &Shape) -> f64 {
        match *shape {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Rectangle { width, height } => width * height,
            Shape::Triangle { base, height } => 0.5 * base * height,
        }
    }
}

/// Added later without touching `Shape`.
pub struct Describe;

impl ShapeVisitor for Describe {
    type Output = String;

    fn visit(&self, shape: &Shape) -> String {
        match *shape {
            Shape::Circle { radius } => format!("circle r={radius}"),
            Shape::Rectangle { width, height } => format!("rectangle {width}x{height}"),
            Shape::Triangle { base, height } => format!("triangle b={base} h={height}"),
        }
    }
}

fn sample_document() -> Document {
    Document::default()
        .push(Heading {
            level: 1,
            text: "Design Patterns".to_string(),
        })
        .push(Paragraph {
            text: "Visitors add operations without editing elements.".to_string(),
        })
        .push(CodeBlock {
            language: "rust".to_string(),
            source: "doc.accept(&mut visitor);".to_string(),
        })
        .push(Heading {
            level: 2,
            text: "Summary".to_string(),
        })
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let document = sample_document();

    let mut html = HtmlExporter::default();
    document.accept(&mut html);
    for line in &html.output {
        out.line("html", line)?;
    }

    let mut markdown = MarkdownExporter::default();
    document.accept(&mut markdown);
    for line in &markdown.output {
        out.line("markdown", line)?;
    }

    let mut stats = Stats::default();
    document.accept(&mut stats);
    out.line(
        "stats",
        format!(
            "{} headings, {} paragraphs, {} code blocks, {} words",
            stats.headings, stats.paragraphs, stats.code_blocks, stats.words
        ),
    )?;
    out.check("exports-differ", html.output != markdown.output)?;

    let shapes = [
        Shape::Circle { radius: 5.0 },
        Shape::Rectangle {
            width: 4.0,
            height: 6.0,
        },
        Shape::Triangle {
            base: 3.0,
            height: 8.0,
        },
    ];
    for shape in &shapes {
        out.line("shape", format!("{} area={:.2}", Describe.visit(shape), Area.visit(shape)))?;
    }
    let total: f64 = shapes.iter().map(|shape| Area.visit(shape)).sum();
    out.line("total-area", format!("{total:.2}"))?;
    out.line(
        "kinds",
        shapes
            .iter()
            .map(|shape| Describe.visit(shape))
            .map(|d| d.split(' ').next().unwrap_or_default().to_string())
            .join(", "),
    )?;
    Ok(())
}
