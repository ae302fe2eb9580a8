//! PDF rendering via `printpdf`.

use std::io::BufWriter;

use printpdf::{
    path::{PaintMode, WindingOrder},
    *,
};

use super::{
    charts::{self, Chart, ChartSpec},
    ReportError,
};
use crate::model::Submission;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;
const CHART_WIDTH: f32 = 165.0;
const CHART_HEIGHT: f32 = 60.0;

const PALETTE: [(f32, f32, f32); 6] = [
    (0.20, 0.45, 0.75),
    (0.85, 0.33, 0.25),
    (0.95, 0.65, 0.15),
    (0.35, 0.35, 0.65),
    (0.30, 0.65, 0.35),
    (0.60, 0.60, 0.60),
];

/// Render the full report for a processed submission.
pub fn render_pdf(doc: &Submission) -> Result<Vec<u8>, ReportError> {
    let mut canvas = Canvas::new("Sentiment Analysis Report")?;

    canvas.text("Sentiment Analysis Report", 18.0, true, 9.0);
    canvas.text(&format!("Generated on: {}", generated_on(doc)), 9.0, false, 6.0);
    canvas.text(&format!("Request: {}", doc.request_id), 9.0, false, 8.0);

    canvas.text("Executive Summary", 12.0, true, 6.0);
    let summary = doc.summary.as_deref().filter(|s| !s.is_empty()).unwrap_or("No summary available.");
    canvas.paragraph(summary, 9.0, 100);
    canvas.gap(6.0);

    if !doc.overall_emotions.as_deref().unwrap_or_default().is_empty() {
        let emotions = doc.overall_emotions.as_deref().unwrap_or_default().join(", ");
        canvas.paragraph(&format!("Overall emotions: {emotions}"), 9.0, 100);
        canvas.gap(4.0);
    }

    for spec in charts::build_charts(doc) {
        canvas.chart(&spec);
    }

    canvas.text("Sentence Details", 12.0, true, 6.0);
    if doc.sentences.is_empty() {
        canvas.paragraph("No sentences.", 9.0, 100);
    }
    for (idx, sentence) in doc.sentences.iter().enumerate() {
        canvas.paragraph(&format!("Sentence {}: {}", idx + 1, sentence.sentence), 9.0, 100);
        let sentiment = match sentence.analysis {
            Some(a) => format!(
                "Sentiment: compound {:.3} (pos {:.3}, neu {:.3}, neg {:.3})",
                a.compound, a.pos, a.neu, a.neg
            ),
            None => "Sentiment: not analysed".to_string(),
        };
        canvas.paragraph(&format!("    {sentiment}"), 8.0, 110);
        let emotions = if sentence.emotions.is_empty() {
            "-".to_string()
        } else {
            sentence.emotions.join(", ")
        };
        canvas.paragraph(&format!("    Emotions: {emotions}"), 8.0, 110);
        let entities = if sentence.entities.is_empty() {
            "No entities found".to_string()
        } else {
            sentence
                .entities
                .iter()
                .map(|e| format!("{} ({})", e.text, e.label))
                .collect::<Vec<_>>()
                .join(", ")
        };
        canvas.paragraph(&format!("    Entities: {entities}"), 8.0, 110);
        canvas.gap(2.0);
    }

    canvas.finish()
}

fn generated_on(doc: &Submission) -> String {
    doc.timestamp_utc().format("%B %d, %Y at %H:%M:%S").to_string()
}

/// Builtin PDF fonts only cover Latin-1.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap on character counts.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Canvas {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: TOP,
            pages: 1,
        })
    }

    fn ensure(&mut self, height: f32) {
        if self.y - height >= BOTTOM {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, advance: f32) {
        self.ensure(advance);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
        self.layer.use_text(pdf_safe(text), size, Mm(MARGIN_LEFT), Mm(self.y), font);
        self.y -= advance;
    }

    fn paragraph(&mut self, text: &str, size: f32, max_chars: usize) {
        let line_height = size * 0.5;
        for line in wrap_text(text, max_chars) {
            self.text(&line, size, false, line_height);
        }
    }

    fn label(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.set_fill_color(rgb((0.2, 0.2, 0.2)));
        self.layer.use_text(pdf_safe(text), size, Mm(x), Mm(y), &self.regular);
    }

    fn line(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![point(from.0, from.1), point(to.0, to.1)],
            is_closed: false,
        });
    }

    fn rect(&self, x: f32, y: f32, width: f32, height: f32, color: (f32, f32, f32)) {
        let (bottom, top) = if height >= 0.0 { (y, y + height) } else { (y + height, y) };
        self.layer.set_fill_color(rgb(color));
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                point(x, bottom),
                point(x + width, bottom),
                point(x + width, top),
                point(x, top),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn chart(&mut self, spec: &ChartSpec) {
        self.ensure(CHART_HEIGHT + 22.0);
        self.text(spec.title, 12.0, true, 8.0);

        let x0 = MARGIN_LEFT + 8.0;
        let y0 = self.y - CHART_HEIGHT;
        let (lo, hi) = value_range(&spec.chart);
        let scale = |v: f64| y0 + ((v - lo) / (hi - lo)) as f32 * CHART_HEIGHT;

        self.layer.set_outline_color(rgb((0.3, 0.3, 0.3)));
        self.layer.set_outline_thickness(0.6);
        self.line((x0, y0), (x0, y0 + CHART_HEIGHT));
        let baseline = scale(0.0_f64.clamp(lo, hi));
        self.line((x0, baseline), (x0 + CHART_WIDTH, baseline));
        self.label(&format!("{hi:.2}"), 6.0, MARGIN_LEFT - 6.0, y0 + CHART_HEIGHT - 1.0);
        self.label(&format!("{lo:.2}"), 6.0, MARGIN_LEFT - 6.0, y0);

        match &spec.chart {
            Chart::Line { points } => {
                let max_x = points.iter().map(|p| p.0).fold(1.0_f64, f64::max);
                let xs = |x: f64| x0 + (x / max_x) as f32 * CHART_WIDTH;
                self.layer.set_outline_color(rgb(PALETTE[0]));
                self.layer.set_outline_thickness(1.0);
                if points.len() == 1 {
                    let (x, y) = (xs(points[0].0), scale(points[0].1));
                    self.rect(x - 0.8, y - 0.8, 1.6, 1.6, PALETTE[0]);
                } else {
                    self.layer.add_line(Line {
                        points: points.iter().map(|&(x, y)| point(xs(x), scale(y))).collect(),
                        is_closed: false,
                    });
                }
            }
            Chart::Histogram { counts, .. } => {
                let width = CHART_WIDTH / counts.len().max(1) as f32;
                for (i, &count) in counts.iter().enumerate() {
                    if count > 0 {
                        let x = x0 + i as f32 * width;
                        self.rect(x + 0.3, baseline, width - 0.6, scale(count as f64) - baseline, PALETTE[0]);
                    }
                }
                self.label("-1.0", 6.0, x0, y0 - 4.0);
                self.label("1.0", 6.0, x0 + CHART_WIDTH - 4.0, y0 - 4.0);
            }
            Chart::Bars { labels, values } => {
                let width = CHART_WIDTH / values.len().max(1) as f32;
                for (i, (label, &value)) in labels.iter().zip(values).enumerate() {
                    let x = x0 + i as f32 * width;
                    let color = PALETTE[i % PALETTE.len()];
                    self.rect(x + 0.5, baseline, (width - 1.0).max(0.5), scale(value) - baseline, color);
                    if labels.len() <= 30 {
                        let short: String = label.chars().take(((width / 1.6) as usize).max(2)).collect();
                        self.label(&short, 6.0, x + 0.5, y0 - 4.0);
                    }
                }
            }
            Chart::Stacked { labels, series } => {
                let positions = series.first().map(Vec::len).unwrap_or(0);
                let width = CHART_WIDTH / positions.max(1) as f32;
                for pos in 0..positions {
                    let mut acc = 0.0;
                    for (s, values) in series.iter().enumerate() {
                        let value = values.get(pos).copied().unwrap_or(0.0);
                        if value > 0.0 {
                            let bottom = scale(acc);
                            self.rect(x0 + pos as f32 * width, bottom, width, scale(acc + value) - bottom, PALETTE[s % PALETTE.len()]);
                            acc += value;
                        }
                    }
                }
                for (i, label) in labels.iter().enumerate() {
                    let x = x0 + i as f32 * 26.0;
                    self.rect(x, y0 - 5.0, 2.5, 2.5, PALETTE[i % PALETTE.len()]);
                    self.label(label, 6.0, x + 3.5, y0 - 4.8);
                }
            }
        }

        self.label(spec.x_label, 7.0, x0 + CHART_WIDTH / 2.0 - 10.0, y0 - 9.0);
        self.label(spec.y_label, 7.0, MARGIN_LEFT - 6.0, y0 + CHART_HEIGHT + 2.0);
        self.y = y0 - 14.0;
    }

    fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
    }
}

/// Vertical range shown for a chart; always includes zero and never collapses.
fn value_range(chart: &Chart) -> (f64, f64) {
    let values: Vec<f64> = match chart {
        Chart::Line { .. } => vec![-1.0, 1.0],
        Chart::Histogram { counts, .. } => counts.iter().map(|&c| c as f64).collect(),
        Chart::Bars { values, .. } => values.clone(),
        Chart::Stacked { series, .. } => {
            let positions = series.first().map(Vec::len).unwrap_or(0);
            (0..positions)
                .map(|p| series.iter().map(|s| s.get(p).copied().unwrap_or(0.0)).sum())
                .collect()
        }
    };
    let lo = values.iter().copied().fold(0.0_f64, f64::min);
    let hi = values.iter().copied().fold(0.0_f64, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}
