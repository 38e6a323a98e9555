use super::aggregate::WeeklyMergeReport;
use crate::error::{Result, SnoopError};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle, TextStyle};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CHART_HEIGHT: u32 = 512;
pub const BAR_WIDTH: u32 = 50;
const PADDING_TOP: i32 = 40;
const PADDING_BOTTOM: i32 = 40;
const AXIS_AREA: i32 = 60;
const LABEL_AREA: i32 = 24;
const BAR_COLOR: RGBColor = RGBColor(66, 133, 244);
const AXIS_COLOR: RGBColor = RGBColor(90, 90, 90);

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// A labelled bar chart with a fixed value axis.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<(String, f64)>,
    pub y_range: (f64, f64),
    pub width: u32,
    pub height: u32,
    pub bar_width: u32,
}

/// Merged count per week. Opened and closed counts are not charted.
pub fn merged_chart(project_name: &str, report: &WeeklyMergeReport) -> BarChart {
    let mut max_merged = 1;
    let bars: Vec<(String, f64)> = report
        .sorted_weeks()
        .into_iter()
        .map(|(week, bucket)| {
            max_merged = max_merged.max(bucket.merged);
            (week.to_string(), f64::from(bucket.merged))
        })
        .collect();

    BarChart {
        title: format!("{project_name} - Merged MRs"),
        width: BAR_WIDTH * bars.len() as u32 + 150,
        bars,
        y_range: (0.0, f64::from(max_merged)),
        height: CHART_HEIGHT,
        bar_width: BAR_WIDTH,
    }
}

fn chart_err<E: std::fmt::Display>(e: E) -> SnoopError {
    SnoopError::Chart(e.to_string())
}

/// Registers the bundled font for chart text, once per process.
fn register_chart_font() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).map_err(|_| "InvalidFont".to_string())
        })
        .clone()
        .map_err(|e| SnoopError::Chart(format!("unusable chart font: {e}")))
}

impl BarChart {
    /// Render to PNG and write the encoded image into `out`.
    pub fn render_png<W: Write>(&self, out: W) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(chart_err)?;
        }

        PngEncoder::new(out)
            .write_image(&buffer, width, height, ExtendedColorType::Rgb8)
            .map_err(chart_err)
    }

    fn draw(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(chart_err)?;

        let left = AXIS_AREA;
        let right = self.width as i32 - 30;
        let top = PADDING_TOP + LABEL_AREA;
        let bottom = self.height as i32 - PADDING_BOTTOM - LABEL_AREA;
        let plot_height = f64::from((bottom - top).max(1));
        let (y_min, y_max) = self.y_range;
        let span = (y_max - y_min).max(f64::EPSILON);
        let to_y = |value: f64| bottom - (((value - y_min) / span).clamp(0.0, 1.0) * plot_height) as i32;
        register_chart_font()?;

        let title = TextStyle::from((FONT_FAMILY, 20).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw_text(&self.title, &title, (self.width as i32 / 2, PADDING_TOP / 2))
            .map_err(chart_err)?;

        let ticks = y_ticks(y_min, y_max);
        let tick_label = TextStyle::from((FONT_FAMILY, 12).into_font())
            .color(&AXIS_COLOR)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for tick in &ticks {
            let y = to_y(*tick);
            root.draw(&PathElement::new(vec![(left - 5, y), (right, y)], AXIS_COLOR.mix(0.2)))
                .map_err(chart_err)?;
            root.draw_text(&format!("{tick:.0}"), &tick_label, (left - 8, y))
                .map_err(chart_err)?;
        }

        if !self.bars.is_empty() {
            let slot = (right - left) / self.bars.len() as i32;
            let bar_width = (self.bar_width as i32).min(slot - 4).max(1);
            let bar_label = TextStyle::from((FONT_FAMILY, 12).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));

            for (i, (label, value)) in self.bars.iter().enumerate() {
                let center = left + slot * i as i32 + slot / 2;
                let x0 = center - bar_width / 2;
                root.draw(&Rectangle::new(
                    [(x0, to_y(*value)), (x0 + bar_width, bottom)],
                    BAR_COLOR.filled(),
                ))
                .map_err(chart_err)?;
                root.draw_text(label, &bar_label, (center, bottom + 6))
                    .map_err(chart_err)?;
            }
        }

        root.draw(&PathElement::new(vec![(left, top), (left, bottom)], &AXIS_COLOR))
            .map_err(chart_err)?;
        root.draw(&PathElement::new(vec![(left, bottom), (right, bottom)], &AXIS_COLOR))
            .map_err(chart_err)?;
        Ok(())
    }
}

/// Whole-number ticks from `min` to `max`, at most about six of them.
fn y_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = (max - min).max(1.0);
    let step = (span / 5.0).ceil().max(1.0);
    let mut ticks = Vec::new();
    let mut tick = min;
    while tick <= max + f64::EPSILON {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// Write a PNG produced by `render` into a fresh `snoop*.png` temp file.
///
/// The file is removed again if `render` or the final flush fails.
pub fn persist_png<F>(dir: &Path, render: F) -> Result<PathBuf>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut file = tempfile::Builder::new()
        .prefix("snoop")
        .suffix(".png")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        render(&mut writer)?;
        writer.flush()?;
    }
    let (_, path) = file.keep().map_err(|e| SnoopError::Io(e.error))?;
    Ok(path)
}

pub fn write_chart_file(chart: &BarChart, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
    persist_png(&dir, |out| chart.render_png(out))
}
