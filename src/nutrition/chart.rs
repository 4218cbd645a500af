//! Comparison chart generation (plotters)
//!
//! Renders grouped bar charts to PNG bytes.

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;

use crate::models::{Food, Nutrient};
use super::comparison::{Comparison, ComparisonSet};
use super::format::format_food_name;

/// Most nutrients drawn on a food-vs-standards chart
pub const MAX_NUTRITION_CHART_NUTRIENTS: usize = 10;

/// Bar colors, one per series
const PALETTE: [(u8, u8, u8); 5] = [
    (37, 99, 235),   // Blue
    (16, 185, 129),  // Green
    (239, 68, 68),   // Red
    (245, 158, 11),  // Amber
    (139, 92, 246),  // Violet
];

/// What the chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Energy, protein, fat and carbohydrates, one bar per food in each group
    MajorNutrients,
    /// One bar per food for a single nutrient
    Single(Nutrient),
}

impl ChartMode {
    /// Parse `"all"` or a catalog nutrient label
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Some(ChartMode::MajorNutrients)
        } else {
            Nutrient::from_key(s).map(ChartMode::Single)
        }
    }

    pub fn title(&self) -> String {
        match self {
            ChartMode::MajorNutrients => "Major Nutrients Comparison".to_string(),
            ChartMode::Single(nutrient) => format!("{} Comparison", nutrient.key()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    /// One value per category
    pub values: Vec<f64>,
}

/// Chart contents independent of rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Lay out the bars for `foods`. Missing values plot as 0.
pub fn chart_data(foods: &[Food], mode: ChartMode) -> ChartData {
    match mode {
        ChartMode::MajorNutrients => ChartData {
            title: mode.title(),
            categories: Nutrient::MAJOR.iter().map(|n| n.short_label().to_string()).collect(),
            series: foods
                .iter()
                .map(|food| ChartSeries {
                    label: format_food_name(&food.name),
                    values: Nutrient::MAJOR
                        .iter()
                        .map(|n| food.value(*n).unwrap_or(0.0))
                        .collect(),
                })
                .collect(),
        },
        ChartMode::Single(nutrient) => ChartData {
            title: mode.title(),
            categories: foods.iter().map(|f| format_food_name(&f.name)).collect(),
            series: vec![ChartSeries {
                label: nutrient.key().to_string(),
                values: foods.iter().map(|f| f.value(nutrient).unwrap_or(0.0)).collect(),
            }],
        },
    }
}

/// Label without its unit suffix: "Iron (mg)" becomes "Iron"
fn strip_unit(label: &str) -> &str {
    label.find(" (").map_or(label, |idx| &label[..idx])
}

/// One food against its standards: the food's value next to the minimum and
/// maximum of every bounded standard the food has a value for, at most
/// `MAX_NUTRITION_CHART_NUTRIENTS` of them. A missing maximum repeats the
/// minimum; missing bounds plot as 0.
pub fn nutrition_chart_data(set: &ComparisonSet) -> ChartData {
    let charted: Vec<_> = set
        .comparisons
        .iter()
        .filter(|c| c.standard.has_bounds() && c.food_value.is_some())
        .take(MAX_NUTRITION_CHART_NUTRIENTS)
        .collect();

    let series = |label: &str, value: fn(&Comparison) -> f64| ChartSeries {
        label: label.to_string(),
        values: charted.iter().map(|c| value(c)).collect(),
    };

    ChartData {
        title: "Nutrient Comparison: Food vs Standards".to_string(),
        categories: charted.iter().map(|c| strip_unit(&c.nutrient).to_string()).collect(),
        series: vec![
            series("Food Value", |c: &Comparison| c.food_value.unwrap_or(0.0)),
            series("Minimum Standard", |c: &Comparison| c.standard.minimum.unwrap_or(0.0)),
            series("Maximum Standard", |c: &Comparison| {
                c.standard.maximum.or(c.standard.minimum).unwrap_or(0.0)
            }),
        ],
    }
}

/// Render a grouped bar chart as PNG bytes.
///
/// Without a usable system font the chart is drawn again with bars only.
pub fn render_bar_chart(data: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, String> {
    if data.categories.is_empty() || data.series.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
    if let Err(e) = draw_bars(&mut buffer, data, (width, height), true) {
        tracing::warn!("chart text unavailable ({}), drawing bars only", e);
        draw_bars(&mut buffer, data, (width, height), false)?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

fn draw_bars(
    buffer: &mut [u8],
    data: &ChartData,
    size: (u32, u32),
    with_text: bool,
) -> Result<(), String> {
    // Each category gets one slot per series plus an empty gap slot
    let stride = data.series.len() as i32 + 1;
    let slots = data.categories.len() as i32 * stride;
    let label_slot = (data.series.len() as i32 - 1) / 2;

    let y_max = data
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if with_text {
        builder
            .caption(&data.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d(0..slots, 0f64..y_max)
        .map_err(|e| e.to_string())?;

    if with_text {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots as usize)
            .x_label_formatter(&|x| {
                if *x >= 0 && *x % stride == label_slot {
                    data.categories
                        .get((*x / stride) as usize)
                        .cloned()
                        .unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_desc("Value")
            .draw()
            .map_err(|e| e.to_string())?;
    }

    for (index, series) in data.series.iter().enumerate() {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        let color = RGBColor(r, g, b);

        chart
            .draw_series(series.values.iter().enumerate().map(|(category, value)| {
                let x = category as i32 * stride + index as i32;
                Rectangle::new([(x, 0.0), (x + 1, *value)], color.mix(0.8).filled())
            }))
            .map_err(|e| e.to_string())?
            .label(series.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if with_text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| e.to_string())?;
    }

    root.present().map_err(|e| e.to_string())
}
