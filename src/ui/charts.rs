use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, PlotUi, Polygon, Text};
use survey_dash::data::aggregate::{ranked, CrossTab, DisclosureBucket, LabelCounts};
use survey_dash::AnswerLabels;

use crate::color::{ColorMap, BASE_COLORS};

const CHART_HEIGHT: f32 = 280.0;
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One named series of a grouped bar chart.
struct Series<'a> {
    name: &'a str,
    color: Color32,
    values: Vec<f64>,
}

/// Bars for `series` side by side over `categories`, labelled under the axis.
fn grouped_bars(ui: &mut Ui, id: &str, categories: &[String], series: Vec<Series<'_>>) {
    let n = series.len().max(1) as f64;
    let width = GROUP_WIDTH / n;
    let top = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(1.0, f64::max);

    let charts: Vec<BarChart> = series
        .iter()
        .enumerate()
        .map(|(s, series)| {
            let offset = (s as f64 - (n - 1.0) / 2.0) * width;
            let bars = categories
                .iter()
                .zip(&series.values)
                .enumerate()
                .map(|(i, (category, &value))| {
                    Bar::new(i as f64 + offset, value)
                        .width(width)
                        .name(category)
                })
                .collect();
            BarChart::new(bars).name(series.name).color(series.color)
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .show_axes([false, true])
        .include_y(-top * 0.1)
        .include_y(top * 1.05)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            axis_labels(plot_ui, categories);
        });
}

fn axis_labels(plot_ui: &mut PlotUi, categories: &[String]) {
    for (i, category) in categories.iter().enumerate() {
        plot_ui.text(
            Text::new(PlotPoint::new(i as f64, 0.0), category.as_str())
                .anchor(Align2::CENTER_TOP)
                .color(Color32::GRAY),
        );
    }
}

/// Treatment answers (yes / no) per gender.
pub fn treatment_by_gender(ui: &mut Ui, tab: &CrossTab, labels: &AnswerLabels) {
    if tab.is_empty() {
        no_data(ui);
        return;
    }
    let genders: Vec<String> = tab.keys().cloned().collect();
    let series = labels
        .pair()
        .into_iter()
        .zip(BASE_COLORS)
        .map(|(answer, color)| Series {
            name: answer,
            color,
            values: tab
                .values()
                .map(|row| row.get(answer).copied().unwrap_or(0) as f64)
                .collect(),
        })
        .collect();
    grouped_bars(ui, "treatment_by_gender", &genders, series);
}

/// One coloured bar per label, tallest first.
pub fn category_bars(ui: &mut Ui, id: &str, counts: &LabelCounts) {
    if counts.is_empty() {
        no_data(ui);
        return;
    }
    let entries = ranked(counts);
    let colors = ColorMap::new(entries.iter().map(|(label, _)| *label));
    let categories: Vec<String> = entries.iter().map(|(l, _)| l.to_string()).collect();
    let top = entries.first().map_or(1.0, |(_, n)| *n as f64);

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .show_axes([false, true])
        .include_y(-top * 0.1)
        .include_y(top * 1.05)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, n)) in entries.iter().enumerate() {
                let bar = Bar::new(i as f64, *n as f64).width(GROUP_WIDTH).name(label);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(label)
                        .color(colors.color_for(label)),
                );
            }
            axis_labels(plot_ui, &categories);
        });
}

/// Coworker and supervisor disclosure per age bucket.
pub fn disclosure_by_age(ui: &mut Ui, buckets: &[DisclosureBucket]) {
    let categories: Vec<String> = buckets.iter().map(|b| b.bucket.to_string()).collect();
    let series = vec![
        Series {
            name: "Colegas de trabalho",
            color: BASE_COLORS[0],
            values: buckets.iter().map(|b| b.coworkers_yes as f64).collect(),
        },
        Series {
            name: "Supervisor",
            color: BASE_COLORS[1],
            values: buckets.iter().map(|b| b.supervisor_yes as f64).collect(),
        },
    ];
    grouped_bars(ui, "disclosure_by_age", &categories, series);
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Angular slice of the pie, in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge<'a> {
    pub label: &'a str,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

/// Wedges clockwise from twelve o'clock, largest share first.
pub fn wedges(counts: &LabelCounts) -> Vec<Wedge<'_>> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut angle = FRAC_PI_2;
    ranked(counts)
        .into_iter()
        .map(|(label, n)| {
            let share = n as f64 / total as f64;
            let start = angle;
            angle -= share * TAU;
            Wedge {
                label,
                share,
                start,
                end: angle,
            }
        })
        .collect()
}

/// Arc pieces of at most a quarter turn, so every polygon stays convex.
fn wedge_polygons(wedge: &Wedge<'_>) -> Vec<Vec<[f64; 2]>> {
    let sweep = wedge.start - wedge.end;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    (0..pieces)
        .map(|p| {
            let from = wedge.start - step * p as f64;
            let segments = ((step / 0.05).ceil() as usize).max(1);
            let mut points = vec![[0.0, 0.0]];
            points.extend((0..=segments).map(|k| {
                let a = from - step * k as f64 / segments as f64;
                [a.cos(), a.sin()]
            }));
            points
        })
        .collect()
}

pub fn pie(ui: &mut Ui, id: &str, counts: &LabelCounts) {
    let wedges = wedges(counts);
    if wedges.is_empty() {
        no_data(ui);
        return;
    }
    let colors = ColorMap::new(wedges.iter().map(|w| w.label));

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let name = format!("{} ({:.1}%)", wedge.label, wedge.share * 100.0);
                let color = colors.color_for(wedge.label);
                for points in wedge_polygons(wedge) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
            }
        });
}

fn no_data(ui: &mut Ui) {
    ui.label("Sem respostas para os filtros selecionados.");
}
