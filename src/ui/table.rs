use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use survey_dash::data::stats::{ColumnSummary, Summary};

/// Row labels of the statistics table, in display order.
const ROWS: [&str; 11] = [
    "count", "mean", "std", "min", "25%", "50%", "75%", "max", "unique", "top", "freq",
];

fn number(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// One cell per `ROWS` entry; cells that do not apply to the column are blank.
fn cells(summary: &Summary) -> [String; ROWS.len()] {
    let blank = String::new;
    match summary {
        Summary::Numeric(s) => [
            s.count.to_string(),
            number(s.mean),
            number(s.std),
            number(s.min),
            number(s.q25),
            number(s.median),
            number(s.q75),
            number(s.max),
            blank(),
            blank(),
            blank(),
        ],
        Summary::Categorical(s) => [
            s.count.to_string(),
            blank(),
            blank(),
            blank(),
            blank(),
            blank(),
            blank(),
            blank(),
            s.distinct.to_string(),
            s.mode.clone().unwrap_or_default(),
            s.frequency.to_string(),
        ],
    }
}

/// Descriptive statistics laid out with one column per survey field.
pub fn statistics_table(ui: &mut Ui, summaries: &[ColumnSummary]) {
    let columns: Vec<[String; ROWS.len()]> = summaries.iter().map(|c| cells(&c.summary)).collect();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(90.0), summaries.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("");
            });
            for summary in summaries {
                header.col(|ui| {
                    ui.strong(summary.field.header());
                });
            }
        })
        .body(|mut body| {
            for (r, label) in ROWS.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(*label);
                    });
                    for column in &columns {
                        row.col(|ui| {
                            ui.label(column[r].as_str());
                        });
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_dash::data::stats::{CategoricalSummary, NumericSummary};

    #[test]
    fn numeric_cells_fill_describe_rows() {
        let s = Summary::Numeric(NumericSummary {
            count: 2,
            mean: Some(30.0),
            std: Some(1.41421),
            min: Some(29.0),
            q25: Some(29.5),
            median: Some(30.0),
            q75: Some(30.5),
            max: Some(31.0),
        });
        let c = cells(&s);
        assert_eq!(c[0], "2");
        assert_eq!(c[2], "1.41");
        assert_eq!(c[7], "31.00");
        assert!(c[8..].iter().all(String::is_empty));
    }

    #[test]
    fn categorical_cells_leave_numeric_rows_blank() {
        let s = Summary::Categorical(CategoricalSummary {
            count: 4,
            distinct: 2,
            mode: Some("Sim".into()),
            frequency: 3,
        });
        let c = cells(&s);
        assert!(c[1..8].iter().all(String::is_empty));
        assert_eq!(c[8..], ["2", "Sim", "3"]);
    }

    #[test]
    fn undefined_values_are_blank() {
        let s = Summary::Numeric(NumericSummary {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        });
        let c = cells(&s);
        assert_eq!(c[0], "0");
        assert!(c[1..].iter().all(String::is_empty));
    }
}
