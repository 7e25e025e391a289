use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyDashApp {
    pub state: AppState,
}

impl SurveyDashApp {
    pub fn new(mut state: AppState) -> Self {
        state.load();
        Self { state }
    }
}

impl eframe::App for SurveyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, statistics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("Dashboard de Saúde Mental no Local de Trabalho");
    ui.label(
        "Explore insights sobre saúde mental no local de trabalho. \
         Use os filtros ao lado para personalizar a análise.",
    );
    ui.separator();

    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Abra um arquivo de pesquisa  (Arquivo → Abrir…)");
        });
        return;
    };

    panels::key_metrics(ui, &view.metrics);
    ui.separator();

    ui.heading("Busca por Tratamento por Gênero");
    charts::treatment_by_gender(ui, &view.treatment_by_gender, &state.labels);

    ui.heading("Interferência da Saúde Mental no Trabalho");
    charts::category_bars(ui, "work_interference", &view.work_interference);

    ui.heading("Consequências de Discutir Saúde Mental");
    charts::category_bars(ui, "discussion_consequence", &view.discussion_consequence);

    ui.heading("Saúde Mental vs. Saúde Física");
    charts::pie(ui, "mental_vs_physical", &view.mental_vs_physical);

    ui.heading("Conversa sobre Saúde Mental por Faixa Etária");
    charts::disclosure_by_age(ui, &view.disclosure_by_age);

    ui.heading("Estatísticas Descritivas");
    table::statistics_table(ui, &view.statistics);
}
