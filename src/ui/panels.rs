use eframe::egui::{self, Color32, RichText, Ui};
use survey_dash::data::aggregate::KeyMetrics;
use survey_dash::data::filter::ALL_COUNTRIES_LABEL;
use survey_dash::CountrySelector;

use crate::state::AppState;

const FOOTER: &str = "Universidade Federal do Ceará";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("Nenhum conjunto de dados carregado.");
            footer(ui);
            return;
        }
    };

    // ---- Country selector ----
    ui.strong("Selecione o país");
    let mut selected = state.country.clone();
    egui::ComboBox::from_id_salt("country")
        .selected_text(selected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(
                &mut selected,
                CountrySelector::AllCountries,
                ALL_COUNTRIES_LABEL,
            );
            for country in dataset.countries() {
                ui.selectable_value(
                    &mut selected,
                    CountrySelector::Country(country.clone()),
                    country.as_str(),
                );
            }
        });
    state.set_country(selected);

    ui.add_space(8.0);

    // ---- Age range ----
    ui.strong("Selecione a faixa de idade");
    if let Some((lo, hi)) = dataset.age_bounds() {
        let mut min = state.age_min;
        if ui
            .add(egui::Slider::new(&mut min, lo..=hi).text("mín."))
            .changed()
        {
            state.set_age_min(min);
        }
        let mut max = state.age_max;
        if ui
            .add(egui::Slider::new(&mut max, lo..=hi).text("máx."))
            .changed()
        {
            state.set_age_max(max);
        }
    }

    footer(ui);
}

fn footer(ui: &mut Ui) {
    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui: &mut Ui| {
        ui.label(FOOTER);
        ui.separator();
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            let can_open = state.dataset.is_none();
            if ui
                .add_enabled(can_open, egui::Button::new("Abrir…"))
                .clicked()
            {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{}: {} respostas carregadas, {} visíveis",
                state.source_name(),
                ds.len(),
                view.metrics.total_responses
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

pub fn key_metrics(ui: &mut Ui, metrics: &KeyMetrics) {
    ui.heading("Métricas-Chave");
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total de Respostas", metrics.total_responses);
        metric(&mut cols[1], "Buscaram Tratamento", metrics.treatment_yes);
        metric(&mut cols[2], "Histórico Familiar", metrics.family_history_yes);
        metric(&mut cols[3], "Trabalha Remotamente", metrics.remote_work_yes);
    });
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.label(label);
    ui.label(RichText::new(value.to_string()).size(28.0).strong());
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir pesquisa")
        .add_filter("Arquivos suportados", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
