use crate::catalog::{self, QUESTIONS};
use crate::export;
use crate::gate::TeacherGate;
use crate::session::{Screen, Session};
use crate::submission::store::SubmissionStore;
use crate::submission::AnswerValue;
use crate::theme::Theme;
use chrono::Local;
use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, TextEdit};
use std::time::{SystemTime, UNIX_EPOCH};

const RATING_FACES: [(u8, &str); 4] = [(1, "🙁"), (2, "😐"), (3, "🙂"), (4, "😄")];

pub struct AvaluacioApp {
    theme: Theme,
    session: Session,
    store: SubmissionStore,
    gate: TeacherGate,
    name_input: String,
    confirm_clear: bool,
    export_notice: Option<String>,
    diagnostics_log: Vec<String>,
}

impl AvaluacioApp {
    pub fn new(store: SubmissionStore, load_warning: Option<String>) -> Self {
        let mut app = Self {
            theme: Theme::default(),
            session: Session::new(),
            store,
            gate: TeacherGate::default(),
            name_input: String::new(),
            confirm_clear: false,
            export_notice: None,
            diagnostics_log: Vec::new(),
        };

        if let Some(warning) = load_warning {
            app.log_diagnostic(format!("store load warning: {warning}"));
        }

        app
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn start_session(&mut self) {
        if self.session.start(&self.name_input) {
            self.name_input.clear();
        }
    }

    fn finish_or_advance(&mut self) {
        if let Some(submission) = self.session.next() {
            if let Err(err) = self.store.append(submission) {
                self.log_diagnostic(format!("failed to persist submission: {err}"));
            }
        }
    }

    fn export_csv(&mut self) {
        let today = Local::now().date_naive();
        let dir = crate::submission::store::export_dir();
        match export::write_csv(&dir, today, self.store.submissions(), QUESTIONS) {
            Ok(path) => {
                self.export_notice = Some(format!("CSV desat a {}", path.display()));
            }
            Err(err) => {
                self.export_notice = Some("No s'ha pogut desar el CSV".to_string());
                self.log_diagnostic(format!("csv export failed: {err}"));
            }
        }
    }

    fn clear_all_confirmed(&mut self) {
        if let Err(err) = self.store.clear() {
            self.log_diagnostic(format!("failed to clear store: {err}"));
        }
        self.confirm_clear = false;
        self.export_notice = None;
        self.gate.lock();
    }

    fn render_welcome(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let card = self.theme.card_frame(self.theme.surface_1);
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.18);
                ui.set_max_width(480.0);
                card.show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Hola! 👋");
                        ui.label(
                            RichText::new("Estàs a punt d'avaluar-te el trimestre.")
                                .color(self.theme.accent_primary)
                                .size(17.0),
                        );
                        ui.add_space(self.theme.spacing_16);
                    });

                    ui.label(
                        RichText::new("COM ET DIUS?")
                            .small()
                            .color(self.theme.text_muted),
                    );
                    let response = ui.add(
                        TextEdit::singleline(&mut self.name_input)
                            .desired_width(f32::INFINITY)
                            .hint_text("Escriu el teu nom..."),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    ui.add_space(self.theme.spacing_8);
                    let can_start = !self.name_input.trim().is_empty();
                    let start = ui
                        .add_enabled(
                            can_start,
                            egui::Button::new(
                                RichText::new("Començar ➡").color(self.theme.text_on_accent),
                            )
                            .fill(self.theme.accent_primary)
                            .min_size(egui::vec2(ui.available_width(), 40.0)),
                        )
                        .clicked();

                    if (start || submitted) && can_start {
                        self.start_session();
                    }

                    ui.add_space(self.theme.spacing_16);
                    ui.separator();
                    ui.vertical_centered(|ui| {
                        if ui
                            .small_button(RichText::new("🔒 Accés Mestres").color(self.theme.text_muted))
                            .clicked()
                        {
                            self.gate.open_prompt();
                        }
                    });
                });
            });
        });
    }

    fn render_question(&mut self, ctx: &egui::Context) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let progress = self.session.progress();
        let is_last = self.session.is_last_question();
        let can_proceed = self.session.can_proceed();

        egui::TopBottomPanel::top("progress_bar")
            .exact_height(10.0)
            .show(ctx, |ui| {
                ui.add(
                    egui::ProgressBar::new(progress)
                        .fill(self.theme.accent_primary)
                        .desired_height(6.0),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.08);
                ui.set_max_width(720.0);
                self.theme
                    .card_frame(question.category.color())
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(question.category.display_name())
                                    .small()
                                    .strong()
                                    .color(question.category.accent()),
                            );
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format!(
                                        "{} / {}",
                                        self.question_position(),
                                        QUESTIONS.len()
                                    ))
                                    .color(self.theme.text_muted),
                                );
                            });
                        });
                        ui.add_space(self.theme.spacing_8);
                        ui.label(RichText::new(question.text).size(24.0).strong());
                        ui.add_space(self.theme.spacing_16);

                        match question.response_type {
                            catalog::ResponseType::Rating => self.render_rating_scale(ui),
                            catalog::ResponseType::Text => self.render_text_answer(ui),
                        }

                        ui.add_space(self.theme.spacing_24);
                        ui.horizontal(|ui| {
                            let at_first = matches!(self.session.screen(), Screen::Answering(0));
                            if ui
                                .add_enabled(!at_first, egui::Button::new("⬅ Enrere"))
                                .clicked()
                            {
                                self.session.prev();
                            }

                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let label = if is_last { "Finalitzar ✔" } else { "Següent ➡" };
                                let next = ui
                                    .add_enabled(
                                        can_proceed,
                                        egui::Button::new(
                                            RichText::new(label).color(self.theme.text_on_accent),
                                        )
                                        .fill(self.theme.accent_primary),
                                    )
                                    .clicked();
                                if next {
                                    self.finish_or_advance();
                                }
                            });
                        });
                    });
            });
        });
    }

    fn question_position(&self) -> usize {
        match self.session.screen() {
            Screen::Answering(index) => index + 1,
            _ => 0,
        }
    }

    fn render_rating_scale(&mut self, ui: &mut egui::Ui) {
        let selected = match self.session.current_answer() {
            Some(AnswerValue::Rating(value)) => Some(*value),
            _ => None,
        };

        let mut picked = None;
        ui.horizontal_wrapped(|ui| {
            for (value, face) in RATING_FACES {
                let is_selected = selected == Some(value);
                let fill = if is_selected {
                    self.theme.surface_2
                } else {
                    Color32::TRANSPARENT
                };
                ui.vertical(|ui| {
                    let button = egui::Button::new(RichText::new(face).size(44.0))
                        .fill(fill)
                        .min_size(egui::vec2(96.0, 84.0));
                    if ui.add(button).clicked() {
                        picked = Some(value);
                    }
                    if is_selected {
                        ui.label(
                            RichText::new(catalog::scale_label(value))
                                .strong()
                                .color(catalog::rating_color(value)),
                        );
                    }
                });
            }
        });

        if let Some(value) = picked {
            if let Some(answer) = AnswerValue::rating(value) {
                self.session.answer(answer);
            }
        }
    }

    fn render_text_answer(&mut self, ui: &mut egui::Ui) {
        let mut text = match self.session.current_answer() {
            Some(AnswerValue::Text(value)) => value.clone(),
            _ => String::new(),
        };

        let response = self.theme.inset_frame().show(ui, |ui| {
            ui.add(
                TextEdit::multiline(&mut text)
                    .desired_width(f32::INFINITY)
                    .desired_rows(7)
                    .hint_text("Escriu la teva resposta aquí..."),
            )
        });

        if response.inner.changed() {
            self.session.answer(AnswerValue::text(text));
        }
    }

    fn render_finished(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);
                ui.set_max_width(480.0);
                self.theme
                    .card_frame(self.theme.success_soft)
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new("✔").size(56.0).color(self.theme.success));
                            ui.heading(format!("Fantàstic, {}!", self.session.student_name()));
                            ui.label(
                                "Has completat la teva autoavaluació. Les teves respostes \
                                 s'han guardat correctament per a la mestra.",
                            );
                            ui.add_space(self.theme.spacing_16);
                            if ui
                                .add(
                                    egui::Button::new(
                                        RichText::new("Tornar a l'inici")
                                            .color(self.theme.text_on_accent),
                                    )
                                    .fill(self.theme.success),
                                )
                                .clicked()
                            {
                                self.session.reset();
                            }
                        });
                    });
            });
        });
    }

    fn render_password_prompt(&mut self, ctx: &egui::Context) {
        if !self.gate.prompt_open() {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("teacher_access")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.heading("🔒 Accés Mestra");
            ui.label(
                RichText::new(
                    "Aquesta zona està reservada per a les mestres. Introdueix la \
                     contrasenya per accedir als resultats.",
                )
                .color(self.theme.text_muted),
            );
            ui.add_space(self.theme.spacing_8);

            let response = ui.add(
                TextEdit::singleline(&mut self.gate.input)
                    .password(true)
                    .desired_width(f32::INFINITY)
                    .hint_text("Contrasenya"),
            );
            if response.changed() {
                self.gate.input_edited();
            }
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if self.gate.has_error() {
                ui.label(
                    RichText::new("🚫 Contrasenya incorrecta")
                        .small()
                        .strong()
                        .color(self.theme.danger),
                );
            }

            ui.add_space(self.theme.spacing_8);
            ui.horizontal(|ui| {
                if ui.button("Cancel·lar").clicked() {
                    self.gate.cancel();
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let entered = ui
                        .add(
                            egui::Button::new(
                                RichText::new("Entrar").color(self.theme.text_on_accent),
                            )
                            .fill(self.theme.accent_primary),
                        )
                        .clicked();
                    if entered || submitted {
                        self.gate.submit();
                    }
                });
            });
        });

        if modal.should_close() {
            self.gate.cancel();
        }
    }

    fn render_teacher_dashboard(&mut self, ctx: &egui::Context) {
        if !self.gate.is_unlocked() {
            return;
        }

        let mut close_dashboard = false;
        let mut export_clicked = false;
        let mut clear_requested = false;

        let modal = egui::Modal::new(egui::Id::new("teacher_dashboard")).show(ctx, |ui| {
            ui.set_width(ui.ctx().screen_rect().width().min(980.0) - 80.0);
            ui.horizontal(|ui| {
                ui.heading("Panell de la Mestra");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("✖").clicked() {
                        close_dashboard = true;
                    }
                });
            });
            ui.separator();

            if self.store.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing_24);
                    ui.label(
                        RichText::new("Encara no hi ha respostes guardades.")
                            .color(self.theme.text_muted),
                    );
                    ui.add_space(self.theme.spacing_24);
                });
            } else {
                self.render_results_table(ui);
            }

            if let Some(notice) = &self.export_notice {
                ui.label(RichText::new(notice).small().color(self.theme.text_muted));
            }

            if !self.diagnostics_log.is_empty() {
                egui::CollapsingHeader::new("Diagnòstics")
                    .default_open(false)
                    .show(ui, |ui| {
                        for entry in &self.diagnostics_log {
                            ui.label(RichText::new(entry).small());
                        }
                    });
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("🗑 Esborrar totes les dades").color(self.theme.danger))
                    .clicked()
                {
                    clear_requested = true;
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let export = ui
                        .add_enabled(
                            !self.store.is_empty(),
                            egui::Button::new(
                                RichText::new("⬇ Descarregar Excel (CSV)")
                                    .color(self.theme.text_on_accent),
                            )
                            .fill(self.theme.accent_primary),
                        )
                        .clicked();
                    export_clicked |= export;
                });
            });
        });

        if modal.should_close() || close_dashboard {
            self.gate.lock();
            self.export_notice = None;
        }
        if export_clicked {
            self.export_csv();
        }
        if clear_requested {
            self.confirm_clear = true;
        }
    }

    fn render_results_table(&self, ui: &mut egui::Ui) {
        ScrollArea::both()
            .id_salt("results_table")
            .max_height(ui.ctx().screen_rect().height() * 0.55)
            .show(ui, |ui| {
                egui::Grid::new("results_grid")
                    .striped(true)
                    .spacing(egui::vec2(self.theme.spacing_16, self.theme.spacing_8))
                    .show(ui, |ui| {
                        ui.label(RichText::new("Alumne").strong());
                        ui.label(RichText::new("Data").strong());
                        for question in QUESTIONS {
                            ui.label(
                                RichText::new(truncate_prompt(question.text, 30))
                                    .small()
                                    .strong(),
                            )
                            .on_hover_text(question.text);
                        }
                        ui.end_row();

                        for submission in self.store.submissions() {
                            ui.label(
                                RichText::new(&submission.student_name)
                                    .strong()
                                    .color(self.theme.accent_muted),
                            );
                            ui.label(
                                RichText::new(submission.date.format("%d/%m/%Y").to_string())
                                    .color(self.theme.text_muted),
                            );
                            for question in QUESTIONS {
                                let answer = submission
                                    .responses
                                    .iter()
                                    .find(|response| response.question_id == question.id)
                                    .map(|response| &response.value);
                                match answer {
                                    Some(AnswerValue::Rating(value)) => {
                                        ui.label(
                                            RichText::new(format!("{value}/4"))
                                                .strong()
                                                .color(catalog::rating_color(*value)),
                                        );
                                    }
                                    Some(AnswerValue::Text(text)) => {
                                        ui.label(
                                            RichText::new(truncate_prompt(text, 40))
                                                .italics()
                                                .color(self.theme.text_muted),
                                        )
                                        .on_hover_text(text);
                                    }
                                    None => {
                                        ui.label("");
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn render_confirm_clear(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("confirm_clear")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading("Esborrar totes les dades?");
            ui.label(
                "Estàs segura que vols esborrar totes les dades de la classe? \
                 Aquesta acció no es pot desfer.",
            );
            ui.add_space(self.theme.spacing_8);
            ui.horizontal(|ui| {
                if ui.button("Cancel·lar").clicked() {
                    self.confirm_clear = false;
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let confirmed = ui
                        .add(
                            egui::Button::new(
                                RichText::new("Esborrar-ho tot").color(self.theme.text_on_accent),
                            )
                            .fill(self.theme.danger),
                        )
                        .clicked();
                    if confirmed {
                        self.clear_all_confirmed();
                    }
                });
            });
        });

        if modal.should_close() {
            self.confirm_clear = false;
        }
    }
}

fn truncate_prompt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

impl eframe::App for AvaluacioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.session.screen() {
            Screen::Welcome => self.render_welcome(ctx),
            Screen::Answering(_) => self.render_question(ctx),
            Screen::Finished => self.render_finished(ctx),
        }

        self.render_password_prompt(ctx);
        self.render_teacher_dashboard(ctx);
        self.render_confirm_clear(ctx);
    }
}
