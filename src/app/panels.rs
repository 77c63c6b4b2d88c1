use std::path::Path;
use std::time::Duration;

use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::engine::export::{self, Clipboard, EXPORT_FILE_NAME};
use crate::engine::scene::{LABEL_COLOR, intent_color};
use crate::keywords::SearchIntent;
use crate::util::score;

use super::ViewModel;

const COPY_FEEDBACK_SECS: f64 = 2.0;
const KEYWORD_COPY_FEEDBACK_SECS: f64 = 1.5;
const EXPORT_STATUS_SECS: f64 = 4.0;

struct EguiClipboard<'a> {
    ctx: &'a egui::Context,
}

impl Clipboard for EguiClipboard<'_> {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn score_color(value: i64) -> Color32 {
    if value >= 80 {
        Color32::from_rgb(0x5b, 0x0e, 0xeb)
    } else if value >= 60 {
        Color32::from_rgb(0x6d, 0x5d, 0xfc)
    } else if value >= 40 {
        Color32::from_rgb(0x8a, 0xbd, 0xff)
    } else {
        LABEL_COLOR
    }
}

impl ViewModel {
    pub(super) fn draw_side_panel(&mut self, ui: &mut Ui) {
        let now = ui.input(|input| input.time);

        ui.add_space(6.0);
        ui.heading("Search intent");
        for intent in SearchIntent::ALL {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(intent_color(intent)));
                ui.label(intent.display_name());
            });
        }
        ui.label(
            RichText::new("Opacity indicates difficulty: solid = low, faded = high")
                .small()
                .weak(),
        );

        ui.separator();
        self.draw_export_buttons(ui, now);
        ui.separator();
        self.draw_keyword_list(ui, now);
    }

    fn draw_export_buttons(&mut self, ui: &mut Ui, now: f64) {
        if ui.button("Download PNG").clicked() {
            let message = if export::export_png(self.engine.scene(), Path::new(EXPORT_FILE_NAME)) {
                format!("Saved {EXPORT_FILE_NAME}")
            } else {
                "Image export failed, see log".to_owned()
            };
            self.export_status = Some((message, now + EXPORT_STATUS_SECS));
        }

        let copied = self
            .transcript_copied_until
            .is_some_and(|until| until > now);
        let copy_label = if copied { "Copied!" } else { "Copy keywords" };
        if ui.button(copy_label).clicked() {
            let mut clipboard = EguiClipboard { ctx: ui.ctx() };
            if export::copy_transcript(self.engine.records(), &mut clipboard) {
                self.transcript_copied_until = Some(now + COPY_FEEDBACK_SECS);
            }
        }
        if copied {
            ui.ctx()
                .request_repaint_after(Duration::from_millis(200));
        }

        if let Some((message, until)) = &self.export_status
            && *until > now
        {
            ui.label(RichText::new(message.as_str()).small());
        }

        if self
            .export_status
            .as_ref()
            .is_some_and(|(_, until)| *until <= now)
        {
            self.export_status = None;
        }
        if self
            .transcript_copied_until
            .is_some_and(|until| until <= now)
        {
            self.transcript_copied_until = None;
        }
    }

    fn draw_keyword_list(&mut self, ui: &mut Ui, now: f64) {
        let records = self.engine.records();
        let mut copy_request = None;

        egui::CollapsingHeader::new(format!("Keywords ({})", records.len()))
            .default_open(false)
            .show(ui, |ui| {
                ui.text_edit_singleline(&mut self.search);

                let matcher = SkimMatcherV2::default();
                let query = self.search.trim();

                let mut rows = records.iter().enumerate().collect::<Vec<_>>();
                rows.sort_by(|a, b| b.1.size.total_cmp(&a.1.size));

                egui::ScrollArea::vertical().max_height(340.0).show(ui, |ui| {
                    for (index, record) in rows {
                        if !query.is_empty()
                            && fuzzy_match_score(&matcher, &record.text, query).is_none()
                        {
                            continue;
                        }

                        ui.horizontal(|ui| {
                            let value = score(record.size);
                            ui.label(
                                RichText::new(format!("{value:>3}"))
                                    .color(score_color(value))
                                    .strong()
                                    .monospace(),
                            );
                            ui.label(record.text.as_str());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let keyword_copied = self
                                    .copied_keyword
                                    .is_some_and(|(i, until)| i == index && until > now);
                                let label = if keyword_copied { "Copied" } else { "Copy" };
                                if ui.small_button(label).clicked() {
                                    copy_request = Some((index, record.text.clone()));
                                }
                            });
                        });
                    }
                });
            });

        if let Some((index, text)) = copy_request {
            ui.ctx().copy_text(text);
            self.copied_keyword = Some((index, now + KEYWORD_COPY_FEEDBACK_SECS));
        }
        if self.copied_keyword.is_some_and(|(_, until)| until <= now) {
            self.copied_keyword = None;
        }
    }
}
